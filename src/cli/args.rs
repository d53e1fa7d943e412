//! CLI argument definitions and parsing structures.

use std::path::PathBuf;

use super::types::{AccessKey, FixtureId, PlayerId, TeamId};
use crate::stats::sort::{PlayerField, StandingField};
use clap::{Args, Parser, Subcommand};

/// Credential and club selection shared by every command.
#[derive(Debug, Clone, Args)]
pub struct TeamArgs {
    /// Access key (or set `BRTOOLS_ACCESS_KEY` env var).
    #[clap(long, short = 'k')]
    pub access_key: Option<AccessKey>,

    /// Club id (or set `BRTOOLS_TEAM_ID`); defaults to your first club.
    #[clap(long, short)]
    pub team: Option<TeamId>,
}

/// Output options shared by the table commands.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output results as JSON instead of text lines.
    #[clap(long)]
    pub json: bool,

    /// Write an .xlsx workbook into this directory.
    #[clap(long, value_name = "DIR")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[clap(name = "brtools", about = "Rugby club management companion")]
pub struct BrTools {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the clubs that belong to your access key.
    Teams {
        /// Access key (or set `BRTOOLS_ACCESS_KEY` env var).
        #[clap(long, short = 'k')]
        access_key: Option<AccessKey>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Senior or youth squad with ratings.
    ///
    /// `--sort` may be repeated; each use behaves like clicking a column
    /// header: the same field again flips direction, a new field starts
    /// descending.
    Players {
        #[clap(flatten)]
        target: TeamArgs,

        /// Show the youth squad instead of the senior squad.
        #[clap(long)]
        youth: bool,

        /// Print squad averages (all, top 15, top 22).
        #[clap(long)]
        averages: bool,

        /// Sort column (repeatable): `--sort csr --sort csr`.
        #[clap(long = "sort")]
        sort: Vec<PlayerField>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// League table or world ranking view of the club's league.
    Standings {
        #[clap(flatten)]
        target: TeamArgs,

        /// Show the ranking view instead of the league table.
        #[clap(long)]
        rankings: bool,

        /// Sort column (repeatable): `--sort world_rank`.
        #[clap(long = "sort")]
        sort: Vec<StandingField>,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Upcoming and played fixtures.
    Fixtures {
        #[clap(flatten)]
        target: TeamArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Full statistics for one fixture of the club.
    MatchStats {
        #[clap(flatten)]
        target: TeamArgs,

        /// Fixture id.
        #[clap(long, short)]
        fixture: FixtureId,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Weekly training report and injury list.
    Training {
        #[clap(flatten)]
        target: TeamArgs,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Club overview: best players, staff, facilities and league position.
    Office {
        #[clap(flatten)]
        target: TeamArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Stadium sizing for a membership count.
    ///
    /// Current seating comes from the club record; any area can be
    /// overridden locally.
    Stadium {
        #[clap(flatten)]
        target: TeamArgs,

        /// Membership count (defaults to the club's members).
        #[clap(long)]
        members: Option<u32>,

        #[clap(flatten)]
        current: SeatOverrides,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Raw statistics or history for a single player.
    Player {
        /// Access key (or set `BRTOOLS_ACCESS_KEY` env var).
        #[clap(long, short = 'k')]
        access_key: Option<AccessKey>,

        /// Player id.
        #[clap(long, short)]
        player: PlayerId,

        /// Show the career history instead of current statistics.
        #[clap(long)]
        history: bool,
    },
}

/// Local overrides for the current stadium.
#[derive(Debug, Clone, Default, Args)]
pub struct SeatOverrides {
    /// Current standing seats.
    #[clap(long)]
    pub standing: Option<u32>,

    /// Current uncovered seats.
    #[clap(long)]
    pub uncovered: Option<u32>,

    /// Current covered seats.
    #[clap(long)]
    pub covered: Option<u32>,

    /// Current members' seats.
    #[clap(long = "members-seats")]
    pub members_seats: Option<u32>,

    /// Current corporate seats.
    #[clap(long)]
    pub corporate: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players_sort_is_repeatable() {
        let app = BrTools::try_parse_from([
            "brtools", "players", "--team", "42", "--sort", "csr", "--sort", "age", "--json",
        ])
        .unwrap();

        match app.command {
            Commands::Players {
                target,
                sort,
                output,
                youth,
                ..
            } => {
                assert_eq!(target.team, Some(TeamId::new(42)));
                assert_eq!(sort, vec![PlayerField::Rating, PlayerField::Age]);
                assert!(output.json);
                assert!(!youth);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_sort_field_is_rejected() {
        let result = BrTools::try_parse_from(["brtools", "standings", "--sort", "goals"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_match_stats_requires_fixture() {
        assert!(BrTools::try_parse_from(["brtools", "match-stats"]).is_err());

        let app =
            BrTools::try_parse_from(["brtools", "match-stats", "--fixture", "9001", "-k", "abc"])
                .unwrap();
        match app.command {
            Commands::MatchStats {
                fixture, target, ..
            } => {
                assert_eq!(fixture, FixtureId::new(9001));
                assert_eq!(target.access_key.unwrap().as_str(), "abc");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_stadium_overrides() {
        let app = BrTools::try_parse_from([
            "brtools",
            "stadium",
            "--members",
            "1200",
            "--standing",
            "5000",
            "--members-seats",
            "300",
        ])
        .unwrap();
        match app.command {
            Commands::Stadium {
                members, current, ..
            } => {
                assert_eq!(members, Some(1200));
                assert_eq!(current.standing, Some(5000));
                assert_eq!(current.members_seats, Some(300));
                assert_eq!(current.covered, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
