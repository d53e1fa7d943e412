//! Fixture list and single-match exports.

use crate::{
    cli::types::TeamId,
    core::{cache::CachedTeamMap, directory::fallback_name},
    export::{Cell, ExportBook, Table},
    gateway::{Fixture, ReporterSide},
    stats::fixtures::{
        attendance_total, competition_label, format_competition, is_played, match_date,
        match_time, scoring_counts, team_stars, TeamStars,
    },
};

pub const FIXTURE_COLUMNS: &[&str] = &[
    "Season",
    "Round",
    "Competition",
    "Date",
    "Time",
    "Home Team",
    "Away Team",
    "Home Score",
    "Away Score",
    "Venue",
    "Status",
];

pub const MATCH_STATS_COLUMNS: &[&str] = &["Category", "Home Team", "Away Team"];

fn team_name(teams: &CachedTeamMap, id: TeamId) -> String {
    teams
        .get(&id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| fallback_name(id))
}

/// Fixtures in display order. Scores stay empty until a match is played.
pub fn fixtures_book(fixtures: &[Fixture], teams: &CachedTeamMap) -> ExportBook {
    let mut table = Table::new("Fixtures", FIXTURE_COLUMNS);

    for fixture in fixtures {
        let played = is_played(fixture);
        let score = |home: bool| -> Cell {
            match &fixture.match_summary {
                Some(summary) if played => {
                    Cell::Number(if home { summary.home.points } else { summary.guest.points })
                }
                _ => Cell::Empty,
            }
        };
        let venue = fixture
            .venue
            .clone()
            .filter(|v| !v.is_empty())
            .or_else(|| {
                teams
                    .get(&fixture.home_team_id)
                    .and_then(|t| t.stadium.clone())
            })
            .unwrap_or_default();

        table.push(vec![
            fixture.season.into(),
            fixture.round.into(),
            Cell::Text(competition_label(fixture)),
            Cell::Text(match_date(&fixture.matchstart)),
            Cell::text_or_empty(&match_time(&fixture.matchstart)),
            Cell::Text(team_name(teams, fixture.home_team_id)),
            Cell::Text(team_name(teams, fixture.guest_team_id)),
            score(true),
            score(false),
            Cell::text_or_empty(&venue),
            Cell::text(if played { "Played" } else { "Upcoming" }),
        ]);
    }

    ExportBook::single("fixtures.xlsx", table)
}

/// `match_<home>_vs_<away>.xlsx` with every non-alphanumeric replaced by `_`.
pub fn match_stats_file_name(home: &str, away: &str) -> String {
    let stem: String = format!("match_{}_vs_{}", home, away)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}.xlsx")
}

fn blank() -> Vec<Cell> {
    vec![Cell::Empty, Cell::Empty, Cell::Empty]
}

fn heading(title: &str) -> Vec<Cell> {
    vec![Cell::text(title), Cell::Empty, Cell::Empty]
}

fn pair(label: &str, home: impl Into<Cell>, away: impl Into<Cell>) -> Vec<Cell> {
    vec![Cell::text(label), home.into(), away.into()]
}

fn star_rows(home: &TeamStars, away: &TeamStars) -> Vec<Vec<Cell>> {
    let pick: [(&str, fn(&TeamStars) -> Option<u32>); 9] = [
        ("Scrum", |s| s.scrum),
        ("Lineout", |s| s.lineout),
        ("Ruck", |s| s.ruck),
        ("Maul", |s| s.maul),
        ("Attack", |s| s.attack),
        ("Defense", |s| s.defense),
        ("Kicking", |s| s.kicking),
        ("Handling", |s| s.handling),
        ("Stamina", |s| s.stamina),
    ];
    pick.iter()
        .map(|(label, get)| pair(label, get(home), get(away)))
        .collect()
}

fn opt_text(value: &Option<String>) -> Cell {
    value.as_deref().map(Cell::text_or_empty).unwrap_or(Cell::Empty)
}

fn team_information(home: &ReporterSide, away: &ReporterSide) -> Vec<Vec<Cell>> {
    let rows: [(&str, &Option<String>, &Option<String>); 7] = [
        ("World Rank", &home.world_rank, &away.world_rank),
        ("National Rank", &home.national_rank, &away.national_rank),
        ("Regional Rank", &home.regional_rank, &away.regional_rank),
        ("Avg CSR", &home.avg_csr, &away.avg_csr),
        ("Energy %", &home.energy_level, &away.energy_level),
        ("Weight (kg)", &home.weight, &away.weight),
        ("Form", &home.all_form, &away.all_form),
    ];
    rows.iter()
        .map(|(label, h, a)| vec![Cell::text(*label), opt_text(h), opt_text(a)])
        .collect()
}

/// One match's figures side by side. Team information is included only when
/// both reporter sides are present.
pub fn match_stats_book(fixture: &Fixture, teams: &CachedTeamMap) -> ExportBook {
    let home_team = teams.get(&fixture.home_team_id);
    let away_team = teams.get(&fixture.guest_team_id);
    let mut table = Table::new("Match Stats", MATCH_STATS_COLUMNS);

    let reporter = fixture.reporter_summary.as_ref();
    let home_report = reporter.and_then(|r| r.home.as_ref());
    let away_report = reporter.and_then(|r| r.guest.as_ref());
    let home_stars = home_report.map(team_stars).unwrap_or_default();
    let away_stars = away_report.map(team_stars).unwrap_or_default();

    table.push(heading("Match Information"));
    table.push(pair(
        "Teams",
        Cell::Text(team_name(teams, fixture.home_team_id)),
        Cell::Text(team_name(teams, fixture.guest_team_id)),
    ));
    table.push(pair("Date", match_date(&fixture.matchstart), Cell::Empty));
    table.push(pair(
        "Competition",
        format_competition(&fixture.competition),
        Cell::Empty,
    ));
    table.push(pair(
        "Venue",
        Cell::text_or_empty(fixture.venue.as_deref().unwrap_or("")),
        Cell::Empty,
    ));
    table.push(pair(
        "Attendance",
        attendance_total(fixture)
            .map(Cell::from)
            .unwrap_or_else(|| Cell::text("N/A")),
        Cell::Empty,
    ));
    table.push(blank());

    if let Some(summary) = &fixture.match_summary {
        table.push(pair("Score", summary.home.points, summary.guest.points));
        let home = scoring_counts(&summary.home);
        let away = scoring_counts(&summary.guest);
        table.push(blank());
        table.push(heading("Scoring Breakdown"));
        table.push(pair("Tries", home.tries, away.tries));
        table.push(pair("Conversions", home.conversions, away.conversions));
        table.push(pair("Penalties", home.penalties, away.penalties));
        table.push(pair("Drop Goals", home.drop_goals, away.drop_goals));
    } else {
        table.push(pair("Score", Cell::Empty, Cell::Empty));
    }

    table.push(blank());
    table.push(heading("Match Statistics"));
    table.push(pair("Territory %", home_stars.territory, away_stars.territory));
    table.push(pair("Possession %", home_stars.possession, away_stars.possession));

    table.push(blank());
    table.push(heading("Team Stars"));
    for row in star_rows(&home_stars, &away_stars) {
        table.push(row);
    }

    if let (Some(home), Some(away)) = (home_report, away_report) {
        table.push(blank());
        table.push(heading("Team Information"));
        for row in team_information(home, away) {
            table.push(row);
        }
    }

    let file_name = match_stats_file_name(
        home_team.map(|t| t.name.as_str()).unwrap_or("Home"),
        away_team.map(|t| t.name.as_str()).unwrap_or("Away"),
    );
    ExportBook {
        file_name,
        sheets: vec![table],
    }
}
