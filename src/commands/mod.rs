//! Command implementations for the brtools CLI

pub mod fixtures;
pub mod match_stats;
pub mod office;
pub mod player;
pub mod players;
pub mod stadium;
pub mod standings;
pub mod teams;
pub mod training;

use std::{path::Path, sync::Arc};

use log::info;

use crate::{
    cli::{types::AccessKey, BrTools, Commands, TeamArgs},
    core::{resolve_access_key, GatewayConfig, TeamDirectory},
    error::{BrError, Result},
    export::{write_workbook, Cell, ExportBook, Table},
    gateway::{Gateway, HttpGateway, Team},
    session::{RosterSession, RosterSnapshot, SessionStatus},
    TeamId,
};

#[cfg(test)]
mod tests;

pub const TEAM_ENV_VAR: &str = "BRTOOLS_TEAM_ID";

/// Services every command works through: one gateway, one team directory
/// and one roster session sharing it.
pub struct CommandContext {
    pub session: RosterSession,
}

impl CommandContext {
    /// Context talking to the configured HTTP gateway.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let gateway = HttpGateway::new(config)?;
        Ok(Self::with_gateway(Arc::new(gateway), config))
    }

    pub fn with_gateway(gateway: Arc<dyn Gateway>, config: &GatewayConfig) -> Self {
        let directory = TeamDirectory::new(gateway.clone(), config);
        Self {
            session: RosterSession::new(gateway, directory),
        }
    }

    pub fn directory(&self) -> &TeamDirectory {
        self.session.directory()
    }

    /// Present the credential; fetches the member's clubs.
    pub async fn connect(&self, access_key: Option<AccessKey>) -> Result<()> {
        let key = resolve_access_key(access_key)?;
        self.session.set_access_key(Some(key)).await;
        Ok(())
    }

    /// Connect, pick the club and load all of its data.
    pub async fn load_team(&self, target: TeamArgs) -> Result<RosterSnapshot> {
        self.connect(target.access_key).await?;
        let my_teams = self.session.my_teams();
        let team_id = resolve_team_id(target.team, my_teams.items())?;

        match self.session.select_and_load(team_id).await {
            SessionStatus::Error(reason) => Err(BrError::NoData {
                endpoint: format!("players for team {} ({})", team_id, reason),
            }),
            _ => Ok(self.session.snapshot()),
        }
    }
}

/// Resolve the club from the CLI option, `BRTOOLS_TEAM_ID`, or the member's
/// first club, in that order.
pub fn resolve_team_id(team: Option<TeamId>, my_teams: &[Team]) -> Result<TeamId> {
    if let Some(team) = team {
        return Ok(team);
    }

    if let Ok(value) = std::env::var(TEAM_ENV_VAR) {
        if !value.trim().is_empty() {
            return value.parse();
        }
    }

    my_teams
        .first()
        .map(|team| team.id)
        .ok_or(BrError::NoTeamSelected)
}

/// Write the book when an export directory was given.
pub fn maybe_export(book: &ExportBook, dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = dir {
        let path = write_workbook(book, dir)?;
        println!("✓ Exported to {}", path.display());
    }
    Ok(())
}

/// Cell as shown in terminal output.
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
        Cell::Number(n) => format!("{:.2}", n),
        Cell::Text(t) => t.clone(),
        Cell::Empty => String::new(),
    }
}

/// Render a table as aligned text columns.
pub fn render_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(value.chars().count());
            }
        }
    }

    let line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(table.columns.to_vec()));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

/// Dispatch a parsed command line.
pub async fn run(app: BrTools, config: &GatewayConfig) -> Result<()> {
    let ctx = CommandContext::new(config)?;
    info!("using gateway {}", config.base_url);

    match app.command {
        Commands::Teams { access_key, json } => teams::handle_teams(&ctx, access_key, json).await,
        Commands::Players {
            target,
            youth,
            averages,
            sort,
            output,
        } => {
            players::handle_players(
                &ctx,
                players::PlayersParams {
                    target,
                    youth,
                    averages,
                    sort,
                    as_json: output.json,
                    export: output.export,
                },
            )
            .await
        }
        Commands::Standings {
            target,
            rankings,
            sort,
            output,
        } => {
            standings::handle_standings(
                &ctx,
                standings::StandingsParams {
                    target,
                    rankings,
                    sort,
                    as_json: output.json,
                    export: output.export,
                },
            )
            .await
        }
        Commands::Fixtures { target, output } => {
            fixtures::handle_fixtures(&ctx, target, output.json, output.export.as_deref()).await
        }
        Commands::MatchStats {
            target,
            fixture,
            output,
        } => {
            match_stats::handle_match_stats(
                &ctx,
                target,
                fixture,
                output.json,
                output.export.as_deref(),
            )
            .await
        }
        Commands::Training { target, output } => {
            training::handle_training(&ctx, target, output.json, output.export.as_deref()).await
        }
        Commands::Office { target, json } => office::handle_office(&ctx, target, json).await,
        Commands::Stadium {
            target,
            members,
            current,
            json,
        } => stadium::handle_stadium(&ctx, target, members, current, json).await,
        Commands::Player {
            access_key,
            player,
            history,
        } => player::handle_player(&ctx, access_key, player, history).await,
    }
}
