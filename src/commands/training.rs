//! Training report command

use std::path::Path;

use crate::{cli::TeamArgs, export::training_book, Result};

use super::{maybe_export, render_table, CommandContext};

/// Handle the training command
pub async fn handle_training(
    ctx: &CommandContext,
    target: TeamArgs,
    as_json: bool,
    export: Option<&Path>,
) -> Result<()> {
    let snapshot = ctx.load_team(target).await?;
    let report = snapshot.training.require("training report")?;
    let book = training_book(report);

    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for table in &book.sheets {
            println!("{}", table.sheet);
            print!("{}", render_table(table));
            println!();
        }
    }

    maybe_export(&book, export)
}
