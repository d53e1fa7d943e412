//! Single player statistics command

use crate::{
    cli::types::{AccessKey, PlayerId},
    Result,
};

use super::CommandContext;

/// Handle the player command
pub async fn handle_player(
    ctx: &CommandContext,
    access_key: Option<AccessKey>,
    player: PlayerId,
    history: bool,
) -> Result<()> {
    ctx.connect(access_key).await?;
    let value = if history {
        ctx.session.player_history(player).await?
    } else {
        ctx.session.player_stats(player).await?
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
