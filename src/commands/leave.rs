use crate::commands::responder::{respond_reload, respond_test};
use crate::models::config::GreetingKind;
use crate::{Context, Error};

/// Manage leave messages
#[poise::command(slash_command, prefix_command, guild_only, subcommands("test", "reload"))]
pub async fn leave(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Test the leave message
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn test(ctx: Context<'_>) -> Result<(), Error> {
    respond_test(ctx, GreetingKind::Leave).await
}

/// Reload the configuration from file
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn reload(ctx: Context<'_>) -> Result<(), Error> {
    respond_reload(ctx, GreetingKind::Leave).await
}
