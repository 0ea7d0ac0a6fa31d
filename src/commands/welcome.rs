use crate::commands::responder::{respond_reload, respond_test};
use crate::models::config::GreetingKind;
use crate::{Context, Error};

/// Manage welcome messages
#[poise::command(slash_command, prefix_command, guild_only, subcommands("test", "reload"))]
pub async fn welcome(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Test the welcome message
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn test(ctx: Context<'_>) -> Result<(), Error> {
    respond_test(ctx, GreetingKind::Welcome).await
}

/// Reload the configuration from file
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn reload(ctx: Context<'_>) -> Result<(), Error> {
    respond_reload(ctx, GreetingKind::Welcome).await
}
