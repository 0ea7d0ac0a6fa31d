// Member lifecycle listeners - welcome on join, farewell on leave

use anyhow::Result;
use poise::serenity_prelude as serenity;
use tracing::{debug, warn};

use crate::features::builders::build_event_message;
use crate::models::config::{GreetingKind, WelcomerConfig};
use crate::models::context::RenderContext;
use crate::models::payload::MessagePayload;
use crate::Data;

/// A resolved send: target channel plus rendered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub channel_id: serenity::ChannelId,
    pub message: MessagePayload,
}

/// Decide whether (and where) to send for a member event in `guild_id`.
/// `is_text_channel` is only consulted once the configured ID parses.
pub fn plan_delivery(
    kind: GreetingKind,
    config: Option<&WelcomerConfig>,
    ctx: &RenderContext,
    guild_id: serenity::GuildId,
    is_text_channel: impl Fn(serenity::GuildId, serenity::ChannelId) -> bool,
) -> Option<Delivery> {
    let section = kind.section(config?)?;
    let channel_id = parse_channel_id(&section.channel_id)?;
    if !is_text_channel(guild_id, channel_id) {
        return None;
    }

    Some(Delivery {
        channel_id,
        message: build_event_message(kind, section, ctx),
    })
}

fn parse_channel_id(raw: &str) -> Option<serenity::ChannelId> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(serenity::ChannelId::new)
}

/// Channel of the cached guild that can receive messages
fn is_text_channel(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    channel_id: serenity::ChannelId,
) -> bool {
    ctx.cache
        .guild(guild_id)
        .and_then(|guild| guild.channels.get(&channel_id).map(|channel| channel.is_text_based()))
        .unwrap_or(false)
}

/// Handle GuildMemberAddition
pub async fn handle_member_join(ctx: &serenity::Context, member: &serenity::Member, data: &Data) {
    let guild_name = member.guild_id.name(&ctx.cache).unwrap_or_default();
    let render_ctx = RenderContext::from_member(member, guild_name);
    dispatch(ctx, data, GreetingKind::Welcome, member.guild_id, &render_ctx).await;
}

/// Handle GuildMemberRemoval
pub async fn handle_member_leave(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    user: &serenity::User,
    member: Option<&serenity::Member>,
    data: &Data,
) {
    let guild_name = guild_id.name(&ctx.cache).unwrap_or_default();
    let render_ctx = RenderContext::from_user(user, member, guild_name);
    dispatch(ctx, data, GreetingKind::Leave, guild_id, &render_ctx).await;
}

async fn dispatch(
    ctx: &serenity::Context,
    data: &Data,
    kind: GreetingKind,
    guild_id: serenity::GuildId,
    render_ctx: &RenderContext,
) {
    let config = data.config.get().await;
    let Some(delivery) = plan_delivery(kind, config.as_deref(), render_ctx, guild_id, |guild, channel| {
        is_text_channel(ctx, guild, channel)
    }) else {
        debug!("No {} message sent for {}: not configured", kind.name(), render_ctx.display_name);
        return;
    };

    // Nobody to report to - log and move on
    if let Err(e) = send(ctx, delivery).await {
        warn!("{} message failed: {:?}", kind.name(), e);
    }
}

async fn send(ctx: &serenity::Context, delivery: Delivery) -> Result<()> {
    delivery
        .channel_id
        .send_message(&ctx.http, delivery.message.into_message())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::GreetingConfig;
    use std::cell::Cell;

    const CHANNEL: u64 = 123456789012345678;

    fn guild() -> serenity::GuildId {
        serenity::GuildId::new(987654321098765432)
    }

    fn ctx() -> RenderContext {
        RenderContext {
            mention: "@Bob".to_string(),
            display_name: "Bob".to_string(),
            avatar_url: String::new(),
            guild_name: "Rust Club".to_string(),
        }
    }

    fn config() -> WelcomerConfig {
        WelcomerConfig {
            welcome: GreetingConfig {
                channel_id: CHANNEL.to_string(),
                message_content: "Welcome {user}!".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_no_config_no_delivery() {
        assert_eq!(plan_delivery(GreetingKind::Welcome, None, &ctx(), guild(), |_, _| true), None);
    }

    #[test]
    fn test_unknown_channel_no_delivery() {
        let looked_up = Cell::new(None);
        let config = config();
        let delivery = plan_delivery(GreetingKind::Welcome, Some(&config), &ctx(), guild(), |guild_id, id| {
            looked_up.set(Some((guild_id, id)));
            false
        });

        assert_eq!(delivery, None);
        assert_eq!(looked_up.get(), Some((guild(), serenity::ChannelId::new(CHANNEL))));
    }

    #[test]
    fn test_channel_from_other_guild_no_delivery() {
        let config = config();
        let channel = serenity::ChannelId::new(CHANNEL);
        let other_guild = serenity::GuildId::new(111111111111111111);
        // the configured channel only exists in another guild
        let lookup = |guild_id: serenity::GuildId, id: serenity::ChannelId| guild_id == other_guild && id == channel;

        assert_eq!(plan_delivery(GreetingKind::Welcome, Some(&config), &ctx(), guild(), lookup), None);
        assert!(plan_delivery(GreetingKind::Welcome, Some(&config), &ctx(), other_guild, lookup).is_some());
    }

    #[test]
    fn test_unparseable_channel_skips_lookup() {
        let mut config = config();
        config.welcome.channel_id = "general".to_string();
        let delivery = plan_delivery(GreetingKind::Welcome, Some(&config), &ctx(), guild(), |_, _| {
            panic!("lookup should not happen")
        });
        assert_eq!(delivery, None);
    }

    #[test]
    fn test_welcome_delivery() {
        let config = config();
        let delivery = plan_delivery(GreetingKind::Welcome, Some(&config), &ctx(), guild(), |_, _| true).unwrap();

        assert_eq!(delivery.channel_id, serenity::ChannelId::new(CHANNEL));
        assert_eq!(delivery.message.content, "Welcome @Bob!");
        assert_eq!(delivery.message.embeds[0].title.as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_leave_needs_its_own_section() {
        let mut config = config();
        assert_eq!(plan_delivery(GreetingKind::Leave, Some(&config), &ctx(), guild(), |_, _| true), None);

        config.leave = Some(GreetingConfig {
            channel_id: CHANNEL.to_string(),
            message_content: "{user} left {server}".to_string(),
            ..Default::default()
        });
        let delivery = plan_delivery(GreetingKind::Leave, Some(&config), &ctx(), guild(), |_, _| true).unwrap();
        assert_eq!(delivery.message.content, "@Bob left Rust Club");
        assert_eq!(delivery.message.embeds[0].color.as_deref(), Some("#ff0000"));
    }
}
