// Render context - who and where a greeting is rendered for

use poise::serenity_prelude as serenity;
use serenity::Mentionable;

use crate::utils::config::AVATAR_SIZE;

/// Per-event data needed to render templates. Built fresh for every event.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Mention-style reference, e.g. `<@123>`
    pub mention: String,
    /// Nickname, global name or username, in that order
    pub display_name: String,
    /// Avatar URL at the `user-icon` size
    pub avatar_url: String,
    pub guild_name: String,
}

impl RenderContext {
    pub fn from_member(member: &serenity::Member, guild_name: impl Into<String>) -> Self {
        Self {
            mention: member.mention().to_string(),
            display_name: member.display_name().to_string(),
            avatar_url: sized_avatar_url(&member.user, AVATAR_SIZE),
            guild_name: guild_name.into(),
        }
    }

    /// For leave events, where the member record may already be gone from the cache
    pub fn from_user(
        user: &serenity::User,
        member: Option<&serenity::Member>,
        guild_name: impl Into<String>,
    ) -> Self {
        match member {
            Some(member) => Self::from_member(member, guild_name),
            None => Self {
                mention: user.mention().to_string(),
                display_name: user.display_name().to_string(),
                avatar_url: sized_avatar_url(user, AVATAR_SIZE),
                guild_name: guild_name.into(),
            },
        }
    }
}

/// Avatar (or default avatar) URL with the size query replaced
pub fn sized_avatar_url(user: &serenity::User, size: u16) -> String {
    with_size(&user.face(), size)
}

fn with_size(url: &str, size: u16) -> String {
    let base = url.split('?').next().unwrap_or(url);
    format!("{}?size={}", base, size)
}
