// Template rendering - `{user}` and `{server}` substitution

use crate::models::context::RenderContext;
use crate::utils::config::{SERVER_TOKEN, USER_ICON_KEYWORD, USER_TOKEN};

/// Replace every `{user}` with the member mention, then every `{server}` with the guild name
pub fn render(template: &str, ctx: &RenderContext) -> String {
    template
        .replace(USER_TOKEN, &ctx.mention)
        .replace(SERVER_TOKEN, &ctx.guild_name)
}

/// Only `{server}` - used where a mention would not display (titles, footers)
pub fn render_server(template: &str, ctx: &RenderContext) -> String {
    template.replace(SERVER_TOKEN, &ctx.guild_name)
}

/// Author names show the plain display name instead of a mention
pub fn render_author(template: &str, ctx: &RenderContext) -> String {
    template
        .replace(USER_TOKEN, &ctx.display_name)
        .replace(SERVER_TOKEN, &ctx.guild_name)
}

/// Resolve a thumbnail/icon style field.
/// `user-icon` (any case) -> avatar, `http...` -> as is, anything else -> omitted
pub fn resolve_url_field(raw: &str, ctx: &RenderContext) -> Option<String> {
    if raw.eq_ignore_ascii_case(USER_ICON_KEYWORD) {
        Some(ctx.avatar_url.clone())
    } else {
        http_only(raw)
    }
}

/// Pass through only values starting with `http`
pub fn http_only(raw: &str) -> Option<String> {
    raw.starts_with("http").then(|| raw.to_string())
}
