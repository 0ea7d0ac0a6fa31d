// Embed and message builders
// Each embed stage takes the payload built so far and returns the next one.

use chrono::{DateTime, Utc};

use crate::models::config::{EmbedConfig, GreetingConfig, GreetingKind};
use crate::models::context::RenderContext;
use crate::models::payload::{AuthorPayload, EmbedPayload, MessagePayload};
use crate::utils::config::parse_hex_color;
use crate::utils::permissions::Capability;
use crate::utils::template::{http_only, render, render_author, render_server, resolve_url_field};

/// Where a build was triggered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Slash command interaction - replies are ephemeral
    Slash,
    /// Automatic trigger (member events, prefix commands)
    Other,
}

struct StageInput<'a> {
    kind: GreetingKind,
    embed: &'a EmbedConfig,
    ctx: &'a RenderContext,
    now: DateTime<Utc>,
}

type Stage = fn(EmbedPayload, &StageInput<'_>) -> EmbedPayload;

const EMBED_STAGES: [Stage; 8] = [
    author_stage,
    title_stage,
    description_stage,
    color_stage,
    footer_stage,
    thumbnail_stage,
    image_stage,
    timestamp_stage,
];

fn author_stage(payload: EmbedPayload, input: &StageInput<'_>) -> EmbedPayload {
    let author = &input.embed.author;
    let name = render_author(&author.name, input.ctx);
    if name.trim().is_empty() {
        return payload;
    }
    EmbedPayload {
        author: Some(AuthorPayload {
            name,
            icon_url: resolve_url_field(&author.icon, input.ctx),
            url: http_only(&author.url),
        }),
        ..payload
    }
}

fn title_stage(payload: EmbedPayload, input: &StageInput<'_>) -> EmbedPayload {
    let raw = input.embed.title.as_str();
    let title = if raw.trim().is_empty() { input.kind.default_title() } else { raw };
    EmbedPayload {
        title: Some(render_server(title, input.ctx)),
        ..payload
    }
}

fn description_stage(payload: EmbedPayload, input: &StageInput<'_>) -> EmbedPayload {
    let description = render(&input.embed.description, input.ctx);
    EmbedPayload {
        description: (!description.is_empty()).then_some(description),
        ..payload
    }
}

fn color_stage(payload: EmbedPayload, input: &StageInput<'_>) -> EmbedPayload {
    let raw = input.embed.color.trim();
    let color = if parse_hex_color(raw).is_some() { raw } else { input.kind.default_color() };
    EmbedPayload {
        color: Some(color.to_string()),
        ..payload
    }
}

fn footer_stage(payload: EmbedPayload, input: &StageInput<'_>) -> EmbedPayload {
    if input.embed.footer.is_empty() {
        return payload;
    }
    EmbedPayload {
        footer: Some(render_server(&input.embed.footer, input.ctx)),
        ..payload
    }
}

fn thumbnail_stage(payload: EmbedPayload, input: &StageInput<'_>) -> EmbedPayload {
    EmbedPayload {
        thumbnail: resolve_url_field(&input.embed.thumbnail, input.ctx),
        ..payload
    }
}

// no user-icon shortcut here
fn image_stage(payload: EmbedPayload, input: &StageInput<'_>) -> EmbedPayload {
    EmbedPayload {
        image: http_only(&input.embed.image),
        ..payload
    }
}

fn timestamp_stage(payload: EmbedPayload, input: &StageInput<'_>) -> EmbedPayload {
    EmbedPayload {
        timestamp: input.embed.timestamp.then_some(input.now),
        ..payload
    }
}

/// Render the embed for a welcome or leave section
pub fn build_embed(kind: GreetingKind, section: &GreetingConfig, ctx: &RenderContext) -> EmbedPayload {
    build_embed_at(kind, section, ctx, Utc::now())
}

fn build_embed_at(
    kind: GreetingKind,
    section: &GreetingConfig,
    ctx: &RenderContext,
    now: DateTime<Utc>,
) -> EmbedPayload {
    let input = StageInput { kind, embed: &section.embed, ctx, now };
    EMBED_STAGES
        .iter()
        .fold(EmbedPayload::default(), |payload, stage| stage(payload, &input))
}

/// Message for the `test` subcommand.
/// `testTitle` and `messageContent` are joined as is, without a separator.
pub fn build_message(
    kind: GreetingKind,
    section: &GreetingConfig,
    ctx: &RenderContext,
    source: Source,
) -> MessagePayload {
    let content = format!("{}{}", section.test_title, section.message_content);
    MessagePayload {
        content: render(&content, ctx),
        embeds: vec![build_embed(kind, section, ctx)],
        ephemeral: source == Source::Slash,
    }
}

/// Message sent to the configured channel when a member joins or leaves
pub fn build_event_message(kind: GreetingKind, section: &GreetingConfig, ctx: &RenderContext) -> MessagePayload {
    MessagePayload {
        content: render(&section.message_content, ctx),
        embeds: vec![build_embed(kind, section, ctx)],
        ephemeral: false,
    }
}

pub fn build_reload_message(kind: GreetingKind, success: bool, source: Source) -> MessagePayload {
    let content = if success {
        format!("✅ **ESE-Welcomer {} configuration successfully reloaded!**", kind.name())
    } else {
        format!(
            "❌ **An error occurred while reloading the {} configuration.** Check the console.",
            kind.name()
        )
    };
    MessagePayload::text(content, source == Source::Slash)
}

pub fn build_no_permission_message(required: Capability, source: Source) -> MessagePayload {
    MessagePayload::text(
        format!("❌ You need the **{}** permission to use this command.", required.label()),
        source == Source::Slash,
    )
}
