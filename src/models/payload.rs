// Rendered output - plain values handed to the send boundary

use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;

use crate::utils::config::parse_hex_color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorPayload {
    pub name: String,
    pub icon_url: Option<String>,
    pub url: Option<String>,
}

/// A fully rendered embed. Every builder stage takes one and returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedPayload {
    pub author: Option<AuthorPayload>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// `#rrggbb`, as configured or the kind's default
    pub color: Option<String>,
    pub footer: Option<String>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl EmbedPayload {
    pub fn into_create_embed(self) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::new();

        if let Some(author) = self.author {
            let mut create = serenity::CreateEmbedAuthor::new(author.name);
            if let Some(icon) = author.icon_url {
                create = create.icon_url(icon);
            }
            if let Some(url) = author.url {
                create = create.url(url);
            }
            embed = embed.author(create);
        }
        if let Some(title) = self.title {
            embed = embed.title(title);
        }
        if let Some(description) = self.description {
            embed = embed.description(description);
        }
        if let Some(color) = self.color.as_deref().and_then(parse_hex_color) {
            embed = embed.color(color);
        }
        if let Some(footer) = self.footer {
            embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
        }
        if let Some(thumbnail) = self.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }
        if let Some(image) = self.image {
            embed = embed.image(image);
        }
        if let Some(ts) = self.timestamp {
            if let Ok(ts) = serenity::Timestamp::from_unix_timestamp(ts.timestamp()) {
                embed = embed.timestamp(ts);
            }
        }

        embed
    }
}

/// A rendered message: content plus embeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePayload {
    pub content: String,
    pub embeds: Vec<EmbedPayload>,
    pub ephemeral: bool,
}

impl MessagePayload {
    pub fn text(content: impl Into<String>, ephemeral: bool) -> Self {
        Self {
            content: content.into(),
            embeds: Vec::new(),
            ephemeral,
        }
    }

    /// Reply to an interaction
    pub fn into_reply(self) -> poise::CreateReply {
        let mut reply = poise::CreateReply::default().ephemeral(self.ephemeral);
        if !self.content.is_empty() {
            reply = reply.content(self.content);
        }
        for embed in self.embeds {
            reply = reply.embed(embed.into_create_embed());
        }
        reply
    }

    /// Plain channel message (ephemeral has no meaning here)
    pub fn into_message(self) -> serenity::CreateMessage {
        let mut message = serenity::CreateMessage::new();
        if !self.content.is_empty() {
            message = message.content(self.content);
        }
        message.embeds(
            self.embeds
                .into_iter()
                .map(EmbedPayload::into_create_embed)
                .collect(),
        )
    }
}
