// Shared responder for /welcome and /leave
// Permission gate, `test` and `reload` behaviour

use tracing::{error, info};

use crate::features::builders::{build_message, build_no_permission_message, build_reload_message, Source};
use crate::features::config_store::ConfigStore;
use crate::models::config::{GreetingKind, WelcomerConfig};
use crate::models::context::RenderContext;
use crate::models::payload::MessagePayload;
use crate::utils::permissions::{has_permissions, resolve_permissions, Capability, PermissionSet};
use crate::{Context, Error};

/// What a handler ends with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Silent,
    Reply(MessagePayload),
}

/// Whether the rest of a handler should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Handled(Outcome),
}

/// The only authorization check: `admin` is required for every subcommand
pub fn admin_gate(perms: &PermissionSet, source: Source) -> Flow {
    if has_permissions(Capability::Admin, perms) {
        Flow::Continue
    } else {
        Flow::Handled(Outcome::Reply(build_no_permission_message(Capability::Admin, source)))
    }
}

pub fn plan_test(
    kind: GreetingKind,
    perms: &PermissionSet,
    config: Option<&WelcomerConfig>,
    render_ctx: &RenderContext,
    invoker: &str,
    source: Source,
) -> Outcome {
    if let Flow::Handled(outcome) = admin_gate(perms, source) {
        return outcome;
    }
    let Some(section) = config.and_then(|c| kind.section(c)) else {
        return Outcome::Silent;
    };

    info!(
        "{} used {}-test! (user: {}, method: slash)",
        capitalize(invoker),
        kind.name(),
        invoker
    );
    Outcome::Reply(build_message(kind, section, render_ctx, source))
}

pub async fn plan_reload(
    kind: GreetingKind,
    perms: &PermissionSet,
    store: &ConfigStore,
    invoker: &str,
    source: Source,
) -> Outcome {
    if let Flow::Handled(outcome) = admin_gate(perms, source) {
        return outcome;
    }

    info!(
        "{} used {}-reload! (user: {}, method: slash)",
        capitalize(invoker),
        kind.name(),
        invoker
    );
    let success = match store.reload().await {
        Ok(()) => true,
        Err(e) => {
            error!("Reloading {} failed: {}", store.path().display(), e);
            false
        }
    };
    Outcome::Reply(build_reload_message(kind, success, source))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prefix invocations are ignored; only slash commands get a response
fn slash_only(ctx: Context<'_>) -> Option<Source> {
    match ctx {
        poise::Context::Application(_) => Some(Source::Slash),
        poise::Context::Prefix(_) => None,
    }
}

async fn finish(ctx: Context<'_>, outcome: Outcome) -> Result<(), Error> {
    if let Outcome::Reply(message) = outcome {
        ctx.send(message.into_reply()).await?;
    }
    Ok(())
}

async fn invoker_permissions(ctx: Context<'_>, config: Option<&WelcomerConfig>) -> PermissionSet {
    let admin_roles = config.map(|c| c.admin_roles.as_slice()).unwrap_or_default();
    resolve_permissions(ctx, admin_roles).await
}

/// `/<kind> test`
pub async fn respond_test(ctx: Context<'_>, kind: GreetingKind) -> Result<(), Error> {
    let Some(source) = slash_only(ctx) else {
        return Ok(());
    };

    let config = ctx.data().config.get().await;
    let perms = invoker_permissions(ctx, config.as_deref()).await;

    let Some(member) = ctx.author_member().await else {
        return Ok(());
    };
    let guild_name = ctx
        .guild_id()
        .and_then(|id| id.name(ctx.cache()))
        .unwrap_or_default();
    let render_ctx = RenderContext::from_member(&member, guild_name);

    let outcome = plan_test(kind, &perms, config.as_deref(), &render_ctx, &ctx.author().name, source);
    finish(ctx, outcome).await
}

/// `/<kind> reload`
pub async fn respond_reload(ctx: Context<'_>, kind: GreetingKind) -> Result<(), Error> {
    let Some(source) = slash_only(ctx) else {
        return Ok(());
    };

    let data = ctx.data();
    let config = data.config.get().await;
    let perms = invoker_permissions(ctx, config.as_deref()).await;

    let outcome = plan_reload(kind, &perms, &data.config, &ctx.author().name, source).await;
    finish(ctx, outcome).await
}
