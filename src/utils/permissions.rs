// Permission resolution - who may run the admin subcommands

use std::collections::HashSet;

use poise::serenity_prelude as serenity;

use crate::Context;

/// Capabilities the plugin checks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Admin,
}

impl Capability {
    pub fn label(self) -> &'static str {
        match self {
            Capability::Admin => "admin",
        }
    }
}

/// Effective capabilities of one user in one guild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    capabilities: HashSet<Capability>,
}

impl PermissionSet {
    pub fn with(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }
}

/// Compute the capabilities for a member.
/// The guild owner, ADMINISTRATOR and configured admin roles all grant admin.
pub fn get_permissions(
    user_id: serenity::UserId,
    owner_id: Option<serenity::UserId>,
    granted: serenity::Permissions,
    roles: &[serenity::RoleId],
    admin_roles: &[String],
) -> PermissionSet {
    let mut set = PermissionSet::default();

    if owner_id == Some(user_id) {
        set = set.with(Capability::Admin);
    }
    if granted.administrator() {
        set = set.with(Capability::Admin);
    }
    if roles
        .iter()
        .any(|role| admin_roles.iter().any(|id| id.trim() == role.to_string()))
    {
        set = set.with(Capability::Admin);
    }

    set
}

pub fn has_permissions(capability: Capability, set: &PermissionSet) -> bool {
    set.capabilities.contains(&capability)
}

/// Resolve the invoking member's capabilities from the command context
pub async fn resolve_permissions(ctx: Context<'_>, admin_roles: &[String]) -> PermissionSet {
    let owner_id = ctx.guild().map(|guild| guild.owner_id);
    let Some(member) = ctx.author_member().await else {
        return PermissionSet::default();
    };

    get_permissions(
        member.user.id,
        owner_id,
        member.permissions.unwrap_or_else(serenity::Permissions::empty),
        &member.roles,
        admin_roles,
    )
}
