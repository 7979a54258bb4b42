//! Startup data: the permission catalogue, the `admin` role and, optionally, an
//! administrator account. Safe to run against a store that already has them.

use super::Repositories;
use crate::config::AdminSeed;
use crate::model::{
    permission_name, Ability, Permission, PermissionCreate, PermissionId, Role, RoleCreate,
    RoleId, RoleUpdate, User, UserCreate, UserId, ADMIN_ROLE, SCOPES,
};
use resource_store::{Filter, FrameworkError};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    pub permissions_created: usize,
    pub admin_role: RoleId,
    pub admin_user: Option<UserId>,
}

async fn ensure_permission(
    repos: &Repositories,
    name: String,
) -> Result<(PermissionId, bool), FrameworkError> {
    let lookup = name.clone();
    if let Some(existing) = repos
        .permissions
        .find_one(Filter::new(move |p: &Permission| p.name == lookup))
        .await?
    {
        return Ok((existing.id, false));
    }
    let id = repos.permissions.create(PermissionCreate { name }).await?;
    Ok((id, true))
}

/// Creates every `admin_{ability}_{scope}` permission and grants all of them to the
/// `admin` role. With `admin` set, also creates that user holding the role.
#[instrument(skip_all)]
pub async fn seed_access_control(
    repos: &Repositories,
    admin: Option<&AdminSeed>,
) -> Result<SeedReport, FrameworkError> {
    let mut permission_ids = Vec::with_capacity(SCOPES.len() * Ability::ALL.len());
    let mut permissions_created = 0;
    for scope in SCOPES {
        for ability in Ability::ALL {
            let (id, created) = ensure_permission(repos, permission_name(ability, scope)).await?;
            permission_ids.push(id);
            permissions_created += usize::from(created);
        }
    }

    let existing_role = repos
        .roles
        .find_one(Filter::new(|r: &Role| r.name == ADMIN_ROLE))
        .await?;
    let admin_role = match existing_role {
        Some(role) => {
            repos
                .roles
                .update(
                    role.id,
                    RoleUpdate {
                        name: None,
                        permission_ids: Some(permission_ids),
                    },
                )
                .await?;
            role.id
        }
        None => {
            repos
                .roles
                .create(RoleCreate {
                    name: ADMIN_ROLE.to_string(),
                    permission_ids,
                })
                .await?
        }
    };

    let admin_user = match admin {
        Some(seed) => Some(ensure_admin(repos, seed, admin_role).await?),
        None => None,
    };

    info!(permissions_created, %admin_role, "Access control seeded");
    Ok(SeedReport {
        permissions_created,
        admin_role,
        admin_user,
    })
}

async fn ensure_admin(
    repos: &Repositories,
    seed: &AdminSeed,
    role: RoleId,
) -> Result<UserId, FrameworkError> {
    let users = repos.user_client();
    if let Some(user) = users
        .find_by_email(&seed.email)
        .await
        .map_err(FrameworkError::entity)?
    {
        return Ok(user.id);
    }

    let mut params = UserCreate::new("Administrator", seed.email.clone());
    params.role_ids = vec![role];
    params.api_token = Some(seed.token.clone());
    let id = repos.users.create(params).await?;
    info!(user = %id, "Administrator created");
    Ok(id)
}

/// True when `user` is granted `ability` on `scope` through any of its roles.
pub async fn has_permission(
    repos: &Repositories,
    user: &User,
    ability: Ability,
    scope: &str,
) -> Result<bool, FrameworkError> {
    let name = permission_name(ability, scope);
    let Some(permission) = repos
        .permissions
        .find_one(Filter::new(move |p: &Permission| p.name == name))
        .await?
    else {
        return Ok(false);
    };

    let role_ids = user.role_ids.clone();
    let granted = repos
        .roles
        .count(Filter::new(move |r: &Role| {
            role_ids.contains(&r.id) && r.permission_ids.contains(&permission.id)
        }))
        .await?;
    Ok(granted > 0)
}
