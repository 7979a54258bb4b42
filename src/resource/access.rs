use super::{ensure_unique, related_many, Resource};
use crate::lifecycle::Repositories;
use crate::model::{normalize_email, Permission, PermissionId, Role, RoleId, User, UserId};
use crate::response::ApiError;
use crate::state::AppState;
use async_trait::async_trait;
use resource_store::{Filter, ResourceClient};
use serde::Serialize;

/// A user as shown to admins and to the user itself. The token is never included.
#[derive(Debug, Clone, Serialize)]
pub struct UserResource {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// Just enough of a user to label something they own.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleResource {
    pub id: RoleId,
    pub name: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissionResource {
    pub id: PermissionId,
    pub name: String,
}

impl UserResource {
    pub async fn render(user: &User, repos: &Repositories) -> Self {
        let role_ids = user.role_ids.clone();
        let roles = related_many(&repos.roles, Filter::new(move |r: &Role| role_ids.contains(&r.id)))
            .await
            .into_iter()
            .map(|r| r.name)
            .collect();
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            roles,
        }
    }
}

#[async_trait]
impl Resource for User {
    const LABEL: &'static str = "User";
    const SCOPE: &'static str = "users";
    type IndexView = UserResource;
    type ShowView = UserResource;

    fn repository(repos: &Repositories) -> &ResourceClient<Self> {
        &repos.users
    }

    async fn index_view(&self, state: &AppState) -> UserResource {
        UserResource::render(self, &state.repos).await
    }

    async fn show_view(&self, state: &AppState) -> UserResource {
        UserResource::render(self, &state.repos).await
    }

    async fn check_create(payload: &Self::Create, state: &AppState) -> Result<(), ApiError> {
        let email = normalize_email(&payload.email);
        ensure_unique(&state.repos.users, Filter::new(move |u: &User| u.email == email), "email").await
    }

    async fn check_update(id: &UserId, payload: &Self::Update, state: &AppState) -> Result<(), ApiError> {
        let Some(email) = payload.email.as_deref().map(normalize_email) else {
            return Ok(());
        };
        let id = *id;
        ensure_unique(
            &state.repos.users,
            Filter::new(move |u: &User| u.email == email && u.id != id),
            "email",
        )
        .await
    }
}

#[async_trait]
impl Resource for Role {
    const LABEL: &'static str = "Role";
    const SCOPE: &'static str = "roles";
    type IndexView = RoleResource;
    type ShowView = RoleResource;

    fn repository(repos: &Repositories) -> &ResourceClient<Self> {
        &repos.roles
    }

    async fn index_view(&self, state: &AppState) -> RoleResource {
        let ids = self.permission_ids.clone();
        let permissions = related_many(
            &state.repos.permissions,
            Filter::new(move |p: &Permission| ids.contains(&p.id)),
        )
        .await
        .into_iter()
        .map(|p| p.name)
        .collect();
        RoleResource {
            id: self.id,
            name: self.name.clone(),
            permissions,
        }
    }

    async fn show_view(&self, state: &AppState) -> RoleResource {
        self.index_view(state).await
    }

    async fn check_create(payload: &Self::Create, state: &AppState) -> Result<(), ApiError> {
        let name = payload.name.trim().to_string();
        ensure_unique(&state.repos.roles, Filter::new(move |r: &Role| r.name == name), "name").await
    }

    async fn check_update(id: &RoleId, payload: &Self::Update, state: &AppState) -> Result<(), ApiError> {
        let Some(name) = payload.name.as_deref().map(|n| n.trim().to_string()) else {
            return Ok(());
        };
        let id = *id;
        ensure_unique(
            &state.repos.roles,
            Filter::new(move |r: &Role| r.name == name && r.id != id),
            "name",
        )
        .await
    }
}

#[async_trait]
impl Resource for Permission {
    const LABEL: &'static str = "Permission";
    const SCOPE: &'static str = "permissions";
    type IndexView = PermissionResource;
    type ShowView = PermissionResource;

    fn repository(repos: &Repositories) -> &ResourceClient<Self> {
        &repos.permissions
    }

    async fn index_view(&self, _state: &AppState) -> PermissionResource {
        PermissionResource {
            id: self.id,
            name: self.name.clone(),
        }
    }

    async fn show_view(&self, state: &AppState) -> PermissionResource {
        self.index_view(state).await
    }

    async fn check_create(payload: &Self::Create, state: &AppState) -> Result<(), ApiError> {
        let name = payload.name.trim().to_string();
        ensure_unique(
            &state.repos.permissions,
            Filter::new(move |p: &Permission| p.name == name),
            "name",
        )
        .await
    }
}
