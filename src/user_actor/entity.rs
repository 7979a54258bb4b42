//! [`ActorEntity`] implementation for [`User`].

use super::UserError;
use crate::model::access::dedup_ids;
use crate::model::{normalize_email, Role, RoleId, User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use resource_store::{ActorEntity, NoAction, ResourceClient};

async fn check_roles(roles: &ResourceClient<Role>, ids: &[RoleId]) -> Result<(), UserError> {
    for id in ids {
        match roles.get(*id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Err(UserError::UnknownRole(*id)),
            Err(e) => return Err(UserError::Repository(e.to_string())),
        }
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ResourceClient<Role>;
    type Error = UserError;

    /// Generates the bearer token unless the payload carries one.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        let mut role_ids = params.role_ids;
        dedup_ids(&mut role_ids);
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            email: normalize_email(&params.email),
            api_token: params
                .api_token
                .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string()),
            role_ids,
        })
    }

    async fn on_create(&mut self, roles: &Self::Context) -> Result<(), UserError> {
        check_roles(roles, &self.role_ids).await
    }

    async fn on_update(&mut self, update: UserUpdate, roles: &Self::Context) -> Result<(), UserError> {
        if let Some(mut ids) = update.role_ids {
            dedup_ids(&mut ids);
            check_roles(roles, &ids).await?;
            self.role_ids = ids;
        }
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            self.email = normalize_email(&email);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &Self::Context) -> Result<(), UserError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_generated_and_email_normalized() {
        let user = User::from_create_params(UserId(1), UserCreate::new("Ada", " Ada@Example.COM ")).unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.api_token.len(), 32);

        let mut seeded = UserCreate::new("Root", "root@example.com");
        seeded.api_token = Some("fixed-token".into());
        let user = User::from_create_params(UserId(2), seeded).unwrap();
        assert_eq!(user.api_token, "fixed-token");
    }
}
