//! [`ActorEntity`] implementations for [`Permission`] and [`Role`].

use super::AccessError;
use crate::model::access::dedup_ids;
use crate::model::{
    Permission, PermissionCreate, PermissionId, PermissionUpdate, Role, RoleCreate, RoleId,
    RoleUpdate,
};
use async_trait::async_trait;
use resource_store::{ActorEntity, NoAction, ResourceClient};

#[async_trait]
impl ActorEntity for Permission {
    type Id = PermissionId;
    type Create = PermissionCreate;
    type Update = PermissionUpdate;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ();
    type Error = AccessError;

    fn from_create_params(id: PermissionId, params: PermissionCreate) -> Result<Self, AccessError> {
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
        })
    }

    async fn on_update(&mut self, update: PermissionUpdate, _ctx: &()) -> Result<(), AccessError> {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &()) -> Result<(), AccessError> {
        match action {}
    }
}

/// Every id must name a stored permission.
async fn check_permissions(
    permissions: &ResourceClient<Permission>,
    ids: &[PermissionId],
) -> Result<(), AccessError> {
    for id in ids {
        let found = permissions
            .get(*id)
            .await
            .map_err(|e| AccessError::Repository(e.to_string()))?;
        if found.is_none() {
            return Err(AccessError::UnknownPermission(*id));
        }
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Role {
    type Id = RoleId;
    type Create = RoleCreate;
    type Update = RoleUpdate;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ResourceClient<Permission>;
    type Error = AccessError;

    fn from_create_params(id: RoleId, params: RoleCreate) -> Result<Self, AccessError> {
        let mut permission_ids = params.permission_ids;
        dedup_ids(&mut permission_ids);
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            permission_ids,
        })
    }

    async fn on_create(&mut self, permissions: &Self::Context) -> Result<(), AccessError> {
        check_permissions(permissions, &self.permission_ids).await
    }

    async fn on_update(&mut self, update: RoleUpdate, permissions: &Self::Context) -> Result<(), AccessError> {
        if let Some(mut ids) = update.permission_ids {
            dedup_ids(&mut ids);
            check_permissions(permissions, &ids).await?;
            self.permission_ids = ids;
        }
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &Self::Context) -> Result<(), AccessError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_store::ResourceActor;

    #[tokio::test]
    async fn test_role_rejects_unknown_permission() {
        let (permission_actor, permissions) = ResourceActor::<Permission>::new(8);
        let (role_actor, roles) = ResourceActor::<Role>::new(8);
        tokio::spawn(permission_actor.run(()));
        tokio::spawn(role_actor.run(permissions.clone()));

        let view = permissions
            .create(PermissionCreate {
                name: "admin_view_orders".into(),
            })
            .await
            .unwrap();

        let err = roles
            .create(RoleCreate {
                name: "clerk".into(),
                permission_ids: vec![view, PermissionId(99)],
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.entity_error::<AccessError>(),
            Some(&AccessError::UnknownPermission(PermissionId(99)))
        );

        let id = roles
            .create(RoleCreate {
                name: "clerk".into(),
                permission_ids: vec![view, view],
            })
            .await
            .unwrap();
        let role = roles.get(id).await.unwrap().unwrap();
        assert_eq!(role.permission_ids, vec![view]);
    }
}
