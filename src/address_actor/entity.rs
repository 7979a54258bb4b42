use super::AddressError;
use crate::clients::UserClient;
use crate::model::{Address, AddressCreate, AddressId, AddressUpdate};
use async_trait::async_trait;
use resource_store::{ActorClient, ActorEntity, NoAction};

#[async_trait]
impl ActorEntity for Address {
    type Id = AddressId;
    type Create = AddressCreate;
    type Update = AddressUpdate;
    type Action = NoAction;
    type ActionResult = ();
    type Context = UserClient;
    type Error = AddressError;

    fn from_create_params(id: AddressId, params: AddressCreate) -> Result<Self, AddressError> {
        Ok(Self {
            id,
            user_id: params.user_id,
            details: params.details,
        })
    }

    /// The owner must exist.
    async fn on_create(&mut self, users: &UserClient) -> Result<(), AddressError> {
        match users.get(self.user_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(AddressError::UnknownUser(self.user_id)),
            Err(e) => Err(AddressError::Repository(e.to_string())),
        }
    }

    async fn on_update(&mut self, update: AddressUpdate, _users: &UserClient) -> Result<(), AddressError> {
        self.details.apply(update);
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _users: &UserClient) -> Result<(), AddressError> {
        match action {}
    }
}
