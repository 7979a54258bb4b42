use super::{related, Resource, UserSummary};
use crate::lifecycle::Repositories;
use crate::model::{Address, AddressDetails, AddressId, UserId};
use crate::state::AppState;
use async_trait::async_trait;
use resource_store::ResourceClient;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AddressResource {
    pub id: AddressId,
    pub user_id: UserId,
    #[serde(flatten)]
    pub details: AddressDetails,
}

/// Single address with its owner.
#[derive(Debug, Clone, Serialize)]
pub struct AddressShowResource {
    #[serde(flatten)]
    pub address: AddressResource,
    pub user: Option<UserSummary>,
}

impl From<&Address> for AddressResource {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id,
            user_id: address.user_id,
            details: address.details.clone(),
        }
    }
}

#[async_trait]
impl Resource for Address {
    const LABEL: &'static str = "Address";
    const SCOPE: &'static str = "addresses";
    type IndexView = AddressResource;
    type ShowView = AddressShowResource;

    fn repository(repos: &Repositories) -> &ResourceClient<Self> {
        &repos.addresses
    }

    async fn index_view(&self, _state: &AppState) -> AddressResource {
        AddressResource::from(self)
    }

    async fn show_view(&self, state: &AppState) -> AddressShowResource {
        let user = related(&state.repos.users, self.user_id).await;
        AddressShowResource {
            address: AddressResource::from(self),
            user: user.as_ref().map(UserSummary::from),
        }
    }
}
