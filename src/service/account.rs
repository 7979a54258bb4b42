use super::crud::UNEXPECTED;
use crate::model::{Address, AddressCreate, AddressDetails, User, UserCreate};
use crate::resource::{AddressResource, Resource, UserResource};
use crate::response::{ApiError, ApiResult, Reply};
use crate::state::AppState;
use crate::validation::Validate;
use resource_store::Filter;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};

/// Body of `POST /api/register`. Roles cannot be chosen here.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
}

/// Self-service endpoints for the authenticated customer.
#[derive(Clone)]
pub struct AccountService {
    state: AppState,
}

impl AccountService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Creates a customer account and returns its bearer token, the only time it is shown.
    #[instrument(skip(self, registration))]
    pub async fn register(&self, registration: Registration) -> ApiResult {
        let params = UserCreate::new(registration.name, registration.email);
        params.validate()?;
        User::check_create(&params, &self.state).await?;

        let users = &self.state.repos.users;
        let id = users.create(params).await.map_err(|e| {
            error!(error = %e, "Registration failed");
            ApiError::internal("Failed to create User.")
        })?;
        let user = users
            .get(id)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                error!(user = %id, "Registered user could not be read back");
                ApiError::internal(UNEXPECTED)
            })?;
        info!(user = %id, "Registered");

        let mut reply = Reply::created(
            "User created successfully.",
            UserResource::render(&user, &self.state.repos).await,
        );
        reply.body["access_token"] = json!(user.api_token);
        Ok(reply)
    }

    pub async fn me(&self, user: &User) -> ApiResult {
        Ok(Reply::ok(UserResource::render(user, &self.state.repos).await))
    }

    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn my_addresses(&self, user: &User) -> ApiResult {
        let user_id = user.id;
        let addresses = self
            .state
            .repos
            .addresses
            .find(Filter::new(move |a: &Address| a.belongs_to(user_id)))
            .await
            .map_err(|e| {
                error!(error = %e, "Listing addresses failed");
                ApiError::internal(UNEXPECTED)
            })?;
        let views: Vec<_> = addresses.iter().map(AddressResource::from).collect();
        Ok(Reply::ok(views))
    }

    #[instrument(skip(self, user, details), fields(user = %user.id))]
    pub async fn add_address(&self, user: &User, details: AddressDetails) -> ApiResult {
        let params = AddressCreate {
            user_id: user.id,
            details,
        };
        params.validate()?;

        let addresses = &self.state.repos.addresses;
        let id = addresses.create(params).await.map_err(|e| {
            error!(error = %e, "Creating address failed");
            ApiError::internal("Failed to create Address.")
        })?;
        match addresses.get(id).await {
            Ok(Some(address)) => Ok(Reply::created(
                "Address created successfully.",
                AddressResource::from(&address),
            )),
            _ => Err(ApiError::internal(UNEXPECTED)),
        }
    }
}
