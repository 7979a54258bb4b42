use crate::model::{normalize_email, User, UserCreate, UserId};
use crate::user_actor::UserError;
use async_trait::async_trait;
use resource_store::{ActorClient, Filter, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Resolves a bearer token to its user.
    #[instrument(skip_all)]
    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>, UserError> {
        let token = token.to_string();
        self.inner
            .find_one(Filter::new(move |u: &User| u.api_token == token))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let email = normalize_email(email);
        self.inner
            .find_one(Filter::new(move |u: &User| u.email == email))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.entity_error::<UserError>()
            .cloned()
            .unwrap_or_else(|| UserError::Repository(e.to_string()))
    }
}
