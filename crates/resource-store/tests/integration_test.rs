use async_trait::async_trait;
use resource_store::{ActorClient, ActorEntity, Filter, FrameworkError, ResourceActor, ResourceClient};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Listing {
    id: u32,
    title: String,
    published: bool,
}

#[derive(Debug)]
struct ListingCreate {
    title: String,
}

#[derive(Debug)]
struct ListingUpdate {
    title: Option<String>,
}

#[derive(Debug)]
enum ListingAction {
    Publish,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
enum ListingError {
    #[error("title required")]
    MissingTitle,
    #[error("published listings cannot be deleted")]
    Published,
    #[error("{0}")]
    Repository(String),
}

impl From<String> for ListingError {
    fn from(msg: String) -> Self {
        ListingError::Repository(msg)
    }
}

#[async_trait]
impl ActorEntity for Listing {
    type Id = u32;
    type Create = ListingCreate;
    type Update = ListingUpdate;
    type Action = ListingAction;
    type ActionResult = bool;
    type Context = ();
    type Error = ListingError;

    fn from_create_params(id: u32, params: ListingCreate) -> Result<Self, ListingError> {
        Ok(Self {
            id,
            title: params.title,
            published: false,
        })
    }

    async fn on_create(&mut self, _ctx: &()) -> Result<(), ListingError> {
        if self.title.trim().is_empty() {
            return Err(ListingError::MissingTitle);
        }
        Ok(())
    }

    async fn on_update(&mut self, update: ListingUpdate, _ctx: &()) -> Result<(), ListingError> {
        if let Some(title) = update.title {
            self.title = title;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), ListingError> {
        if self.published {
            return Err(ListingError::Published);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ListingAction, _ctx: &()) -> Result<bool, ListingError> {
        match action {
            ListingAction::Publish => {
                let changed = !self.published;
                self.published = true;
                Ok(changed)
            }
        }
    }
}

struct ListingClient {
    inner: ResourceClient<Listing>,
}

#[async_trait]
impl ActorClient<Listing> for ListingClient {
    type Error = ListingError;

    fn inner(&self) -> &ResourceClient<Listing> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> ListingError {
        e.entity_error::<ListingError>()
            .cloned()
            .unwrap_or_else(|| ListingError::Repository(e.to_string()))
    }
}

// --- Test ---

#[tokio::test]
async fn test_repository_full_lifecycle() {
    let (actor, client) = ResourceActor::<Listing>::new(10);
    let handle = tokio::spawn(actor.run(()));

    // 1. Create
    let id = client
        .create(ListingCreate {
            title: "Vintage lamp".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    // 2. Hook rejection keeps the table clean
    let rejected = client
        .create(ListingCreate { title: "  ".into() })
        .await
        .unwrap_err();
    assert_eq!(
        rejected.entity_error::<ListingError>(),
        Some(&ListingError::MissingTitle)
    );
    assert_eq!(client.list().await.unwrap().len(), 1);

    // 3. Action
    assert!(client.perform_action(id, ListingAction::Publish).await.unwrap());
    assert!(!client.perform_action(id, ListingAction::Publish).await.unwrap());

    // 4. Query
    let published = client
        .find(Filter::new(|l: &Listing| l.published))
        .await
        .unwrap();
    assert_eq!(published.len(), 1);

    // 5. Update
    let updated = client
        .update(
            id,
            ListingUpdate {
                title: Some("Brass lamp".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Brass lamp");

    // 6. on_delete veto
    let typed = ListingClient {
        inner: client.clone(),
    };
    assert_eq!(typed.delete(id).await, Err(ListingError::Published));
    assert!(typed.get(id).await.unwrap().is_some());

    // 7. Shutdown once every client is gone
    drop(typed);
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_closed_actor_reports_actor_closed() {
    let (actor, client) = ResourceActor::<Listing>::new(1);
    drop(actor);
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
}
