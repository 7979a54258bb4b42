//! # Mock Repositories & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered
//! from a queue of expectations instead of a table. Services under test cannot tell the
//! difference, which makes repository failures trivial to inject.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, answers are scripted | Real table |
//! | **Error Injection** | `return_err(...)` | Needs a specific state |
//! | **Use Case** | Service contracts (404/422/500 mapping) | Business rules, full flows |
//!
//! ## Example: simulating a repository failure
//!
//! ```rust
//! use resource_store::mock::MockClient;
//! use resource_store::{ActorEntity, FrameworkError, NoAction};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Banner { id: u32 }
//! #[derive(Debug)] struct BannerCreate;
//! #[derive(Debug)] struct BannerUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("banner error")] struct BannerError;
//!
//! #[async_trait]
//! impl ActorEntity for Banner {
//!     type Id = u32; type Create = BannerCreate; type Update = BannerUpdate;
//!     type Action = NoAction; type ActionResult = (); type Context = (); type Error = BannerError;
//!     fn from_create_params(id: u32, _: BannerCreate) -> Result<Self, BannerError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: BannerUpdate, _: &()) -> Result<(), BannerError> { Ok(()) }
//!     async fn handle_action(&mut self, a: NoAction, _: &()) -> Result<(), BannerError> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockClient::<Banner>::new();
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! Unexpected requests are answered with `ActorDropped` and recorded; [`MockClient::verify`]
//! panics listing them together with any expectation that was never consumed.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// A scripted answer for one request.
enum Expectation<T: ActorEntity> {
    Create(Result<T::Id, FrameworkError>),
    CreateIfBelow(Result<T::Id, FrameworkError>),
    Get(T::Id, Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Find(Result<Vec<T>, FrameworkError>),
    Count(Result<usize, FrameworkError>),
    Update(T::Id, Result<T, FrameworkError>),
    Delete(T::Id, Result<(), FrameworkError>),
    Action(T::Id, Result<T::ActionResult, FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Create(_) => "Create",
            Expectation::CreateIfBelow(_) => "CreateIfBelow",
            Expectation::Get(..) => "Get",
            Expectation::List(_) => "List",
            Expectation::Find(_) => "Find",
            Expectation::Count(_) => "Count",
            Expectation::Update(..) => "Update",
            Expectation::Delete(..) => "Delete",
            Expectation::Action(..) => "Action",
        }
    }
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

fn lock<T: ActorEntity>(state: &Shared<T>) -> MutexGuard<'_, MockState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock repository with ordered expectations.
///
/// ```ignore
/// let mock = MockClient::<Product>::new();
/// mock.expect_get(ProductId(1)).return_ok(Some(product));
/// mock.expect_create().return_err(FrameworkError::ActorClosed);
///
/// let client = mock.client();
/// // exercise the code under test...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: Shared<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&task_state).expectations.pop_front();
                answer(&task_state, request, expectation);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&self) -> Expect<T, T::Id> {
        Expect::new(&self.state, Expectation::Create)
    }

    pub fn expect_create_if_below(&self) -> Expect<T, T::Id> {
        Expect::new(&self.state, Expectation::CreateIfBelow)
    }

    pub fn expect_get(&self, id: T::Id) -> Expect<T, Option<T>> {
        Expect::new(&self.state, move |r| Expectation::Get(id, r))
    }

    pub fn expect_list(&self) -> Expect<T, Vec<T>> {
        Expect::new(&self.state, Expectation::List)
    }

    pub fn expect_find(&self) -> Expect<T, Vec<T>> {
        Expect::new(&self.state, Expectation::Find)
    }

    pub fn expect_count(&self) -> Expect<T, usize> {
        Expect::new(&self.state, Expectation::Count)
    }

    pub fn expect_update(&self, id: T::Id) -> Expect<T, T> {
        Expect::new(&self.state, move |r| Expectation::Update(id, r))
    }

    pub fn expect_delete(&self, id: T::Id) -> Expect<T, ()> {
        Expect::new(&self.state, move |r| Expectation::Delete(id, r))
    }

    pub fn expect_action(&self, id: T::Id) -> Expect<T, T::ActionResult> {
        Expect::new(&self.state, move |r| Expectation::Action(id, r))
    }

    /// Panics if a request did not match its expectation or an expectation is unused.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.failures.is_empty() {
            panic!("Unexpected requests: {}", state.failures.join("; "));
        }
        if !state.expectations.is_empty() {
            let pending: Vec<_> = state.expectations.iter().map(|e| e.kind()).collect();
            panic!(
                "Not all expectations were met. {} remaining: {}",
                pending.len(),
                pending.join(", ")
            );
        }
    }
}

/// Sends the scripted answer. Mismatches are recorded before the reply goes out, so a
/// test calling `verify()` right after the request sees them.
fn answer<T: ActorEntity>(
    state: &Shared<T>,
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) {
    let record = |kind: &str, got: &T::Id, want: &T::Id| {
        if got != want {
            lock(state)
                .failures
                .push(format!("{kind} for {got}, expected {want}"));
        }
    };

    match (request, expectation) {
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
            let _ = respond_to.send(r);
        }
        (
            ResourceRequest::CreateIfBelow { respond_to, .. },
            Some(Expectation::CreateIfBelow(r)),
        ) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get(want, r))) => {
            record("Get", &id, &want);
            let _ = respond_to.send(r);
        }
        (ResourceRequest::List { respond_to }, Some(Expectation::List(r))) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Find { respond_to, .. }, Some(Expectation::Find(r))) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Count { respond_to, .. }, Some(Expectation::Count(r))) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update(want, r))) => {
            record("Update", &id, &want);
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete(want, r))) => {
            record("Delete", &id, &want);
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action(want, r))) => {
            record("Action", &id, &want);
            let _ = respond_to.send(r);
        }
        (request, expectation) => {
            let expected = expectation.as_ref().map_or("nothing", |e| e.kind());
            lock(state)
                .failures
                .push(format!("{} while expecting {}", request.kind(), expected));
            // dropping the request closes its reply channel: the caller sees ActorDropped
            drop(request);
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct Expect<T: ActorEntity, R> {
    state: Shared<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    _result: PhantomData<R>,
}

impl<T: ActorEntity, R> Expect<T, R> {
    fn new(
        state: &Shared<T>,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            state: state.clone(),
            make: Box::new(make),
            _result: PhantomData,
        }
    }

    /// Answer the request successfully.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer the request with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        lock(&self.state).expectations.push_back(expectation);
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and the raw receiving end of its channel.
///
/// The test plays the actor: it receives each request, asserts on its payload and
/// answers through the enclosed oneshot sender. Use this when the payload itself
/// (e.g. the exact action sent) is what needs checking.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Create,
    tokio::sync::oneshot::Sender<Result<T::Id, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
