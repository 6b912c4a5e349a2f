//! Wiring of the handlers into pipelines.

use crate::handlers::{CreateThing, DeleteThing, GetThing, UpdateThing};
use crate::repository::ThingRepository;
use std::sync::Arc;
use things_core::{ActorId, ApiEvent, ApiResponse, InvocationContext};
use things_middleware::{stages, InvocationFailure, Pipeline};
use things_store::{DatabaseTarget, StatementExecutor};

/// The four operations of the Things API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create a Thing.
    Create,
    /// Fetch one Thing or list all of them.
    Get,
    /// Update a Thing.
    Update,
    /// Delete a Thing.
    Delete,
}

impl Operation {
    /// Every operation.
    pub const ALL: [Self; 4] = [Self::Create, Self::Get, Self::Update, Self::Delete];

    /// Returns the function name reported in invocation contexts and logs.
    #[must_use]
    pub const fn function_name(self) -> &'static str {
        match self {
            Self::Create => "create-thing",
            Self::Get => "get-thing",
            Self::Update => "update-thing",
            Self::Delete => "delete-thing",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.function_name())
    }
}

/// Every handler wrapped with the standard pipeline, sharing one executor.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use things_core::ActorId;
/// use things_service::{Operation, ThingsApi};
/// use things_store::{mock::MockExecutor, DatabaseTarget};
///
/// let api = ThingsApi::new(Arc::new(MockExecutor::new()), DatabaseTarget::default(), ActorId::placeholder());
/// assert_eq!(api.pipeline(Operation::Get).interceptor_name(), Some("error_handler"));
/// ```
#[derive(Debug)]
pub struct ThingsApi {
    create: Pipeline,
    get: Pipeline,
    update: Pipeline,
    delete: Pipeline,
}

impl ThingsApi {
    /// Builds the pipelines.
    pub fn new(executor: Arc<dyn StatementExecutor>, target: DatabaseTarget, actor: ActorId) -> Self {
        let repository = ThingRepository::new(executor, target);

        Self {
            create: stages::standard(CreateThing::new(repository.clone(), actor.clone())),
            get: stages::standard(GetThing::new(repository.clone())),
            update: stages::standard(UpdateThing::new(repository.clone(), actor)),
            delete: stages::standard(DeleteThing::new(repository)),
        }
    }

    /// Returns the pipeline for `operation`.
    #[must_use]
    pub fn pipeline(&self, operation: Operation) -> &Pipeline {
        match operation {
            Operation::Create => &self.create,
            Operation::Get => &self.get,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }

    /// Runs `event` through the pipeline for `operation`.
    ///
    /// The invocation carries the event's request id when it is a UUID and
    /// a fresh one otherwise.
    pub async fn invoke(&self, operation: Operation, event: ApiEvent) -> Result<ApiResponse, InvocationFailure> {
        let invocation = invocation_for(operation, &event);
        self.pipeline(operation).invoke(event, invocation).await
    }
}

fn invocation_for(operation: Operation, event: &ApiEvent) -> InvocationContext {
    let invocation = InvocationContext::new(operation.function_name());
    match event.request_id() {
        Some(request_id) => invocation.with_request_id(request_id),
        None => invocation,
    }
}
