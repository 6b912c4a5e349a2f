use super::THING_ID_PARAM;
use crate::repository::ThingRepository;
use crate::response::{respond, store_fault};
use crate::validation::is_valid_thing_id;
use http::StatusCode;
use things_core::{ApiEvent, ApiResponse, HandlerError, InvocationContext, Thing, ThingError};
use things_middleware::{BoxFuture, Handler};

const OPERATION: &str = "get";

/// `GET /things` and `GET /things/{thingId}`.
///
/// Without an identifier every Thing is listed, newest first; an empty
/// store is an empty list. With one, that Thing is fetched.
#[derive(Debug, Clone)]
pub struct GetThing {
    repository: ThingRepository,
}

impl GetThing {
    /// Creates the handler.
    pub fn new(repository: ThingRepository) -> Self {
        Self { repository }
    }

    async fn get(&self, id: &str) -> Result<Thing, ThingError> {
        if !is_valid_thing_id(id) {
            return Err(ThingError::invalid_id(id));
        }

        self.repository
            .find(id)
            .await
            .map_err(|e| store_fault(OPERATION, e))?
            .ok_or_else(|| ThingError::not_found(id))
    }

    async fn list(&self) -> Result<Vec<Thing>, ThingError> {
        self.repository.list().await.map_err(|e| store_fault(OPERATION, e))
    }
}

impl Handler for GetThing {
    fn call<'a>(
        &'a self,
        event: &'a ApiEvent,
        _ctx: &'a InvocationContext,
    ) -> BoxFuture<'a, Result<ApiResponse, HandlerError>> {
        Box::pin(async move {
            match event.path_parameter(THING_ID_PARAM) {
                Some(id) => respond(StatusCode::OK, self.get(id).await),
                None => respond(StatusCode::OK, self.list().await),
            }
        })
    }
}
