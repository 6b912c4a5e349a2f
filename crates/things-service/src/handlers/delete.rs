use super::THING_ID_PARAM;
use crate::repository::ThingRepository;
use crate::response::{respond, store_fault};
use crate::validation::require_thing_id;
use http::StatusCode;
use things_core::{ApiEvent, ApiResponse, DeleteResult, HandlerError, InvocationContext, ThingError};
use things_middleware::{BoxFuture, Handler};
use things_telemetry::logging::fields;
use tracing::info;

const OPERATION: &str = "delete";

/// `DELETE /things/{thingId}`.
///
/// Existence is checked with a separate read before the delete is issued.
/// The two statements are not in one transaction.
#[derive(Debug, Clone)]
pub struct DeleteThing {
    repository: ThingRepository,
}

impl DeleteThing {
    /// Creates the handler.
    pub fn new(repository: ThingRepository) -> Self {
        Self { repository }
    }

    async fn delete(&self, event: &ApiEvent) -> Result<DeleteResult, ThingError> {
        let id = require_thing_id(event.path_parameter(THING_ID_PARAM))?;

        let exists = self
            .repository
            .exists(id)
            .await
            .map_err(|e| store_fault(OPERATION, e))?;
        if !exists {
            return Err(ThingError::not_found(id));
        }

        self.repository
            .delete(id)
            .await
            .map_err(|e| store_fault(OPERATION, e))?;

        info!({ fields::OPERATION } = OPERATION, { fields::THING_ID } = id, "Thing deleted");
        Ok(DeleteResult::new(id))
    }
}

impl Handler for DeleteThing {
    fn call<'a>(
        &'a self,
        event: &'a ApiEvent,
        _ctx: &'a InvocationContext,
    ) -> BoxFuture<'a, Result<ApiResponse, HandlerError>> {
        Box::pin(async move { respond(StatusCode::OK, self.delete(event).await) })
    }
}
