use crate::repository::ThingRepository;
use crate::response::{missing_row, respond, store_fault};
use crate::validation::{parse_body, validate_create};
use http::StatusCode;
use things_core::{ActorId, ApiEvent, ApiResponse, HandlerError, InvocationContext, Thing, ThingError};
use things_middleware::{BoxFuture, Handler};
use things_telemetry::logging::fields;
use tracing::info;
use uuid::Uuid;

const OPERATION: &str = "create";

/// `POST /things`: validates the body and inserts a new Thing.
///
/// Answers 201 with the stored Thing.
#[derive(Debug, Clone)]
pub struct CreateThing {
    repository: ThingRepository,
    actor: ActorId,
}

impl CreateThing {
    /// Creates the handler.
    pub fn new(repository: ThingRepository, actor: ActorId) -> Self {
        Self { repository, actor }
    }

    async fn create(&self, event: &ApiEvent) -> Result<Thing, ThingError> {
        let body = parse_body(event)?;
        let input = validate_create(&body)?;

        let id = Uuid::new_v4().to_string();
        let thing = self
            .repository
            .insert(&id, &input, &self.actor)
            .await
            .map_err(|e| store_fault(OPERATION, e))?
            .ok_or_else(|| missing_row(OPERATION, "Failed to create thing"))?;

        info!({ fields::OPERATION } = OPERATION, { fields::THING_ID } = %thing.id, "Thing created");
        Ok(thing)
    }
}

impl Handler for CreateThing {
    fn call<'a>(
        &'a self,
        event: &'a ApiEvent,
        _ctx: &'a InvocationContext,
    ) -> BoxFuture<'a, Result<ApiResponse, HandlerError>> {
        Box::pin(async move { respond(StatusCode::CREATED, self.create(event).await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::row;
    use std::sync::Arc;
    use things_store::mock::MockExecutor;
    use things_store::{DatabaseTarget, Field, StoreError};

    fn handler() -> (Arc<MockExecutor>, CreateThing) {
        let mock = Arc::new(MockExecutor::new());
        let repository = ThingRepository::new(mock.clone(), DatabaseTarget::default());
        (mock, CreateThing::new(repository, ActorId::placeholder()))
    }

    async fn call(handler: &CreateThing, body: &str) -> (u16, serde_json::Value) {
        let event = ApiEvent::new("POST", "/things").with_body(body);
        let response = handler.call(&event, &InvocationContext::mock()).await.unwrap();
        let json = serde_json::from_str(response.body.as_deref().unwrap()).unwrap();
        (response.status_code, json)
    }

    #[tokio::test]
    async fn test_created() {
        let (mock, handler) = handler();
        mock.push_records(vec![row("550e8400-e29b-41d4-a716-446655440000", "lamp", Some("desk"))]);

        let (status, json) = call(&handler, r#"{"name":"  lamp ","description":"desk"}"#).await;

        assert_eq!(status, 201);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["name"], "lamp");
        assert_eq!(json["data"]["description"], "desk");

        let statement = mock.call(0).unwrap();
        assert_eq!(statement.parameter("name"), Some(&Field::string("lamp")));
        let id = statement.parameter("id").and_then(Field::as_str).unwrap();
        assert!(crate::validation::is_valid_thing_id(id));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (mock, handler) = handler();
        let (status, json) = call(&handler, "{oops").await;

        assert_eq!(status, 400);
        assert_eq!(json["error"]["code"], "INVALID_JSON");
        assert_eq!(json["error"]["message"], "Request body must be valid JSON");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_validation_error_lists_details() {
        let (mock, handler) = handler();
        let (status, json) = call(&handler, r#"{"description":"x"}"#).await;

        assert_eq!(status, 400);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["message"], "Validation failed");
        assert_eq!(json["error"]["details"], serde_json::json!(["Name is required"]));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_row_returned_is_internal() {
        let (mock, handler) = handler();
        mock.push_empty();

        let (status, json) = call(&handler, r#"{"name":"lamp"}"#).await;
        assert_eq!(status, 500);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_store_fault_is_internal() {
        let (mock, handler) = handler();
        mock.push_error(StoreError::backend("timeout"));

        let (status, json) = call(&handler, r#"{"name":"lamp"}"#).await;
        assert_eq!(status, 500);
        assert_eq!(json["error"]["message"], "An unexpected error occurred");
    }
}
