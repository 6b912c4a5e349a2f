use super::THING_ID_PARAM;
use crate::repository::ThingRepository;
use crate::response::{respond, store_fault};
use crate::validation::{parse_body, require_thing_id, validate_update};
use http::StatusCode;
use things_core::{ActorId, ApiEvent, ApiResponse, HandlerError, InvocationContext, Thing, ThingError};
use things_middleware::{BoxFuture, Handler};
use things_telemetry::logging::fields;
use tracing::info;

const OPERATION: &str = "update";

/// `PATCH /things/{thingId}`: changes the supplied fields of a Thing.
///
/// The update timestamp and updater are refreshed on every update. A body
/// with no recognized field is rejected before the store is touched.
#[derive(Debug, Clone)]
pub struct UpdateThing {
    repository: ThingRepository,
    actor: ActorId,
}

impl UpdateThing {
    /// Creates the handler.
    pub fn new(repository: ThingRepository, actor: ActorId) -> Self {
        Self { repository, actor }
    }

    async fn update(&self, event: &ApiEvent) -> Result<Thing, ThingError> {
        let id = require_thing_id(event.path_parameter(THING_ID_PARAM))?;
        let body = parse_body(event)?;
        let input = validate_update(&body)?;

        if input.is_empty() {
            return Err(ThingError::NoFields);
        }

        let thing = self
            .repository
            .update(id, &input, &self.actor)
            .await
            .map_err(|e| store_fault(OPERATION, e))?
            .ok_or_else(|| ThingError::not_found(id))?;

        info!({ fields::OPERATION } = OPERATION, { fields::THING_ID } = %thing.id, "Thing updated");
        Ok(thing)
    }
}

impl Handler for UpdateThing {
    fn call<'a>(
        &'a self,
        event: &'a ApiEvent,
        _ctx: &'a InvocationContext,
    ) -> BoxFuture<'a, Result<ApiResponse, HandlerError>> {
        Box::pin(async move { respond(StatusCode::OK, self.update(event).await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::row;
    use std::sync::Arc;
    use things_store::mock::MockExecutor;
    use things_store::{DatabaseTarget, Field, StoreError};

    const ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn handler() -> (Arc<MockExecutor>, UpdateThing) {
        let mock = Arc::new(MockExecutor::new());
        let repository = ThingRepository::new(mock.clone(), DatabaseTarget::default());
        (mock, UpdateThing::new(repository, ActorId::placeholder()))
    }

    async fn call(handler: &UpdateThing, id: Option<&str>, body: Option<&str>) -> (u16, serde_json::Value) {
        let mut event = ApiEvent::new("PATCH", "/things");
        if let Some(id) = id {
            event = event.with_path_parameter(THING_ID_PARAM, id);
        }
        if let Some(body) = body {
            event = event.with_body(body);
        }
        let response = handler.call(&event, &InvocationContext::mock()).await.unwrap();
        let json = serde_json::from_str(response.body.as_deref().unwrap()).unwrap();
        (response.status_code, json)
    }

    #[tokio::test]
    async fn test_missing_id() {
        let (mock, handler) = handler();
        let (status, json) = call(&handler, None, Some(r#"{"name":"a"}"#)).await;
        assert_eq!(status, 400);
        assert_eq!(json["error"]["code"], "MISSING_ID");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_id_checked_before_body() {
        let (mock, handler) = handler();
        let (status, json) = call(&handler, Some("nope"), Some("{bad json")).await;
        assert_eq!(status, 400);
        assert_eq!(json["error"]["code"], "INVALID_ID");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (_, handler) = handler();
        let (status, json) = call(&handler, Some(ID), Some("[")).await;
        assert_eq!(status, 400);
        assert_eq!(json["error"]["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_validation_error() {
        let (mock, handler) = handler();
        let (status, json) = call(&handler, Some(ID), Some(r#"{"name":"","description":7}"#)).await;
        assert_eq!(status, 400);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            json["error"]["details"],
            serde_json::json!(["Name cannot be empty", "Description must be a string"])
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_fields_for_empty_and_absent_body() {
        for body in [Some("{}"), Some(""), None] {
            let (mock, handler) = handler();
            let (status, json) = call(&handler, Some(ID), body).await;
            assert_eq!(status, 400);
            assert_eq!(json["error"]["code"], "NO_FIELDS");
            assert_eq!(
                json["error"]["message"],
                "At least one field must be provided for update"
            );
            assert_eq!(mock.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_name_only_still_refreshes_updater() {
        let (mock, handler) = handler();
        mock.push_records(vec![row(ID, "renamed", None)]);

        let (status, json) = call(&handler, Some(ID), Some(r#"{"name":" renamed "}"#)).await;
        assert_eq!(status, 200);
        assert_eq!(json["data"]["name"], "renamed");

        let statement = mock.call(0).unwrap();
        assert!(statement.sql.contains("updated_at = NOW()"));
        assert_eq!(statement.parameter("name"), Some(&Field::string("renamed")));
        assert_eq!(statement.parameter("updatedBy"), Some(&Field::string("system")));
        assert!(statement.parameter("description").is_none());
    }

    #[tokio::test]
    async fn test_empty_description_written_as_null() {
        let (mock, handler) = handler();
        mock.push_records(vec![row(ID, "lamp", None)]);

        call(&handler, Some(ID), Some(r#"{"description":""}"#)).await;
        assert_eq!(mock.call(0).unwrap().parameter("description"), Some(&Field::null()));
    }

    #[tokio::test]
    async fn test_not_found() {
        let (mock, handler) = handler();
        mock.push_empty();

        let (status, json) = call(&handler, Some(ID), Some(r#"{"name":"a"}"#)).await;
        assert_eq!(status, 404);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_store_fault() {
        let (mock, handler) = handler();
        mock.push_error(StoreError::backend("down"));

        let (status, json) = call(&handler, Some(ID), Some(r#"{"name":"a"}"#)).await;
        assert_eq!(status, 500);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    }
}
