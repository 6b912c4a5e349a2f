//! Envelope responses.

use http::StatusCode;
use serde::Serialize;
use things_core::{ApiResponse, Envelope, HandlerError, ThingError};
use things_store::StoreError;
use things_telemetry::logging::fields;
use tracing::{debug, error};

/// Serializes a handler outcome as an envelope response.
///
/// Success uses `status`; a [`ThingError`] uses its own status and code.
pub fn respond<T: Serialize>(status: StatusCode, result: Result<T, ThingError>) -> Result<ApiResponse, HandlerError> {
    let response = match result {
        Ok(data) => ApiResponse::json(status, &Envelope::success(data))?,
        Err(err) => {
            debug!(code = %err.code(), { fields::ERROR } = %err, "Answering with failure envelope");
            ApiResponse::json(err.status_code(), &Envelope::failure(&err))?
        }
    };
    Ok(response)
}

/// Logs a store fault for `operation` and turns it into an internal error.
pub fn store_fault(operation: &'static str, err: StoreError) -> ThingError {
    error!({ fields::OPERATION } = operation, { fields::ERROR } = %err, "Store call failed");
    ThingError::internal(err)
}

/// Logs an unexpected empty store result and turns it into an internal
/// error.
pub fn missing_row(operation: &'static str, message: &'static str) -> ThingError {
    error!({ fields::OPERATION } = operation, "{message}");
    ThingError::internal(anyhow::anyhow!(message))
}
