//! # Things Core
//!
//! Core types shared by every crate in the Things API workspace:
//!
//! - [`Thing`] - The managed resource and the [`DeleteResult`] payload
//! - [`Envelope`] - The discriminated success/failure wire wrapper
//! - [`ApiEvent`] / [`ApiResponse`] - HTTP proxy event and structured result
//! - [`InvocationContext`] - Per-invocation runtime metadata
//! - [`ThingError`] - Locally handled domain failures (the error taxonomy)
//! - [`HandlerError`] - Failures that escape a handler and reach the pipeline
//! - [`ActorId`] - Identity recorded as creator/updater

#![doc(html_root_url = "https://docs.rs/things-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod envelope;
mod error;
mod event;
mod identity;
mod thing;

pub use context::{InvocationContext, RequestId};
pub use envelope::{Envelope, ErrorBody};
pub use error::{ErrorCode, HandlerError, ThingError, ValidationErrors};
pub use event::{ApiEvent, ApiResponse, BodyDecodeError, EventHttp, EventRequestContext};
pub use identity::ActorId;
pub use thing::{DeleteResult, Thing};

/// Header name the pipeline guarantees on every successful response.
pub const CONTENT_TYPE: &str = "content-type";

/// Content type used for every envelope body.
pub const APPLICATION_JSON: &str = "application/json";
