//! # Things Service
//!
//! The Thing resource handlers and everything they share:
//!
//! - [`validation`] - Body parsing, schema checks and the identifier pattern
//! - [`statement`] - The fixed SQL and the dynamic [`UpdateStatementBuilder`]
//! - [`record`] - Positional row mapping
//! - [`ThingRepository`] - The statements, run through an injected executor
//! - [`handlers`] - Create, get, update and delete
//! - [`ThingsApi`] - The handlers wrapped with the standard pipeline
//!
//! ## Request lifecycle
//!
//! ```text
//! identifier check → parse body → validate → store call(s) → envelope
//! ```
//!
//! Each step can end the request with a domain error, answered locally as
//! a failure envelope with a stable code.

#![doc(html_root_url = "https://docs.rs/things-service/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod handlers;
pub mod record;
pub mod repository;
pub mod response;
pub mod statement;
pub mod validation;

pub use api::{Operation, ThingsApi};
pub use handlers::{CreateThing, DeleteThing, GetThing, UpdateThing, THING_ID_PARAM};
pub use repository::ThingRepository;
pub use statement::UpdateStatementBuilder;
pub use validation::{CreateThingInput, UpdateThingInput};
