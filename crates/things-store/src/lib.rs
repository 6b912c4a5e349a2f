//! # Things Store
//!
//! The boundary to the statement-execution collaborator.
//!
//! There is no connection pool and no session: every call sends one SQL
//! statement with named parameters and receives rows back as ordered lists
//! of typed [`Field`]s, addressed by position.
//!
//! - [`ExecuteStatement`] / [`SqlParameter`] / [`Field`] - the request side
//! - [`StatementOutput`] - the response side
//! - [`StatementExecutor`] - the seam handlers depend on
//! - [`HttpStatementExecutor`] - executor speaking the Data-API JSON protocol
//! - [`mock::MockExecutor`] - recording executor for tests
//!
//! Any error from an executor is an opaque fault to callers; nothing here
//! retries.

#![doc(html_root_url = "https://docs.rs/things-store/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod executor;
mod http;
pub mod mock;
mod statement;

pub use error::StoreError;
pub use executor::{BoxFuture, StatementExecutor};
pub use http::HttpStatementExecutor;
pub use statement::{DatabaseTarget, ExecuteStatement, Field, Record, SqlParameter, StatementOutput};
