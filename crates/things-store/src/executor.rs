//! The executor seam.

use crate::error::StoreError;
use crate::statement::{ExecuteStatement, StatementOutput};
use std::future::Future;
use std::pin::Pin;

/// A boxed future, used so executors can live behind `dyn`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Runs one parameterized statement.
///
/// Handlers hold an `Arc<dyn StatementExecutor>` created once per process
/// and passed in explicitly.
///
/// # Example
///
/// ```
/// use things_store::{BoxFuture, ExecuteStatement, StatementExecutor, StatementOutput, StoreError};
///
/// struct AlwaysEmpty;
///
/// impl StatementExecutor for AlwaysEmpty {
///     fn execute(&self, _statement: ExecuteStatement) -> BoxFuture<'_, Result<StatementOutput, StoreError>> {
///         Box::pin(async { Ok(StatementOutput::default()) })
///     }
/// }
/// ```
pub trait StatementExecutor: Send + Sync + 'static {
    /// Executes `statement` and returns its rows.
    fn execute(&self, statement: ExecuteStatement) -> BoxFuture<'_, Result<StatementOutput, StoreError>>;
}
