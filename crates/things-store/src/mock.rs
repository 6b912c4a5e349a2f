//! Recording executor for tests.
//!
//! Responses are queued up front and handed out in order; every statement
//! received is kept so tests can assert on the SQL and parameters.

use crate::error::StoreError;
use crate::executor::{BoxFuture, StatementExecutor};
use crate::statement::{ExecuteStatement, Record, StatementOutput};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A [`StatementExecutor`] that replays queued responses.
///
/// # Example
///
/// ```
/// use things_store::mock::MockExecutor;
/// use things_store::Field;
///
/// let executor = MockExecutor::new();
/// executor.push_records(vec![vec![Field::string("a")]]).push_empty();
/// assert_eq!(executor.call_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: Mutex<VecDeque<Result<StatementOutput, StoreError>>>,
    calls: Mutex<Vec<ExecuteStatement>>,
}

impl MockExecutor {
    /// Creates an executor with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an arbitrary output.
    pub fn push_output(&self, output: StatementOutput) -> &Self {
        self.responses.lock().push_back(Ok(output));
        self
    }

    /// Queues an output carrying `records`.
    pub fn push_records(&self, records: Vec<Record>) -> &Self {
        self.push_output(StatementOutput::with_records(records))
    }

    /// Queues an output with an empty record list.
    pub fn push_empty(&self) -> &Self {
        self.push_records(Vec::new())
    }

    /// Queues a failure.
    pub fn push_error(&self, error: StoreError) -> &Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    /// Returns how many statements were received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the statement received at `index`.
    #[must_use]
    pub fn call(&self, index: usize) -> Option<ExecuteStatement> {
        self.calls.lock().get(index).cloned()
    }
}

impl StatementExecutor for MockExecutor {
    fn execute(&self, statement: ExecuteStatement) -> BoxFuture<'_, Result<StatementOutput, StoreError>> {
        self.calls.lock().push(statement);
        let response = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(StoreError::backend("no response queued")));
        Box::pin(async move { response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{DatabaseTarget, Field};

    fn statement(sql: &str) -> ExecuteStatement {
        ExecuteStatement::new(&DatabaseTarget::default(), sql)
    }

    #[tokio::test]
    async fn test_replays_in_order_and_records_calls() {
        let executor = MockExecutor::new();
        executor
            .push_records(vec![vec![Field::string("first")]])
            .push_empty();

        let first = executor.execute(statement("SELECT 1")).await.unwrap();
        let second = executor.execute(statement("SELECT 2")).await.unwrap();

        assert_eq!(first.first_record().unwrap()[0].as_str(), Some("first"));
        assert!(second.first_record().is_none());
        assert_eq!(executor.call_count(), 2);
        assert_eq!(executor.call(1).unwrap().sql, "SELECT 2");
    }

    #[tokio::test]
    async fn test_queued_error_is_returned() {
        let executor = MockExecutor::new();
        executor.push_error(StoreError::backend("down"));

        let result = executor.execute(statement("SELECT 1")).await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_empty_queue_fails() {
        let executor = MockExecutor::new();
        assert!(executor.execute(statement("SELECT 1")).await.is_err());
        assert_eq!(executor.call_count(), 1);
    }
}
