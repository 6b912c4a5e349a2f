//! Executor speaking the Data-API JSON protocol over HTTP.

use crate::error::StoreError;
use crate::executor::{BoxFuture, StatementExecutor};
use crate::statement::{ExecuteStatement, StatementOutput};
use tracing::debug;

/// Posts each statement as JSON to `{endpoint}/Execute`.
///
/// # Example
///
/// ```
/// use things_store::HttpStatementExecutor;
///
/// let executor = HttpStatementExecutor::new("http://localhost:8081/");
/// assert_eq!(executor.execute_url(), "http://localhost:8081/Execute");
/// ```
#[derive(Debug, Clone)]
pub struct HttpStatementExecutor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpStatementExecutor {
    /// Creates an executor with a default client.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Creates an executor using an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the URL statements are posted to.
    #[must_use]
    pub fn execute_url(&self) -> String {
        format!("{}/Execute", self.endpoint.trim_end_matches('/'))
    }

    async fn send(&self, statement: ExecuteStatement) -> Result<StatementOutput, StoreError> {
        debug!(
            sql = %statement.sql,
            parameters = statement.parameters.len(),
            "Executing statement"
        );

        let response = self
            .client
            .post(self.execute_url())
            .json(&statement)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let output: StatementOutput = response.json().await?;
        debug!(
            records = output.records.as_ref().map_or(0, Vec::len),
            "Statement completed"
        );
        Ok(output)
    }
}

impl StatementExecutor for HttpStatementExecutor {
    fn execute(&self, statement: ExecuteStatement) -> BoxFuture<'_, Result<StatementOutput, StoreError>> {
        Box::pin(self.send(statement))
    }
}
