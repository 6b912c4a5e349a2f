//! Thing persistence over a statement executor.

use crate::record::{thing_from_record, things_from_records};
use crate::statement::{
    UpdateStatementBuilder, DELETE_THING, INSERT_THING, LIST_THINGS, SELECT_THING, THING_EXISTS,
};
use crate::validation::{CreateThingInput, UpdateThingInput};
use std::sync::Arc;
use things_core::{ActorId, Thing};
use things_store::{DatabaseTarget, ExecuteStatement, Field, StatementExecutor, StatementOutput, StoreError};
use tracing::debug;

/// Runs the Thing statements against one database.
///
/// Cloning is cheap; all clones share the executor.
#[derive(Clone)]
pub struct ThingRepository {
    executor: Arc<dyn StatementExecutor>,
    target: DatabaseTarget,
}

impl ThingRepository {
    /// Creates a repository.
    pub fn new(executor: Arc<dyn StatementExecutor>, target: DatabaseTarget) -> Self {
        Self { executor, target }
    }

    /// Inserts a Thing and returns the stored row, if the store returned one.
    pub async fn insert(
        &self,
        id: &str,
        input: &CreateThingInput,
        actor: &ActorId,
    ) -> Result<Option<Thing>, StoreError> {
        let statement = self
            .statement(INSERT_THING)
            .param("id", Field::string(id))
            .param("name", Field::string(&input.name))
            .param("description", Field::optional_string(input.description.as_deref()))
            .param("createdBy", Field::string(actor.as_str()))
            .param("updatedBy", Field::string(actor.as_str()));

        let output = self.run(statement).await?;
        output.first_record().map(thing_from_record).transpose()
    }

    /// Fetches one Thing.
    pub async fn find(&self, id: &str) -> Result<Option<Thing>, StoreError> {
        let statement = self.statement(SELECT_THING).param("id", Field::string(id));
        let output = self.run(statement).await?;
        output.first_record().map(thing_from_record).transpose()
    }

    /// Fetches every Thing, newest first.
    pub async fn list(&self) -> Result<Vec<Thing>, StoreError> {
        let output = self.run(self.statement(LIST_THINGS)).await?;
        things_from_records(&output.into_records())
    }

    /// Applies the supplied fields and returns the updated row, or `None`
    /// if no row has `id`.
    pub async fn update(
        &self,
        id: &str,
        input: &UpdateThingInput,
        actor: &ActorId,
    ) -> Result<Option<Thing>, StoreError> {
        let mut builder = UpdateStatementBuilder::new();
        if let Some(name) = &input.name {
            builder = builder.set("name", "name", Field::string(name));
        }
        if let Some(description) = &input.description {
            builder = builder.set(
                "description",
                "description",
                Field::optional_string(description.as_deref()),
            );
        }

        let output = self.run(builder.build(&self.target, id, actor)).await?;
        output.first_record().map(thing_from_record).transpose()
    }

    /// Returns true if a row has `id`.
    pub async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let statement = self.statement(THING_EXISTS).param("id", Field::string(id));
        let output = self.run(statement).await?;
        Ok(output.first_record().is_some())
    }

    /// Deletes the row with `id`.
    ///
    /// Not atomic with [`exists`](Self::exists): a row removed between the
    /// two calls is deleted zero times and still reported as deleted.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let statement = self.statement(DELETE_THING).param("id", Field::string(id));
        self.run(statement).await.map(|_| ())
    }

    fn statement(&self, sql: &str) -> ExecuteStatement {
        ExecuteStatement::new(&self.target, sql)
    }

    async fn run(&self, statement: ExecuteStatement) -> Result<StatementOutput, StoreError> {
        debug!(sql = %statement.sql, parameters = statement.parameters.len(), "Executing statement");
        self.executor.execute(statement).await
    }
}

impl std::fmt::Debug for ThingRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThingRepository")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::row;
    use things_store::mock::MockExecutor;

    const ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn repository() -> (Arc<MockExecutor>, ThingRepository) {
        let mock = Arc::new(MockExecutor::new());
        let target = DatabaseTarget::new("cluster", "secret", "things");
        (mock.clone(), ThingRepository::new(mock, target))
    }

    #[tokio::test]
    async fn test_insert_binds_every_parameter() {
        let (mock, repo) = repository();
        mock.push_records(vec![row(ID, "lamp", None)]);

        let input = CreateThingInput {
            name: "lamp".to_string(),
            description: None,
        };
        let thing = repo.insert(ID, &input, &ActorId::placeholder()).await.unwrap().unwrap();
        assert_eq!(thing.name, "lamp");

        let call = mock.call(0).unwrap();
        assert_eq!(call.sql, INSERT_THING);
        assert_eq!(call.resource_arn, "cluster");
        assert_eq!(call.secret_arn, "secret");
        assert_eq!(call.database, "things");
        assert_eq!(call.parameter("id"), Some(&Field::string(ID)));
        assert_eq!(call.parameter("description"), Some(&Field::null()));
        assert_eq!(call.parameter("createdBy"), Some(&Field::string("system")));
        assert_eq!(call.parameter("updatedBy"), Some(&Field::string("system")));
    }

    #[tokio::test]
    async fn test_insert_without_row() {
        let (mock, repo) = repository();
        mock.push_empty();

        let input = CreateThingInput {
            name: "lamp".to_string(),
            description: None,
        };
        assert!(repo.insert(ID, &input, &ActorId::placeholder()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_handles_missing_records() {
        let (mock, repo) = repository();
        mock.push_output(StatementOutput::default());
        assert!(repo.list().await.unwrap().is_empty());
        assert_eq!(mock.call(0).unwrap().sql, LIST_THINGS);
        assert!(mock.call(0).unwrap().parameters.is_empty());
    }

    #[tokio::test]
    async fn test_update_only_supplied_fields() {
        let (mock, repo) = repository();
        mock.push_records(vec![row(ID, "lamp", None)]);

        let input = UpdateThingInput {
            name: None,
            description: Some(None),
        };
        repo.update(ID, &input, &ActorId::placeholder()).await.unwrap();

        let call = mock.call(0).unwrap();
        assert!(call.sql.contains("SET description = :description, updated_at = NOW()"));
        assert!(call.parameter("name").is_none());
        assert_eq!(call.parameter("description"), Some(&Field::null()));
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let (mock, repo) = repository();
        mock.push_records(vec![vec![Field::string(ID)]]).push_output(StatementOutput {
            records: None,
            number_of_records_updated: Some(1),
        });

        assert!(repo.exists(ID).await.unwrap());
        repo.delete(ID).await.unwrap();

        assert_eq!(mock.call(0).unwrap().sql, THING_EXISTS);
        assert_eq!(mock.call(1).unwrap().sql, DELETE_THING);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let (mock, repo) = repository();
        mock.push_error(StoreError::backend("down"));
        assert!(matches!(repo.find(ID).await, Err(StoreError::Backend(_))));
    }
}
