//! SQL for the `things` table.
//!
//! Every query selects the columns in [`THING_COLUMNS`] order, which is the
//! order rows are read back in.

use things_core::ActorId;
use things_store::{DatabaseTarget, ExecuteStatement, Field};

/// Columns returned by every Thing query, in positional order.
pub const THING_COLUMNS: &str = "id, name, description, created_at, updated_at, created_by, updated_by";

/// Inserts one row and returns it.
pub const INSERT_THING: &str = "INSERT INTO things (id, name, description, created_by, updated_by) \
     VALUES (:id::uuid, :name, :description, :createdBy, :updatedBy) \
     RETURNING id, name, description, created_at, updated_at, created_by, updated_by";

/// Selects one row by identifier.
pub const SELECT_THING: &str = "SELECT id, name, description, created_at, updated_at, created_by, updated_by \
     FROM things WHERE id = :id::uuid";

/// Selects every row, newest first.
pub const LIST_THINGS: &str = "SELECT id, name, description, created_at, updated_at, created_by, updated_by \
     FROM things ORDER BY created_at DESC";

/// Existence check ahead of a delete.
pub const THING_EXISTS: &str = "SELECT id FROM things WHERE id = :id::uuid";

/// Deletes one row.
pub const DELETE_THING: &str = "DELETE FROM things WHERE id = :id::uuid";

/// Builds an `UPDATE` that touches only the supplied columns.
///
/// Assignments keep the order they were added in. `updated_at` and
/// `updated_by` are always appended last. Values are only ever bound as
/// parameters.
///
/// # Example
///
/// ```
/// use things_core::ActorId;
/// use things_service::statement::UpdateStatementBuilder;
/// use things_store::{DatabaseTarget, Field};
///
/// let statement = UpdateStatementBuilder::new()
///     .set("name", "name", Field::string("lamp"))
///     .build(&DatabaseTarget::default(), "550e8400-e29b-41d4-a716-446655440000", &ActorId::placeholder());
///
/// assert!(statement.sql.starts_with(
///     "UPDATE things SET name = :name, updated_at = NOW(), updated_by = :updatedBy WHERE id = :id::uuid"
/// ));
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdateStatementBuilder {
    assignments: Vec<(&'static str, &'static str, Field)>,
}

impl UpdateStatementBuilder {
    /// Creates a builder with no assignments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `column = :placeholder`, binding `value` to the placeholder.
    #[must_use]
    pub fn set(mut self, column: &'static str, placeholder: &'static str, value: Field) -> Self {
        self.assignments.push((column, placeholder, value));
        self
    }

    /// Builds the statement for the row `id`, recording `actor` as updater.
    pub fn build(self, target: &DatabaseTarget, id: &str, actor: &ActorId) -> ExecuteStatement {
        let mut parts: Vec<String> = self
            .assignments
            .iter()
            .map(|(column, placeholder, _)| format!("{column} = :{placeholder}"))
            .collect();
        parts.push("updated_at = NOW()".to_string());
        parts.push("updated_by = :updatedBy".to_string());

        let sql = format!(
            "UPDATE things SET {} WHERE id = :id::uuid RETURNING {THING_COLUMNS}",
            parts.join(", ")
        );

        let mut statement = ExecuteStatement::new(target, sql).param("id", Field::string(id));
        for (_, placeholder, value) in self.assignments {
            statement = statement.param(placeholder, value);
        }
        statement.param("updatedBy", Field::string(actor.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn names(statement: &ExecuteStatement) -> Vec<&str> {
        statement.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_timestamp_and_updater_always_last() {
        let statement = UpdateStatementBuilder::new()
            .set("description", "description", Field::null())
            .build(&DatabaseTarget::default(), ID, &ActorId::placeholder());

        assert_eq!(
            statement.sql,
            format!(
                "UPDATE things SET description = :description, updated_at = NOW(), \
                 updated_by = :updatedBy WHERE id = :id::uuid RETURNING {THING_COLUMNS}"
            )
        );
        assert_eq!(names(&statement), ["id", "description", "updatedBy"]);
        assert_eq!(statement.parameter("description"), Some(&Field::null()));
        assert_eq!(statement.parameter("updatedBy"), Some(&Field::string("system")));
    }

    #[test]
    fn test_assignments_keep_order() {
        let statement = UpdateStatementBuilder::new()
            .set("name", "name", Field::string("a"))
            .set("description", "description", Field::string("b"))
            .build(&DatabaseTarget::default(), ID, &ActorId::new("alice"));

        assert!(statement
            .sql
            .contains("SET name = :name, description = :description, updated_at = NOW()"));
        assert_eq!(names(&statement), ["id", "name", "description", "updatedBy"]);
    }

    #[test]
    fn test_values_never_inlined() {
        let statement = UpdateStatementBuilder::new()
            .set("name", "name", Field::string("'; DROP TABLE things; --"))
            .build(&DatabaseTarget::default(), ID, &ActorId::placeholder());

        assert!(!statement.sql.contains("DROP"));
        assert!(!statement.sql.contains(ID));
    }

    #[test]
    fn test_empty_builder_only_refreshes_audit_columns() {
        let statement = UpdateStatementBuilder::new().build(&DatabaseTarget::default(), ID, &ActorId::placeholder());
        assert!(statement.sql.starts_with("UPDATE things SET updated_at = NOW(), updated_by = :updatedBy WHERE"));
        assert_eq!(names(&statement), ["id", "updatedBy"]);
    }

    #[test]
    fn test_fixed_statements_select_positional_columns() {
        for sql in [INSERT_THING, SELECT_THING, LIST_THINGS] {
            assert!(sql.contains(THING_COLUMNS), "{sql}");
        }
        assert!(LIST_THINGS.ends_with("ORDER BY created_at DESC"));
    }
}
