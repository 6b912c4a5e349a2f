//! Statement and result types.
//!
//! The serde shapes follow the Data-API JSON protocol, e.g.
//!
//! ```json
//! {
//!   "resourceArn": "arn:...:cluster:things",
//!   "secretArn": "arn:...:secret:things",
//!   "database": "things",
//!   "sql": "SELECT id FROM things WHERE id = :id::uuid",
//!   "parameters": [{"name": "id", "value": {"stringValue": "..."}}]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// A typed column or parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Text value.
    StringValue(String),
    /// 64-bit integer value.
    LongValue(i64),
    /// Floating point value.
    DoubleValue(f64),
    /// Boolean value.
    BooleanValue(bool),
    /// SQL `NULL` (always `true` on the wire).
    IsNull(bool),
}

impl Field {
    /// Creates a text field.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::StringValue(value.into())
    }

    /// Creates a `NULL` field.
    #[must_use]
    pub const fn null() -> Self {
        Self::IsNull(true)
    }

    /// Creates a text field, or `NULL` when `value` is `None`.
    #[must_use]
    pub fn optional_string(value: Option<impl Into<String>>) -> Self {
        value.map_or_else(Self::null, Self::string)
    }

    /// Returns the text of a string field.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringValue(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true for `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::IsNull(true))
    }
}

/// One returned row: columns in the order the statement selected them.
pub type Record = Vec<Field>;

/// A named bound parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlParameter {
    /// Placeholder name, without the leading `:`.
    pub name: String,
    /// Bound value.
    pub value: Field,
}

impl SqlParameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Field) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Which cluster, credentials and database statements run against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseTarget {
    /// Cluster resource ARN.
    pub resource_arn: String,
    /// Credentials secret ARN.
    pub secret_arn: String,
    /// Database name.
    pub database: String,
}

impl DatabaseTarget {
    /// Creates a target.
    #[must_use]
    pub fn new(
        resource_arn: impl Into<String>,
        secret_arn: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            resource_arn: resource_arn.into(),
            secret_arn: secret_arn.into(),
            database: database.into(),
        }
    }
}

/// One statement execution request.
///
/// # Example
///
/// ```
/// use things_store::{DatabaseTarget, ExecuteStatement, Field};
///
/// let statement = ExecuteStatement::new(&DatabaseTarget::default(), "SELECT 1")
///     .param("id", Field::string("abc"));
///
/// assert_eq!(statement.parameter("id"), Some(&Field::string("abc")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStatement {
    /// Cluster resource ARN.
    pub resource_arn: String,
    /// Credentials secret ARN.
    pub secret_arn: String,
    /// Database name.
    pub database: String,
    /// SQL text with `:name` placeholders.
    pub sql: String,
    /// Bound parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<SqlParameter>,
}

impl ExecuteStatement {
    /// Creates a statement against `target`.
    #[must_use]
    pub fn new(target: &DatabaseTarget, sql: impl Into<String>) -> Self {
        Self {
            resource_arn: target.resource_arn.clone(),
            secret_arn: target.secret_arn.clone(),
            database: target.database.clone(),
            sql: sql.into(),
            parameters: Vec::new(),
        }
    }

    /// Binds a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: Field) -> Self {
        self.parameters.push(SqlParameter::new(name, value));
        self
    }

    /// Replaces all bound parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<SqlParameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Looks up a bound parameter by name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Field> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

/// Result of one statement execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementOutput {
    /// Returned rows, if the statement produces any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Record>>,
    /// Rows affected by a DML statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_records_updated: Option<i64>,
}

impl StatementOutput {
    /// Creates an output carrying `records`.
    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Some(records),
            number_of_records_updated: None,
        }
    }

    /// Returns the first row, if any.
    #[must_use]
    pub fn first_record(&self) -> Option<&Record> {
        self.records.as_ref()?.first()
    }

    /// Consumes the output, yielding its rows (empty when absent).
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_wire_shape() {
        assert_eq!(
            serde_json::to_value(Field::string("x")).unwrap(),
            serde_json::json!({"stringValue": "x"})
        );
        assert_eq!(
            serde_json::to_value(Field::null()).unwrap(),
            serde_json::json!({"isNull": true})
        );
        assert_eq!(
            serde_json::to_value(Field::LongValue(3)).unwrap(),
            serde_json::json!({"longValue": 3})
        );
    }

    #[test]
    fn test_optional_string() {
        assert_eq!(Field::optional_string(Some("a")), Field::string("a"));
        assert!(Field::optional_string(None::<String>).is_null());
    }

    #[test]
    fn test_statement_wire_shape() {
        let target = DatabaseTarget::new("arn:cluster", "arn:secret", "things");
        let statement = ExecuteStatement::new(&target, "DELETE FROM things WHERE id = :id::uuid")
            .param("id", Field::string("abc"));

        let json = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["resourceArn"], "arn:cluster");
        assert_eq!(json["secretArn"], "arn:secret");
        assert_eq!(json["database"], "things");
        assert_eq!(
            json["parameters"],
            serde_json::json!([{"name": "id", "value": {"stringValue": "abc"}}])
        );
    }

    #[test]
    fn test_output_decodes_records() {
        let json = r#"{"records": [[{"stringValue": "a"}, {"isNull": true}]], "numberOfRecordsUpdated": 0}"#;
        let output: StatementOutput = serde_json::from_str(json).unwrap();

        let first = output.first_record().unwrap();
        assert_eq!(first[0].as_str(), Some("a"));
        assert!(first[1].is_null());
        assert_eq!(output.number_of_records_updated, Some(0));
    }

    #[test]
    fn test_output_without_records() {
        let output: StatementOutput = serde_json::from_str("{}").unwrap();
        assert!(output.first_record().is_none());
        assert!(output.into_records().is_empty());
    }
}
