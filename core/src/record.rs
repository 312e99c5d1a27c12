//! Generic records bound to a table descriptor.
//!
//! A [`Record`] holds one [`Value`] per column of its [`TableDescriptor`], in
//! column order. Assignments are checked against the column's type domain the
//! way a typed struct field would be: the value must match the column type,
//! and `NULL` is only accepted by nullable columns.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::types::{ColumnDescriptor, DatabaseType, TableDescriptor};

/// Errors raised when reading or writing record fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The column does not exist in the record's table.
    #[error("unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },
    /// The value does not belong to the column's type domain.
    #[error("column '{column}' expects {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: DatabaseType,
        found: String,
    },
    /// `NULL` assigned to a NOT NULL column.
    #[error("column '{0}' is not nullable")]
    NullViolation(String),
    /// JSON input for a record was not an object.
    #[error("record JSON for table '{0}' must be an object")]
    NotAnObject(String),
}

/// A single column value.
///
/// # Examples
///
/// ```
/// use iam_schema_core::{DatabaseType, Value};
///
/// assert_eq!(Value::from("admin"), Value::Text("admin".into()));
/// assert_eq!(Value::from(None::<i64>), Value::Null);
/// assert!(Value::Int4(3).fits(DatabaseType::Int4));
/// assert!(!Value::Int4(3).fits(DatabaseType::Int8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Text(String),
    Int4(i32),
    Int8(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// The zero value of a NOT NULL field of the given type.
    pub fn zero(database_type: DatabaseType) -> Self {
        match database_type {
            DatabaseType::Varchar | DatabaseType::Text => Value::Text(String::new()),
            DatabaseType::Int4 => Value::Int4(0),
            DatabaseType::Int8 => Value::Int8(0),
            DatabaseType::Bool => Value::Bool(false),
            DatabaseType::Timestamp => Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if a non-null value belongs to `database_type`.
    ///
    /// `Null` fits no type; nullability is checked separately.
    pub fn fits(&self, database_type: DatabaseType) -> bool {
        matches!(
            (self, database_type),
            (Value::Text(_), DatabaseType::Varchar | DatabaseType::Text)
                | (Value::Int4(_), DatabaseType::Int4)
                | (Value::Int8(_), DatabaseType::Int8)
                | (Value::Bool(_), DatabaseType::Bool)
                | (Value::Timestamp(_), DatabaseType::Timestamp)
        )
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Text(_) => "text",
            Value::Int4(_) => "int4",
            Value::Int8(_) => "int8",
            Value::Bool(_) => "bool",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts into a JSON value; timestamps use RFC 3339.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Int4(n) => serde_json::Value::from(*n),
            Value::Int8(n) => serde_json::Value::from(*n),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
        }
    }

    /// Parses a JSON value into the domain of `column`.
    pub fn from_json(
        column: &ColumnDescriptor,
        json: &serde_json::Value,
    ) -> Result<Self, RecordError> {
        let mismatch = || RecordError::TypeMismatch {
            column: column.name.clone(),
            expected: column.database_type,
            found: json_kind(json).to_string(),
        };

        if json.is_null() {
            return if column.nullable {
                Ok(Value::Null)
            } else {
                Err(RecordError::NullViolation(column.name.clone()))
            };
        }

        match column.database_type {
            DatabaseType::Varchar | DatabaseType::Text => json
                .as_str()
                .map(|s| Value::Text(s.to_string()))
                .ok_or_else(mismatch),
            DatabaseType::Int4 => json
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Value::Int4)
                .ok_or_else(mismatch),
            DatabaseType::Int8 => json.as_i64().map(Value::Int8).ok_or_else(mismatch),
            DatabaseType::Bool => json.as_bool().map(Value::Bool).ok_or_else(mismatch),
            DatabaseType::Timestamp => json
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|ts| Value::Timestamp(ts.with_timezone(&Utc)))
                .ok_or_else(mismatch),
        }
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int4(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int8(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// A row of a table, one value per column.
///
/// New records hold `NULL` in nullable columns and the type's zero value in
/// NOT NULL columns.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use iam_schema_core::{ColumnDescriptor, Record, TableDescriptor, Value};
///
/// let table = Arc::new(
///     TableDescriptor::new("user_entity")
///         .with_column(ColumnDescriptor::varchar("id", 36).key())
///         .with_column(ColumnDescriptor::varchar("email", 255))
///         .with_column(ColumnDescriptor::boolean("enabled").required()),
/// );
///
/// let mut user = Record::new(table);
/// assert_eq!(user.get("email"), Some(&Value::Null));
/// assert_eq!(user.get("enabled"), Some(&Value::Bool(false)));
///
/// user.set("id", "4b2f").unwrap();
/// user.set("enabled", true).unwrap();
/// assert!(user.set("enabled", None::<bool>).is_err());
///
/// let json = user.to_json();
/// assert_eq!(json["id"], "4b2f");
/// assert_eq!(json["email"], serde_json::Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    table: Arc<TableDescriptor>,
    values: Vec<Value>,
}

impl Record {
    /// Creates a record with zero/NULL values for every column.
    pub fn new(table: Arc<TableDescriptor>) -> Self {
        let values = table
            .columns
            .iter()
            .map(|c| {
                if c.nullable {
                    Value::Null
                } else {
                    Value::zero(c.database_type)
                }
            })
            .collect();
        Self { table, values }
    }

    /// Builds a record from a JSON object keyed by external field names.
    ///
    /// Missing fields keep their initial value; unknown fields are rejected.
    pub fn from_json(
        table: Arc<TableDescriptor>,
        json: &serde_json::Value,
    ) -> Result<Self, RecordError> {
        let object = json
            .as_object()
            .ok_or_else(|| RecordError::NotAnObject(table.name.clone()))?;

        let mut record = Record::new(Arc::clone(&table));
        for (key, raw) in object {
            let index = table
                .columns
                .iter()
                .position(|c| c.json_name() == key)
                .ok_or_else(|| RecordError::UnknownColumn {
                    table: table.name.clone(),
                    column: key.clone(),
                })?;
            record.values[index] = Value::from_json(&table.columns[index], raw)?;
        }
        Ok(record)
    }

    /// The descriptor this record follows.
    pub fn descriptor(&self) -> &TableDescriptor {
        &self.table
    }

    /// Shared handle to the descriptor.
    pub fn descriptor_arc(&self) -> Arc<TableDescriptor> {
        Arc::clone(&self.table)
    }

    /// Reads a value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.table.column_index(column).map(|i| &self.values[i])
    }

    /// Writes a value by column name.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnknownColumn`] for a column outside the table,
    /// [`RecordError::NullViolation`] for `NULL` in a NOT NULL column, and
    /// [`RecordError::TypeMismatch`] when the value's type differs from the
    /// column's.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> Result<(), RecordError> {
        let index = self
            .table
            .column_index(column)
            .ok_or_else(|| RecordError::UnknownColumn {
                table: self.table.name.clone(),
                column: column.to_string(),
            })?;
        let descriptor = &self.table.columns[index];
        let value = value.into();

        if value.is_null() {
            if !descriptor.nullable {
                return Err(RecordError::NullViolation(descriptor.name.clone()));
            }
        } else if !value.fits(descriptor.database_type) {
            return Err(RecordError::TypeMismatch {
                column: descriptor.name.clone(),
                expected: descriptor.database_type,
                found: value.kind().to_string(),
            });
        }

        self.values[index] = value;
        Ok(())
    }

    /// Iterates `(column, value)` pairs in column order.
    pub fn values(&self) -> impl Iterator<Item = (&ColumnDescriptor, &Value)> {
        self.table.columns.iter().zip(self.values.iter())
    }

    /// Iterates `(field_tag, value)` pairs; tags are 1-based positions.
    pub fn tagged_values(&self) -> impl Iterator<Item = (u32, &Value)> {
        self.values.iter().enumerate().map(|(i, v)| (i as u32 + 1, v))
    }

    /// Returns the primary-key values in column order.
    pub fn primary_key_values(&self) -> Vec<(&str, &Value)> {
        self.values()
            .filter(|(c, _)| c.primary_key)
            .map(|(c, v)| (c.name.as_str(), v))
            .collect()
    }

    /// Converts into a JSON object keyed by external field names.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .values()
            .map(|(c, v)| (c.json_name().to_string(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.values() {
            map.serialize_entry(column.json_name(), &value.to_json())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn credential_table() -> Arc<TableDescriptor> {
        Arc::new(
            TableDescriptor::new("credential")
                .with_column(ColumnDescriptor::varchar("id", 36).key())
                .with_column(
                    ColumnDescriptor::varchar("type", 255).with_json_name("credentialType"),
                )
                .with_column(ColumnDescriptor::int8("created_date"))
                .with_column(ColumnDescriptor::int4("priority"))
                .with_column(ColumnDescriptor::timestamp("rotated_at").required()),
        )
    }

    #[test]
    fn test_new_record_initial_values() {
        let record = Record::new(credential_table());
        assert_eq!(record.get("id"), Some(&Value::Text(String::new())));
        assert_eq!(record.get("type"), Some(&Value::Null));
        assert_eq!(
            record.get("rotated_at"),
            Some(&Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH))
        );
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_set_enforces_type_domain() {
        let mut record = Record::new(credential_table());
        record.set("created_date", 1_700_000_000_000i64).unwrap();
        record.set("priority", 10).unwrap();

        let err = record.set("priority", 10i64).unwrap_err();
        assert_eq!(
            err,
            RecordError::TypeMismatch {
                column: "priority".into(),
                expected: DatabaseType::Int4,
                found: "int8".into(),
            }
        );
        assert_eq!(
            record.set("id", None::<String>),
            Err(RecordError::NullViolation("id".into()))
        );
        assert!(matches!(
            record.set("salt", "x"),
            Err(RecordError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_json_uses_external_names() {
        let mut record = Record::new(credential_table());
        record.set("id", "c-1").unwrap();
        record.set("type", "password").unwrap();
        record
            .set("rotated_at", Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
            .unwrap();

        let json = record.to_json();
        assert_eq!(json["credentialType"], "password");
        assert!(json.get("type").is_none());
        assert_eq!(json["rotated_at"], "2024-01-15T10:30:00+00:00");

        let serialized = serde_json::to_value(&record).unwrap();
        assert_eq!(serialized, json);

        let parsed = Record::from_json(credential_table(), &json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        let table = credential_table();
        let too_big = 1i64 << 40;
        assert_eq!(
            Record::from_json(Arc::clone(&table), &serde_json::json!([1, 2])),
            Err(RecordError::NotAnObject("credential".into()))
        );
        assert!(matches!(
            Record::from_json(Arc::clone(&table), &serde_json::json!({"priority": too_big})),
            Err(RecordError::TypeMismatch { .. })
        ));
        assert!(matches!(
            Record::from_json(Arc::clone(&table), &serde_json::json!({"type": "x"})),
            Err(RecordError::UnknownColumn { .. })
        ));
        assert_eq!(
            Record::from_json(table, &serde_json::json!({"id": null})),
            Err(RecordError::NullViolation("id".into()))
        );
    }

    #[test]
    fn test_tagged_values_and_keys() {
        let mut record = Record::new(credential_table());
        record.set("id", "c-9").unwrap();

        let tags: Vec<u32> = record.tagged_values().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            record.primary_key_values(),
            vec![("id", &Value::Text("c-9".into()))]
        );
    }
}
