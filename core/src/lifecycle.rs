//! Lifecycle hooks a persistence layer invokes around save and query
//! operations.
//!
//! Every hook has a default implementation that does nothing and succeeds.
//! They are extension points: a type that needs per-table defaulting or
//! checks overrides the relevant method. No rules are applied here.
//!
//! ```
//! use std::sync::Arc;
//! use iam_schema_core::{Action, ColumnDescriptor, Lifecycle, Record, TableDescriptor};
//!
//! let table = Arc::new(
//!     TableDescriptor::new("realm").with_column(ColumnDescriptor::varchar("id", 36).key()),
//! );
//! let mut realm = Record::new(table);
//!
//! realm.prepare();
//! assert!(realm.validate(&Action::Create).is_ok());
//! assert!(realm.before_save().is_ok());
//! assert_eq!(realm.table_name(), "realm");
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::record::{Record, RecordError};
use crate::types::TableDescriptor;

/// CRUD action passed to [`Lifecycle::validate`].
///
/// Any string parses into an action; names outside the known set become
/// [`Action::Other`].
///
/// # Examples
///
/// ```
/// use iam_schema_core::Action;
///
/// assert_eq!(Action::from("retrieveMany"), Action::RetrieveMany);
/// assert_eq!(Action::from("archive"), Action::Other("archive".into()));
/// assert_eq!(Action::FetchDdl.to_string(), "fetchDDL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    RetrieveOne,
    RetrieveMany,
    Update,
    Delete,
    FetchDdl,
    /// An action this crate does not know about.
    Other(String),
}

impl Action {
    /// The known actions.
    pub const KNOWN: [Action; 6] = [
        Action::Create,
        Action::RetrieveOne,
        Action::RetrieveMany,
        Action::Update,
        Action::Delete,
        Action::FetchDdl,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Action::Create => "create",
            Action::RetrieveOne => "retrieveOne",
            Action::RetrieveMany => "retrieveMany",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::FetchDdl => "fetchDDL",
            Action::Other(name) => name,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        match name {
            "create" => Action::Create,
            "retrieveOne" => Action::RetrieveOne,
            "retrieveMany" => Action::RetrieveMany,
            "update" => Action::Update,
            "delete" => Action::Delete,
            "fetchDDL" => Action::FetchDdl,
            other => Action::Other(other.to_string()),
        }
    }
}

impl FromStr for Action {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Action::from(s))
    }
}

/// Hooks around a record's save/validate cycle.
pub trait Lifecycle {
    /// Physical table name of the record.
    fn table_name(&self) -> &str;

    /// Table metadata of the record.
    fn table_info(&self) -> &TableDescriptor;

    /// Normalizes or defaults fields before persistence. Does nothing by
    /// default.
    fn prepare(&mut self) {}

    /// Checks the record before `action`. Always succeeds by default, for
    /// every action including unknown ones.
    fn validate(&self, _action: &Action) -> Result<(), RecordError> {
        Ok(())
    }

    /// Runs right before the record is persisted. Always succeeds by
    /// default.
    fn before_save(&mut self) -> Result<(), RecordError> {
        Ok(())
    }
}

impl Lifecycle for Record {
    fn table_name(&self) -> &str {
        &self.descriptor().name
    }

    fn table_info(&self) -> &TableDescriptor {
        self.descriptor()
    }
}
