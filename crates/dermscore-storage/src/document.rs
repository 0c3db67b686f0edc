use std::cmp::Ordering;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StorageError;

/// Maximum number of values in a single [`Filter::In`].
pub const MAX_IN_VALUES: usize = 10;

/// One document as read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub id: String,
    pub data: Value,
    /// Changes on every write to the document.
    pub etag: String,
}

impl Snapshot {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StorageError> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// A write guarded by a precondition on the document's prior state.
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub collection: String,
    pub id: String,
    pub op: WriteOp,
    pub precondition: Precondition,
}

impl Write {
    pub fn set(collection: &str, id: &str, data: Value, merge: bool) -> Self {
        Self {
            collection: collection.to_string(),
            id: id.to_string(),
            op: WriteOp::Set { data, merge },
            precondition: Precondition::None,
        }
    }

    pub fn create(collection: &str, id: &str, data: Value) -> Self {
        Self {
            collection: collection.to_string(),
            id: id.to_string(),
            op: WriteOp::Set { data, merge: false },
            precondition: Precondition::Absent,
        }
    }

    pub fn verify(collection: &str, id: &str, precondition: Precondition) -> Self {
        Self {
            collection: collection.to_string(),
            id: id.to_string(),
            op: WriteOp::Verify,
            precondition,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Replace the document, or with `merge` overwrite only the top-level
    /// fields present in `data`.
    Set { data: Value, merge: bool },
    /// Check the precondition without writing.
    Verify,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    None,
    Absent,
    Matches(String),
}

impl Precondition {
    pub fn holds(&self, current_etag: Option<&str>) -> bool {
        match self {
            Precondition::None => true,
            Precondition::Absent => current_etag.is_none(),
            Precondition::Matches(expected) => current_etag == Some(expected.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    In(String, Vec<Value>),
    Gte(String, Value),
    Lt(String, Value),
}

impl Filter {
    fn field(&self) -> &str {
        match self {
            Filter::Eq(f, _) | Filter::In(f, _) | Filter::Gte(f, _) | Filter::Lt(f, _) => f,
        }
    }

    pub fn matches(&self, data: &Value) -> bool {
        let Some(actual) = data.get(self.field()) else {
            return false;
        };
        match self {
            Filter::Eq(_, expected) => compare_values(actual, expected) == Some(Ordering::Equal),
            Filter::In(_, expected) => expected
                .iter()
                .any(|e| compare_values(actual, e) == Some(Ordering::Equal)),
            Filter::Gte(_, bound) => matches!(
                compare_values(actual, bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Filter::Lt(_, bound) => compare_values(actual, bound) == Some(Ordering::Less),
        }
    }
}

/// Conjunctive filters with optional ordering and limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: &str, value: Value) -> Self {
        self.filters.push(Filter::Eq(field.to_string(), value));
        self
    }

    pub fn where_in(mut self, field: &str, values: Vec<Value>) -> Self {
        self.filters.push(Filter::In(field.to_string(), values));
        self
    }

    pub fn where_gte(mut self, field: &str, value: Value) -> Self {
        self.filters.push(Filter::Gte(field.to_string(), value));
        self
    }

    pub fn where_lt(mut self, field: &str, value: Value) -> Self {
        self.filters.push(Filter::Lt(field.to_string(), value));
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject `In` filters the store cannot fan out.
    pub fn check(&self) -> Result<(), StorageError> {
        for filter in &self.filters {
            if let Filter::In(field, values) = filter {
                if values.is_empty() {
                    return Err(StorageError::InvalidQuery(format!(
                        "'in' filter on {field} needs at least one value"
                    )));
                }
                if values.len() > MAX_IN_VALUES {
                    return Err(StorageError::InvalidQuery(format!(
                        "'in' filter on {field} has {} values (max {MAX_IN_VALUES})",
                        values.len()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn matches(&self, data: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(data))
    }
}

/// Order two JSON values of the same kind. Strings that both parse as
/// RFC 3339 timestamps compare chronologically.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => {
            match (x.parse::<jiff::Timestamp>(), y.parse::<jiff::Timestamp>()) {
                (Ok(tx), Ok(ty)) => Some(tx.cmp(&ty)),
                _ => Some(x.cmp(y)),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}
