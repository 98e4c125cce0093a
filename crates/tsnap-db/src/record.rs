//! Table-agnostic row description used by the unit of work.
//!
//! Every model exposes its table name and an ordered list of
//! `(column, Value)` pairs. Storage backends build their statements from that
//! list, so adding a column to a model is a one-line change.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// A single column value, typed for binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(Option<i32>),
    BigInt(Option<i64>),
    Float(Option<f64>),
    Bool(Option<bool>),
    Text(Option<String>),
    Date(Option<NaiveDate>),
}

impl Value {
    /// Whether the value is SQL NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Value::Int(v) => v.is_none(),
            Value::BigInt(v) => v.is_none(),
            Value::Float(v) => v.is_none(),
            Value::Bool(v) => v.is_none(),
            Value::Text(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(Some(value))
                }
            }

            impl From<Option<$ty>> for Value {
                fn from(value: Option<$ty>) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_value_from! {
    i32 => Int,
    i64 => BigInt,
    f64 => Float,
    bool => Bool,
    String => Text,
    NaiveDate => Date,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(Some(value.to_string()))
    }
}

/// Equality filter on one column.
///
/// A filter whose value is NULL never matches, mirroring SQL `col = NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: Value,
}

impl Filter {
    /// Match rows whose `column` equals `value`.
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    /// Match the row with the given primary key.
    #[must_use]
    pub fn id(id: i64) -> Self {
        Self::eq("id", id)
    }
}

/// A model persisted in one table.
pub trait Record:
    for<'r> FromRow<'r, PgRow> + Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static
{
    /// Table name.
    const TABLE: &'static str;

    /// Whether storage assigns the primary key. Tables keyed by an
    /// upstream identifier set this to `false` and insert their own id.
    const GENERATED_ID: bool = true;

    /// Primary key, `None` until the row is inserted.
    fn id(&self) -> Option<i64>;

    /// Record the primary key assigned by storage.
    fn set_id(&mut self, id: i64);

    /// Every non-key column with its current value, in declaration order.
    fn columns(&self) -> Vec<(&'static str, Value)>;
}
