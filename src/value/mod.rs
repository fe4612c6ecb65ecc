//! The untyped document model.
//!
//! A loaded document is a tree of [`Value`]s whose inner nodes are [`Table`]s.
//! Tables are shared handles: cloning a [`Value::Mapping`] (or a [`Table`])
//! does not copy the entries, it hands out another reference to the same storage.

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;

mod serialization;
mod table;

pub use self::table::Table;



/// A single untyped document value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Explicit null (`~` in YAML), also used as the "nothing here" value.
    #[default]
    Null,

    Bool(bool),

    /// Any integer that fits into an `i64`.
    Integer(i64),

    /// Integers above `i64::MAX`. Smaller unsigned values are
    /// always normalized into [`Value::Integer`].
    Unsigned(u64),

    Float(f64),

    String(String),

    Sequence(Vec<Value>),

    /// A nested mapping (shared, see [`Table`]).
    Mapping(Table),
}

/// The dynamic type of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Unsigned,
    Float,
    String,
    Sequence,
    Mapping,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Unsigned => "unsigned integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        };

        f.write_str(name)
    }
}


impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Integer(_) => ValueKind::Integer,
            Value::Unsigned(_) => ValueKind::Unsigned,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the shared table handle if this value is a mapping.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Mapping(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string),
            _ => None,
        }
    }
}


impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => Value::Integer(value),
            Err(_) => Value::Unsigned(value),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Mapping(value)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Value::Mapping(Table::from(value))
    }
}
