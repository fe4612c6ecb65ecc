use indexmap::IndexMap;

use super::{LookupError, Resolver};
use crate::{
    coercion::{to_mapping, to_sequence, Coerce},
    value::{Table, Value, ValueKind},
};


/// Typed getters. All of them return the zero value of their type when the
/// path is missing, has the wrong shape, or cannot be converted.
impl Resolver {
    /// Returns the raw value at `path`, or [`Value::Null`].
    pub fn get(&self, path: &str) -> Value {
        self.resolve(path).unwrap_or_default()
    }

    pub fn get_as<T: Coerce>(&self, path: &str) -> T {
        self.resolve(path)
            .map(|value| T::coerce(&value))
            .unwrap_or_default()
    }

    pub fn get_string(&self, path: &str) -> String {
        self.get_as(path)
    }

    pub fn get_int(&self, path: &str) -> i64 {
        self.get_as(path)
    }

    pub fn get_float(&self, path: &str) -> f64 {
        self.get_as(path)
    }

    pub fn get_bool(&self, path: &str) -> bool {
        self.get_as(path)
    }


    /// Returns a one-level copy of the mapping at `path`.
    /// Nested mappings inside it remain shared with the document.
    pub fn get_map(&self, path: &str) -> IndexMap<String, Value> {
        self.resolve_mapping(path)
            .map(|table| table.snapshot())
            .unwrap_or_default()
    }

    pub fn get_map_of<T: Coerce>(&self, path: &str) -> IndexMap<String, T> {
        self.resolve_mapping(path)
            .map(|table| table.with_entries(to_mapping::<T>))
            .unwrap_or_default()
    }

    pub fn get_map_string(&self, path: &str) -> IndexMap<String, String> {
        self.get_map_of(path)
    }

    pub fn get_map_int(&self, path: &str) -> IndexMap<String, i64> {
        self.get_map_of(path)
    }

    pub fn get_map_float(&self, path: &str) -> IndexMap<String, f64> {
        self.get_map_of(path)
    }

    pub fn get_map_bool(&self, path: &str) -> IndexMap<String, bool> {
        self.get_map_of(path)
    }


    pub fn get_slice(&self, path: &str) -> Vec<Value> {
        self.resolve_sequence(path).unwrap_or_default()
    }

    pub fn get_slice_of<T: Coerce>(&self, path: &str) -> Vec<T> {
        self.resolve_sequence(path)
            .map(|items| to_sequence::<T>(&items))
            .unwrap_or_default()
    }

    pub fn get_slice_string(&self, path: &str) -> Vec<String> {
        self.get_slice_of(path)
    }

    pub fn get_slice_int(&self, path: &str) -> Vec<i64> {
        self.get_slice_of(path)
    }

    pub fn get_slice_float(&self, path: &str) -> Vec<f64> {
        self.get_slice_of(path)
    }

    pub fn get_slice_bool(&self, path: &str) -> Vec<bool> {
        self.get_slice_of(path)
    }
}


/// Strict getters that report why a lookup failed instead of
/// falling back to zero values.
impl Resolver {
    pub fn try_get<T: Coerce>(&self, path: &str) -> Result<T, LookupError> {
        let value = self.resolve(path).ok_or_else(|| not_found(path))?;

        T::try_coerce(&value).map_err(|source| LookupError::Coercion {
            path: path.to_string(),
            source,
        })
    }

    pub fn try_get_map(&self, path: &str) -> Result<Table, LookupError> {
        match self.resolve(path).ok_or_else(|| not_found(path))? {
            Value::Mapping(table) => Ok(table),
            other => Err(shape_mismatch(path, ValueKind::Mapping, &other)),
        }
    }

    pub fn try_get_slice(&self, path: &str) -> Result<Vec<Value>, LookupError> {
        match self.resolve(path).ok_or_else(|| not_found(path))? {
            Value::Sequence(items) => Ok(items),
            other => Err(shape_mismatch(path, ValueKind::Sequence, &other)),
        }
    }
}


fn not_found(path: &str) -> LookupError {
    LookupError::NotFound {
        path: path.to_string(),
    }
}

fn shape_mismatch(path: &str, expected: ValueKind, found: &Value) -> LookupError {
    LookupError::ShapeMismatch {
        path: path.to_string(),
        expected,
        found: found.kind(),
    }
}
