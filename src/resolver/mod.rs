//! Dot-path navigation over a nested document.
//!
//! A [`Resolver`] owns a handle to the root [`Table`] of a document and a separator
//! (`"."` by default). Paths are split on the separator and walked one mapping at a time.
//!
//! # Resolution rules
//! - A missing segment means "not found".
//! - If a segment's value is a mapping and more segments follow, we descend into it.
//! - Otherwise the value is returned as-is, **even if segments remain**: the rest of the
//!   path is ignored. `resolve("port.extra")` on `{port: 5432}` returns `5432`.
//! - A path that ends on a mapping resolves to that mapping.
//!
//! # Failure policy
//! The typed getters never fail: a missing value, a value of the wrong shape, or a value
//! that cannot be converted all produce the zero value of the requested type.
//! Use [`Resolver::has_key`] to tell "absent" from "zero", or the `try_get*` family
//! if you need to know why a lookup failed.
//!
//! # Sharing
//! Resolvers are cheap handles. [`Resolver::nested`] and [`Clone`] share the underlying
//! storage, so [`Resolver::set`] through one handle is visible through the others.
//! Nothing here locks: the types are `!Send` and `!Sync`, and mutation from several places
//! at once needs synchronization provided by the caller.

use std::path::Path;

use tracing::{debug, trace};

pub use self::error::LookupError;
pub use self::path::DEFAULT_SEPARATOR;
use self::path::{normalize_separator, KeyPath};
use crate::{
    configuration::DocumentOptions,
    loader::{load_document, LoadError},
    value::{Table, Value},
};

mod error;
mod path;
mod typed;

#[cfg(test)]
mod tests;



/// The shape a key must have for [`Resolver::has_key`] to report it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyKind {
    /// Any value, including null.
    #[default]
    Any,
    Mapping,
    Sequence,
}


#[derive(Clone, Debug)]
pub struct Resolver {
    document: Table,
    separator: String,
}

impl Resolver {
    /// Creates a resolver over `document` using the default separator.
    pub fn new(document: Table) -> Self {
        Self::with_separator(document, DEFAULT_SEPARATOR)
    }

    /// Creates a resolver over `document` using `separator`.
    /// An empty separator falls back to [`DEFAULT_SEPARATOR`].
    pub fn with_separator<S: AsRef<str>>(document: Table, separator: S) -> Self {
        Self {
            document,
            separator: normalize_separator(separator.as_ref()),
        }
    }

    /// A resolver over an empty document: every key is absent.
    pub fn empty() -> Self {
        Self::new(Table::new())
    }

    /// Loads the document described by `options`.
    pub fn from_options(options: &DocumentOptions) -> Result<Self, LoadError> {
        Self::load(&options.source, &options.separator)
    }

    /// Loads the document at `source` (YAML or TOML, see [`load_document`]).
    pub fn load<P: AsRef<Path>>(source: P, separator: &str) -> Result<Self, LoadError> {
        let document = load_document(source)?;
        Ok(Self::with_separator(document, separator))
    }


    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// The root table of this resolver (shared, not a copy).
    pub fn document(&self) -> &Table {
        &self.document
    }

    /// Joins `segments` into a path using this resolver's separator.
    pub fn compose<S: AsRef<str>>(&self, segments: &[S]) -> String {
        segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(&self.separator)
    }


    /// Walks `path` and returns the value it resolves to, if any.
    ///
    /// See the [module documentation](self) for the exact rules.
    pub fn resolve(&self, path: &str) -> Option<Value> {
        let key_path = KeyPath::parse(path, &self.separator);
        let last_index = key_path.last_index();

        let mut current = self.document.clone();
        for (index, segment) in key_path.segments().iter().enumerate() {
            let Some(value) = current.get(segment) else {
                trace!(path, segment, "Key not found.");
                return None;
            };

            match value {
                Value::Mapping(table) if index < last_index => current = table,
                value => return Some(value),
            }
        }

        // Unreachable in practice: a key path always has at least one segment.
        Some(Value::Mapping(current))
    }

    /// Resolves `path` and returns it only if it is a mapping.
    pub fn resolve_mapping(&self, path: &str) -> Option<Table> {
        match self.resolve(path)? {
            Value::Mapping(table) => Some(table),
            other => {
                trace!(path, found = %other.kind(), "Expected a mapping.");
                None
            }
        }
    }

    /// Resolves `path` and returns it only if it is a sequence.
    pub fn resolve_sequence(&self, path: &str) -> Option<Vec<Value>> {
        match self.resolve(path)? {
            Value::Sequence(items) => Some(items),
            other => {
                trace!(path, found = %other.kind(), "Expected a sequence.");
                None
            }
        }
    }

    /// Reports whether `path` resolves to a value of the given shape.
    pub fn has_key(&self, path: &str, kind: KeyKind) -> bool {
        match kind {
            KeyKind::Any => self.resolve(path).is_some(),
            KeyKind::Mapping => self.resolve_mapping(path).is_some(),
            KeyKind::Sequence => self.resolve_sequence(path).is_some(),
        }
    }

    /// Returns the keys of the mapping at `path` in declaration order,
    /// or nothing if `path` does not resolve to a mapping.
    pub fn keys(&self, path: &str) -> Vec<String> {
        self.resolve_mapping(path)
            .map(|table| table.keys())
            .unwrap_or_default()
    }

    /// Returns a resolver scoped to the mapping at `path`.
    ///
    /// The new resolver shares storage with this one. If `path` does not resolve to a
    /// mapping, the returned resolver is backed by a fresh, detached empty table.
    pub fn nested(&self, path: &str) -> Resolver {
        let document = self.resolve_mapping(path).unwrap_or_else(|| {
            debug!(path, "No mapping to scope into, using an empty document.");
            Table::new()
        });

        Resolver {
            document,
            separator: self.separator.clone(),
        }
    }

    /// Stores `value` at `path`, creating intermediate mappings as needed.
    ///
    /// An intermediate key that holds anything other than a mapping is **replaced**
    /// with a new empty mapping; its previous value is lost.
    ///
    /// Returns `false` (and leaves the document untouched) only for an empty path.
    pub fn set<V: Into<Value>>(&self, path: &str, value: V) -> bool {
        if path.is_empty() {
            trace!("Refusing to set a value at an empty path.");
            return false;
        }

        let key_path = KeyPath::parse(path, &self.separator);
        let Some((last, parents)) = key_path.split_last() else {
            return false;
        };

        let mut current = self.document.clone();
        for segment in parents {
            current = match current.get_table(segment) {
                Some(table) => table,
                None => {
                    if let Some(found) = current.kind_of(segment) {
                        trace!(
                            path,
                            segment,
                            %found,
                            "Overwriting non-mapping value with a mapping."
                        );
                    }

                    let table = Table::new();
                    current.insert(*segment, table.clone());
                    table
                }
            };
        }

        current.insert(last, value);
        true
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::empty()
    }
}
