use std::{
    cell::RefCell,
    fmt::{self, Debug, Formatter},
    rc::Rc,
};

use indexmap::IndexMap;

use super::{Value, ValueKind};


/// A shared handle to one nested mapping of the document.
///
/// Every clone of a `Table` points at the same entries, so writes made through
/// one handle are visible through all the others. Entries keep their insertion
/// (declaration) order.
///
/// The handle is reference-counted without any locking and is therefore neither
/// `Send` nor `Sync`; concurrent mutation needs synchronization provided by the caller.
/// A table must not be inserted into itself (directly or through its children).
#[derive(Clone, Default)]
pub struct Table {
    entries: Rc<RefCell<IndexMap<String, Value>>>,
}

impl Table {
    /// Creates a new, empty and unshared table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the value under `key`.
    ///
    /// Nested mappings are returned as handles to the same storage.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    /// Returns the nested table under `key`, without copying any other kind of value.
    pub fn get_table(&self, key: &str) -> Option<Table> {
        match self.entries.borrow().get(key) {
            Some(Value::Mapping(table)) => Some(table.clone()),
            _ => None,
        }
    }

    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        self.entries.borrow().get(key).map(Value::kind)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Inserts `value` under `key`, returning the previous value, if any.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn insert<K, V>(&self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.entries.borrow_mut().insert(key.into(), value.into())
    }

    /// Returns all keys in declaration order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Copies the entries of this table (one level deep: nested tables stay shared).
    pub fn snapshot(&self) -> IndexMap<String, Value> {
        self.entries.borrow().clone()
    }

    /// Returns `true` if both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Table) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    /// Runs `function` with a borrow of the entries.
    ///
    /// `function` must not mutate this table through another handle.
    pub(crate) fn with_entries<R, F>(&self, function: F) -> R
    where
        F: FnOnce(&IndexMap<String, Value>) -> R,
    {
        let entries = self.entries.borrow();
        function(&*entries)
    }
}


impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.entries.borrow() == *other.entries.borrow()
    }
}

impl Debug for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.borrow().iter()).finish()
    }
}

impl From<IndexMap<String, Value>> for Table {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self {
            entries: Rc::new(RefCell::new(entries)),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Table
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect::<IndexMap<_, _>>();

        Self::from(entries)
    }
}
