//! serde support for [`Value`] and [`Table`].
//!
//! Deserialization works with any self-describing format (YAML, TOML, JSON, ...).

use std::fmt::{self, Formatter};

use indexmap::IndexMap;
use serde::{
    de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor},
    ser::{Serialize, Serializer},
};

use super::{Table, Value};


/// The `toml` crate hands datetimes to `deserialize_any` as a single-entry map
/// under this key. We flatten those back into their string form.
const TOML_DATETIME_KEY: &str = "$__toml_private_datetime";


impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Unsigned(value) => serializer.serialize_u64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Sequence(items) => serializer.collect_seq(items),
            Value::Mapping(table) => table.serialize(serializer),
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.with_entries(|entries| serializer.collect_map(entries))
    }
}



struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a scalar, a sequence or a mapping")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Value::Integer(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Value::from(value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Value::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut sequence: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(sequence.size_hint().unwrap_or(0));
        while let Some(item) = sequence.next_element::<Value>()? {
            items.push(item);
        }

        Ok(Value::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((MapKey(key), value)) = map.next_entry::<MapKey, Value>()? {
            entries.insert(key, value);
        }

        if entries.len() == 1 {
            if let Some(Value::String(datetime)) = entries.get(TOML_DATETIME_KEY) {
                return Ok(Value::String(datetime.clone()));
            }
        }

        Ok(Value::Mapping(Table::from(entries)))
    }

    /// YAML tags (`!custom value`) arrive as enums named after the tag.
    /// The tag is dropped and the tagged content kept.
    fn visit_enum<A>(self, data: A) -> Result<Self::Value, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (MapKey(_tag), content) = data.variant::<MapKey>()?;
        content.newtype_variant::<Value>()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Mapping(table) => Ok(table),
            Value::Null => Ok(Table::new()),
            other => Err(de::Error::custom(format!(
                "expected a mapping, found {}",
                other.kind()
            ))),
        }
    }
}



/// Mapping keys are always addressed as strings, so scalar keys
/// (e.g. `8080: ...` in YAML) are stringified while loading.
struct MapKey(String);

struct MapKeyVisitor;

impl<'de> Visitor<'de> for MapKeyVisitor {
    type Value = MapKey;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a scalar mapping key")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
        Ok(MapKey(value.to_string()))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        Ok(MapKey(value.to_string()))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
        Ok(MapKey(value.to_string()))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
        Ok(MapKey(value.to_string()))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(MapKey(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
        Ok(MapKey(value))
    }
}

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MapKeyVisitor)
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_nested_yaml() {
        let value: Value = serde_yaml::from_str(
            "db:\n  host: localhost\n  port: 5432\n  replicas: [a, b]\n  ratio: 0.5\n  tls: ~\n",
        )
        .unwrap();

        let db = value.as_table().unwrap().get("db").unwrap();
        let db = db.as_table().unwrap();

        assert_eq!(db.keys(), vec!["host", "port", "replicas", "ratio", "tls"]);
        assert_eq!(db.get("port"), Some(Value::Integer(5432)));
        assert_eq!(db.get("ratio"), Some(Value::Float(0.5)));
        assert_eq!(db.get("tls"), Some(Value::Null));
        assert_eq!(
            db.get("replicas"),
            Some(Value::Sequence(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let table: Table = serde_yaml::from_str("8080: http\ntrue: yes\n").unwrap();

        assert_eq!(table.keys(), vec!["8080", "true"]);
    }

    #[test]
    fn tagged_values_keep_their_content() {
        let table: Table = serde_yaml::from_str("host: !secret vault/db\nports: !ports [80]\n").unwrap();

        assert_eq!(table.get("host"), Some(Value::from("vault/db")));
        assert_eq!(table.get("ports"), Some(Value::Sequence(vec![Value::from(80)])));
    }

    #[test]
    fn toml_datetimes_become_strings() {
        let table: Table = toml::from_str("released = 1979-05-27T07:32:00Z\n").unwrap();

        assert_eq!(
            table.get("released"),
            Some(Value::from("1979-05-27T07:32:00Z"))
        );
    }

    #[test]
    fn serializes_back_to_yaml_in_declaration_order() {
        let table = Table::from_iter([("b", Value::from(1)), ("a", Value::from(vec![Value::from(true)]))]);

        let rendered = serde_yaml::to_string(&table).unwrap();

        assert_eq!(rendered, "b: 1\na:\n- true\n");
    }

    #[test]
    fn non_mapping_documents_are_not_tables() {
        assert!(serde_yaml::from_str::<Table>("- 1\n- 2\n").is_err());
        assert_eq!(serde_yaml::from_str::<Table>("~").unwrap(), Table::new());
    }
}
