use indexmap::IndexMap;

use super::*;
use crate::{coercion::CoercionError, value::ValueKind};


fn database_document() -> Table {
    let db = Table::from_iter([
        ("host", Value::from("localhost")),
        ("port", Value::from("5432")),
        ("enabled", Value::from("true")),
    ]);

    Table::from_iter([("db", db)])
}

fn sample_resolver() -> Resolver {
    let limits = Table::from_iter([
        ("connections", Value::from(100)),
        ("ratio", Value::from(0.75)),
        ("strict", Value::from(false)),
    ]);

    let document = Table::from_iter([
        ("name", Value::from("service")),
        ("port", Value::from(8080)),
        ("ratio", Value::from(2.5)),
        ("debug", Value::from(true)),
        ("limits", Value::from(limits)),
        (
            "hosts",
            Value::from(vec![Value::from("a"), Value::from("b")]),
        ),
        (
            "ports",
            Value::from(vec![Value::from(1), Value::from("2"), Value::from("x")]),
        ),
    ]);

    Resolver::new(document)
}


#[test]
fn database_scenario() {
    let resolver = Resolver::new(database_document());

    assert_eq!(resolver.get_int("db.port"), 5432);
    assert!(resolver.get_bool("db.enabled"));
    assert_eq!(resolver.get_string("db.missing"), "");

    let db = resolver.nested("db");
    assert_eq!(db.get_string("host"), "localhost");
}

#[test]
fn missing_paths_yield_zero_values() {
    let resolver = sample_resolver();

    for path in ["No.Exists", "missing", "limits.missing", ""] {
        assert_eq!(resolver.get_string(path), "");
        assert_eq!(resolver.get_int(path), 0);
        assert_eq!(resolver.get_float(path), 0.0);
        assert!(!resolver.get_bool(path));
        assert_eq!(resolver.get(path), Value::Null);
        assert!(resolver.get_map(path).is_empty());
        assert!(resolver.get_map_string(path).is_empty());
        assert!(resolver.get_map_int(path).is_empty());
        assert!(resolver.get_map_float(path).is_empty());
        assert!(resolver.get_map_bool(path).is_empty());
        assert!(resolver.get_slice(path).is_empty());
        assert!(resolver.get_slice_string(path).is_empty());
        assert!(resolver.get_slice_int(path).is_empty());
        assert!(resolver.get_slice_float(path).is_empty());
        assert!(resolver.get_slice_bool(path).is_empty());
        assert!(resolver.keys(path).is_empty());
        assert!(!resolver.has_key(path, KeyKind::Any));
    }
}

#[test]
fn resolution_short_circuits_on_non_mappings() {
    let resolver = sample_resolver();

    assert_eq!(resolver.resolve("port.anything.else"), Some(Value::Integer(8080)));
    assert_eq!(
        resolver.resolve("limits.connections.extra"),
        Some(Value::Integer(100))
    );
    assert_eq!(resolver.get_int("port.anything"), 8080);
    assert!(resolver.has_key("hosts.0", KeyKind::Sequence));
}

#[test]
fn resolution_ending_on_a_mapping_returns_it() {
    let resolver = sample_resolver();

    let limits = resolver.resolve("limits").and_then(|value| value.as_table().cloned());
    assert_eq!(
        limits.map(|table| table.keys()),
        Some(vec![
            "connections".to_string(),
            "ratio".to_string(),
            "strict".to_string()
        ])
    );

    // Scalar getters on a mapping fail coercion.
    assert_eq!(resolver.get_string("limits"), "");
    assert_eq!(resolver.get_int("limits"), 0);
}

#[test]
fn empty_document_has_nothing() {
    let resolver = Resolver::empty();

    assert_eq!(resolver.resolve("a"), None);
    assert_eq!(resolver.resolve(""), None);
    assert!(resolver.keys("").is_empty());
    assert!(!resolver.has_key("a.b", KeyKind::Any));
}

#[test]
fn scalar_getters_coerce() {
    let resolver = sample_resolver();

    assert_eq!(resolver.get_string("port"), "8080");
    assert_eq!(resolver.get_string("ratio"), "2.500000");
    assert_eq!(resolver.get_string("debug"), "true");
    assert_eq!(resolver.get_int("ratio"), 0);
    assert_eq!(resolver.get_float("port"), 8080.0);
    assert_eq!(resolver.get_float("limits.ratio"), 0.75);
    assert!(!resolver.get_bool("port"));
    assert_eq!(resolver.get_as::<i64>("limits.connections"), 100);
}

#[test]
fn mapping_getters() {
    let resolver = sample_resolver();

    let raw = resolver.get_map("limits");
    assert_eq!(raw.len(), 3);
    assert_eq!(raw["connections"], Value::Integer(100));

    let strings = resolver.get_map_string("limits");
    assert_eq!(strings["connections"], "100");
    assert_eq!(strings["ratio"], "0.750000");
    assert_eq!(strings["strict"], "false");

    let integers = resolver.get_map_int("limits");
    assert_eq!(integers["connections"], 100);
    assert_eq!(integers["ratio"], 0);

    let floats = resolver.get_map_float("limits");
    assert_eq!(floats["ratio"], 0.75);
    assert_eq!(floats["strict"], 0.0);

    let booleans = resolver.get_map_bool("limits");
    assert_eq!(booleans.len(), 3);
    assert!(!booleans["strict"]);

    // A scalar is not coerced into a mapping.
    assert!(resolver.get_map("port").is_empty());
}

#[test]
fn sequence_getters() {
    let resolver = sample_resolver();

    assert_eq!(resolver.get_slice_string("hosts"), vec!["a", "b"]);
    assert_eq!(resolver.get_slice_int("ports"), vec![1, 2, 0]);
    assert_eq!(resolver.get_slice_float("ports"), vec![1.0, 2.0, 0.0]);
    assert_eq!(resolver.get_slice_bool("hosts"), vec![false, false]);
    assert_eq!(resolver.get_slice("hosts").len(), 2);

    assert!(resolver.get_slice("limits").is_empty());
    assert!(resolver.get_slice_string("name").is_empty());
}

#[test]
fn has_key_checks_shape() {
    let resolver = sample_resolver();

    assert!(resolver.has_key("limits", KeyKind::Any));
    assert!(resolver.has_key("limits", KeyKind::Mapping));
    assert!(!resolver.has_key("limits", KeyKind::Sequence));

    assert!(resolver.has_key("hosts", KeyKind::Sequence));
    assert!(!resolver.has_key("hosts", KeyKind::Mapping));

    assert!(resolver.has_key("name", KeyKind::Any));
    assert!(!resolver.has_key("name", KeyKind::Mapping));
}

#[test]
fn has_key_distinguishes_null_from_absent() {
    let resolver = Resolver::new(Table::from_iter([("tls", Value::Null)]));

    assert!(resolver.has_key("tls", KeyKind::Any));
    assert!(!resolver.has_key("ssl", KeyKind::Any));
    assert_eq!(resolver.get_string("tls"), "");
}

#[test]
fn keys_follow_declaration_order() {
    let resolver = Resolver::new(Table::from_iter([(
        "point",
        Table::from_iter([("y", 2), ("x", 1)]),
    )]));

    assert_eq!(resolver.keys("point"), vec!["y", "x"]);
    assert!(resolver.keys("point.x").is_empty());
}

#[test]
fn root_keys_via_empty_path_are_not_root() {
    // An empty path is a single empty segment, i.e. the key "".
    let resolver = Resolver::new(Table::from_iter([
        ("", Value::from(Table::from_iter([("inner", 1)]))),
        ("other", Value::from(2)),
    ]));

    assert_eq!(resolver.keys(""), vec!["inner"]);
}


#[test]
fn set_then_resolve() {
    let resolver = Resolver::empty();

    assert!(resolver.set("name", "service"));
    assert!(resolver.set("limits.connections", 10));
    assert!(resolver.set("a.b.c.d.e", true));

    assert_eq!(resolver.resolve("name"), Some(Value::from("service")));
    assert_eq!(resolver.resolve("limits.connections"), Some(Value::Integer(10)));
    assert_eq!(resolver.resolve("a.b.c.d.e"), Some(Value::Bool(true)));
}

#[test]
fn set_materializes_intermediate_mappings() {
    let resolver = Resolver::empty();

    assert!(resolver.set("a.b.c", 1));

    assert!(resolver.resolve_mapping("a").is_some());
    assert!(resolver.resolve_mapping("a.b").is_some());
    assert_eq!(resolver.keys("a"), vec!["b"]);
}

#[test]
fn set_overwrites_scalars_on_shape_conflict() {
    let resolver = Resolver::empty();

    assert!(resolver.set("a", 1));
    assert!(resolver.set("a", "two"));
    assert_eq!(resolver.get_string("a"), "two");

    assert!(resolver.set("a.b", 3));
    assert_eq!(resolver.get_map_int("a"), IndexMap::from([("b".to_string(), 3)]));
}

#[test]
fn set_walks_existing_tables_and_replaces_sequences_in_place() {
    let db = database_document().get_table("db").unwrap();
    let document = Table::from_iter([
        ("replicas", Value::from(vec![Value::from("db-1"), Value::from("db-2")])),
        ("db", Value::from(db.clone())),
    ]);
    let resolver = Resolver::new(document.clone());

    assert!(resolver.set("db.pool.size", 4));
    assert!(resolver.set("replicas.primary", "db-1"));

    assert!(document.get_table("db").is_some_and(|table| table.ptr_eq(&db)));
    assert_eq!(db.keys(), vec!["host", "port", "enabled", "pool"]);
    assert_eq!(document.keys(), vec!["replicas", "db"]);
    assert_eq!(document.kind_of("replicas"), Some(ValueKind::Mapping));
    assert_eq!(resolver.get_string("replicas.primary"), "db-1");
}

#[test]
fn set_merges_into_existing_mappings() {
    let resolver = Resolver::new(database_document());

    assert!(resolver.set("db.user", "admin"));

    assert_eq!(resolver.keys("db"), vec!["host", "port", "enabled", "user"]);
    assert_eq!(resolver.get_string("db.host"), "localhost");
}

#[test]
fn set_rejects_an_empty_path() {
    let document = database_document();
    let resolver = Resolver::new(document.clone());

    assert!(!resolver.set("", 1));
    assert_eq!(document, database_document());
}

#[test]
fn set_with_custom_separator() {
    let resolver = Resolver::with_separator(Table::new(), "/");

    assert!(resolver.set("server/http.port", 80));

    assert_eq!(resolver.keys("server"), vec!["http.port"]);
    assert_eq!(resolver.get_int("server/http.port"), 80);
    assert_eq!(resolver.compose(&["server", "http.port"]), "server/http.port");
}

#[test]
fn empty_separator_uses_default() {
    let resolver = Resolver::with_separator(database_document(), "");

    assert_eq!(resolver.separator(), DEFAULT_SEPARATOR);
    assert_eq!(resolver.get_int("db.port"), 5432);
}


#[test]
fn nested_scopes_share_storage_with_the_parent() {
    let resolver = Resolver::new(database_document());
    let db = resolver.nested("db");

    assert!(db.set("pool.size", 8));
    assert_eq!(resolver.get_int("db.pool.size"), 8);

    assert!(resolver.set("db.host", "db.internal"));
    assert_eq!(db.get_string("host"), "db.internal");

    assert!(db.document().ptr_eq(&resolver.resolve_mapping("db").unwrap()));
}

#[test]
fn nested_scope_of_non_mapping_is_detached_and_empty() {
    let resolver = Resolver::with_separator(database_document(), "::");

    for path in ["db::port", "missing", "db::host::deeper"] {
        let scope = resolver.nested(path);

        assert!(scope.document().is_empty());
        assert!(!scope.document().ptr_eq(resolver.document()));
        assert_eq!(scope.separator(), "::");

        assert!(scope.set("x", 1));
        assert!(!resolver.has_key("x", KeyKind::Any));
    }
}

#[test]
fn nested_scope_keeps_the_separator() {
    let document = Table::from_iter([(
        "a",
        Table::from_iter([("b", Table::from_iter([("c", 1)]))]),
    )]);
    let resolver = Resolver::with_separator(document, "/");

    let scope = resolver.nested("a");
    assert_eq!(scope.separator(), "/");
    assert_eq!(scope.get_int("b/c"), 1);
}


#[test]
fn strict_getters_explain_failures() {
    let resolver = sample_resolver();

    assert_eq!(resolver.try_get::<i64>("port"), Ok(8080));
    assert_eq!(
        resolver.try_get::<i64>("missing"),
        Err(LookupError::NotFound {
            path: "missing".to_string()
        })
    );
    assert_eq!(
        resolver.try_get::<i64>("ratio"),
        Err(LookupError::Coercion {
            path: "ratio".to_string(),
            source: CoercionError::NotIntegral { value: 2.5 },
        })
    );

    assert!(resolver.try_get_map("limits").is_ok());
    assert_eq!(
        resolver.try_get_map("hosts"),
        Err(LookupError::ShapeMismatch {
            path: "hosts".to_string(),
            expected: ValueKind::Mapping,
            found: ValueKind::Sequence,
        })
    );

    assert_eq!(resolver.try_get_slice("hosts").map(|items| items.len()), Ok(2));
    assert!(matches!(
        resolver.try_get_slice("name"),
        Err(LookupError::ShapeMismatch {
            found: ValueKind::String,
            ..
        })
    ));
}
