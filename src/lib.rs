//! Dot-path addressed, leniently typed access to nested YAML/TOML documents.
//!
//! ```
//! use nestcfg::{loader::{parse_document, DocumentFormat}, KeyKind, Resolver};
//!
//! let document = parse_document(
//!     "db:\n  host: localhost\n  port: \"5432\"\n  enabled: \"true\"\n",
//!     DocumentFormat::Yaml,
//! )?;
//! let config = Resolver::new(document);
//!
//! assert_eq!(config.get_int("db.port"), 5432);
//! assert!(config.get_bool("db.enabled"));
//! assert_eq!(config.get_string("db.missing"), "");
//! assert!(!config.has_key("db.missing", KeyKind::Any));
//!
//! let db = config.nested("db");
//! assert_eq!(db.get_string("host"), "localhost");
//! # Ok::<(), nestcfg::loader::LoadError>(())
//! ```
//!
//! The modules, leaf first:
//! - [`value`]: the untyped document model ([`Value`], shared [`Table`]s),
//! - [`coercion`]: conversions from [`Value`] into Rust types,
//! - [`resolver`]: path resolution, typed getters and `set`,
//! - [`loader`] and [`configuration`]: getting a document off disk.

pub mod coercion;
pub mod configuration;
pub mod loader;
pub mod resolver;
pub mod value;

pub use coercion::{Coerce, CoercionError};
pub use resolver::{KeyKind, LookupError, Resolver, DEFAULT_SEPARATOR};
pub use value::{Table, Value, ValueKind};
