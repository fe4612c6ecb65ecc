//! Construction parameters for a [`Resolver`][crate::Resolver] and the settings
//! of the `nestcfg` tool itself, as well as methods needed to load and validate them.
//!
//! Your starting point should probably be [`Configuration::load_from_path`], or
//! [`Configuration::from_source`] when there is no configuration file.
//!
//! # Configuration file
//! ```toml
//! [document]
//! source = "app.yaml"   # relative to this file
//! separator = "."       # optional
//!
//! [logging]             # optional
//! console_output_level_filter = "warn"
//! log_file_output_level_filter = "info"
//! log_file_output_directory = "logs"
//! ```
//!
//! # Internals
//! The configuration is first deserialized into unvalidated ("unresolved") structures,
//! which are then turned into validated ("resolved") versions by
//! [`resolve`][traits::ResolvableConfigurationWithContext::resolve].
//! This is where relative paths are anchored to the configuration file's directory,
//! the document source is checked to exist and level filters are parsed.

#![allow(rustdoc::private_intra_doc_links)]

mod structure;
mod traits;
mod utilities;

pub use structure::*;
pub use utilities::DEFAULT_CONFIGURATION_FILE_NAME;
