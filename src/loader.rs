//! Reading documents from disk into a [`Table`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::value::{Table, Value, ValueKind};


#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    #[error("could not read document at {}", path.display())]
    #[diagnostic(code(nestcfg::load::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML document")]
    #[diagnostic(code(nestcfg::load::yaml))]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },

    #[error("invalid TOML document")]
    #[diagnostic(code(nestcfg::load::toml))]
    Toml {
        #[from]
        source: toml::de::Error,
    },

    #[error(
        "the top level of {} must be a mapping, found a {found}",
        describe_origin(path.as_deref())
    )]
    #[diagnostic(
        code(nestcfg::load::not_a_mapping),
        help("wrap the content in a key, e.g. `items: [...]`")
    )]
    NotAMapping {
        /// `None` when parsing a string that did not come from a file.
        path: Option<PathBuf>,
        found: ValueKind,
    },
}

fn describe_origin(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "the document".to_string(),
    }
}

impl LoadError {
    /// Attaches the file the document came from, where the error can carry it.
    fn with_path(self, document_path: &Path) -> Self {
        match self {
            LoadError::NotAMapping { path: None, found } => LoadError::NotAMapping {
                path: Some(document_path.to_path_buf()),
                found,
            },
            other => other,
        }
    }
}


/// Supported on-disk formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Picks the format from the file extension: `.toml` is TOML, everything else is YAML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}


/// Parses `contents` into a document.
///
/// Empty and null documents become an empty table. YAML merge keys (`<<: *anchor`)
/// are applied and tags (`!custom value`) are dropped, keeping the tagged content.
pub fn parse_document(contents: &str, format: DocumentFormat) -> Result<Table, LoadError> {
    if contents.trim().is_empty() {
        return Ok(Table::new());
    }

    let value = match format {
        DocumentFormat::Yaml => {
            let mut yaml = serde_yaml::from_str::<serde_yaml::Value>(contents)?;
            yaml.apply_merge()?;
            Value::deserialize(yaml)?
        }
        DocumentFormat::Toml => toml::from_str::<Value>(contents)?,
    };

    match value {
        Value::Mapping(table) => Ok(table),
        Value::Null => Ok(Table::new()),
        other => Err(LoadError::NotAMapping {
            path: None,
            found: other.kind(),
        }),
    }
}

/// Reads and parses the document at `path`, picking the format from its extension.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Table, LoadError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path);

    let contents = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document = parse_document(&contents, format).map_err(|error| error.with_path(path))?;

    debug!(
        path = %path.display(),
        ?format,
        top_level_keys = document.len(),
        "Document loaded."
    );

    Ok(document)
}
