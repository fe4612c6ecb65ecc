use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;

use crate::{
    configuration::{traits::ResolvableConfigurationWithContext, utilities::resolve_relative_to},
    resolver::DEFAULT_SEPARATOR,
};


#[derive(Deserialize, Clone, Debug)]
pub(crate) struct UnresolvedDocumentOptions {
    /// Path to the YAML or TOML document.
    source: String,

    /// Key path separator, `"."` if missing or empty.
    #[serde(default)]
    separator: Option<String>,
}

impl UnresolvedDocumentOptions {
    pub(crate) fn new<S: Into<String>>(source: S, separator: Option<String>) -> Self {
        Self {
            source: source.into(),
            separator,
        }
    }
}


/// Where to load the document from and how to address it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Canonical path of the document.
    pub source: PathBuf,

    /// Key path separator (never empty).
    pub separator: String,
}

impl ResolvableConfigurationWithContext for UnresolvedDocumentOptions {
    type Resolved = DocumentOptions;
    type Context = Path;

    fn resolve(self, context: &Self::Context) -> Result<Self::Resolved> {
        let source = resolve_relative_to(self.source, context);

        if !source.is_file() {
            return Err(miette!(
                "Document source {} does not exist or is not a file.",
                source.display()
            ));
        }

        let source = dunce::canonicalize(&source)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to canonicalize document path {}.", source.display()))?;


        let separator = match self.separator {
            Some(separator) if !separator.is_empty() => separator,
            _ => DEFAULT_SEPARATOR.to_string(),
        };


        Ok(DocumentOptions { source, separator })
    }
}
