use std::fs;
use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;

pub use self::document::DocumentOptions;
use self::document::UnresolvedDocumentOptions;
pub use self::logging::LoggingConfiguration;
use self::logging::UnresolvedLoggingConfiguration;
use super::traits::ResolvableConfigurationWithContext;
use super::utilities::get_default_configuration_file_path;
use crate::{loader::LoadError, resolver::Resolver};

mod document;
mod logging;



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// The document to serve.
    document: UnresolvedDocumentOptions,

    /// Logging-related configuration.
    #[serde(default)]
    logging: UnresolvedLoggingConfiguration,
}


/// The entire configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// This is the file path this `Configuration` instance was loaded from
    /// (`None` if it was assembled from a document path alone).
    pub file_path: Option<PathBuf>,

    /// Which document to load and how to address it.
    pub document: DocumentOptions,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,
}


impl ResolvableConfigurationWithContext for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = Path;

    /// `context` is the canonical path of the configuration file.
    fn resolve(self, context: &Self::Context) -> Result<Self::Resolved> {
        let base_directory = context.parent().unwrap_or_else(|| Path::new("."));

        let document = self
            .document
            .resolve(base_directory)
            .wrap_err("Failed to resolve document table.")?;

        let logging = self
            .logging
            .resolve(base_directory)
            .wrap_err("Failed to resolve logging table.")?;


        Ok(Configuration {
            file_path: Some(context.to_path_buf()),
            document,
            logging,
        })
    }
}


impl Configuration {
    /// Load the configuration from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(configuration_file_path: S) -> Result<Self> {
        let configuration_file_path = configuration_file_path.as_ref();

        // Read the configuration file into memory.
        let configuration_string = fs::read_to_string(configuration_file_path)
            .into_diagnostic()
            .wrap_err_with(|| {
                miette!(
                    "Could not read configuration file {}.",
                    configuration_file_path.display()
                )
            })?;


        // Parse the string into the `UnresolvedConfiguration` structure and then resolve it.
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(&configuration_string)
                .into_diagnostic()
                .wrap_err("Could not parse configuration file!")?;


        let configuration_file_path = dunce::canonicalize(configuration_file_path)
            .into_diagnostic()
            .wrap_err("Could not canonicalize configuration file path!")?;

        let resolved_configuration = unresolved_configuration
            .resolve(&configuration_file_path)
            .wrap_err("Failed to resolve configuration.")?;

        Ok(resolved_configuration)
    }

    /// Load the configuration from the default path (`./nestcfg.toml`).
    pub fn load_from_default_path() -> Result<Configuration> {
        Configuration::load_from_path(
            get_default_configuration_file_path()
                .wrap_err_with(|| "Could not load configuration file at default path.")?,
        )
    }

    /// Assemble a configuration without a configuration file: the document at `source`
    /// (relative to the current directory) and default logging settings.
    pub fn from_source<S: AsRef<Path>>(source: S, separator: Option<&str>) -> Result<Self> {
        let current_directory = std::env::current_dir()
            .into_diagnostic()
            .wrap_err("Could not get the current directory.")?;

        let document = UnresolvedDocumentOptions::new(
            source.as_ref().to_string_lossy(),
            separator.map(str::to_string),
        )
        .resolve(&current_directory)
        .wrap_err("Failed to resolve document source.")?;

        let logging = UnresolvedLoggingConfiguration::default()
            .resolve(&current_directory)
            .wrap_err("Failed to resolve default logging configuration.")?;


        Ok(Configuration {
            file_path: None,
            document,
            logging,
        })
    }

    /// Replace the document source and/or separator (e.g. from command-line arguments).
    /// A new `source` is interpreted relative to the current directory.
    pub fn with_document_overrides(
        mut self,
        source: Option<&Path>,
        separator: Option<&str>,
    ) -> Result<Self> {
        let current_directory = std::env::current_dir()
            .into_diagnostic()
            .wrap_err("Could not get the current directory.")?;

        let source = source.unwrap_or(self.document.source.as_path());
        let separator = separator.unwrap_or(self.document.separator.as_str());

        self.document = UnresolvedDocumentOptions::new(
            source.to_string_lossy(),
            Some(separator.to_string()),
        )
        .resolve(&current_directory)
        .wrap_err("Failed to resolve overridden document options.")?;

        Ok(self)
    }

    /// Load the configured document into a [`Resolver`].
    pub fn open_document(&self) -> Result<Resolver, LoadError> {
        Resolver::from_options(&self.document)
    }
}
