use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::configuration::{
    traits::ResolvableConfigurationWithContext,
    utilities::resolve_relative_to,
};


fn default_console_output_level_filter() -> String {
    "warn".to_string()
}

fn default_log_file_output_level_filter() -> String {
    "info".to_string()
}


#[derive(Deserialize, Clone, Debug)]
pub(crate) struct UnresolvedLoggingConfiguration {
    #[serde(default = "default_console_output_level_filter")]
    console_output_level_filter: String,

    #[serde(default = "default_log_file_output_level_filter")]
    log_file_output_level_filter: String,

    /// No file logging unless this is set.
    #[serde(default)]
    log_file_output_directory: Option<String>,
}

impl Default for UnresolvedLoggingConfiguration {
    fn default() -> Self {
        Self {
            console_output_level_filter: default_console_output_level_filter(),
            log_file_output_level_filter: default_log_file_output_level_filter(),
            log_file_output_directory: None,
        }
    }
}


#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    pub console_output_level_filter: String,

    pub log_file_output_level_filter: String,

    pub log_file_output_directory: Option<PathBuf>,
}

fn validate_level_filter(filter: &str, field_name: &str) -> Result<()> {
    EnvFilter::try_new(filter)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to parse field {}", field_name))?;

    Ok(())
}

impl ResolvableConfigurationWithContext for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;
    type Context = Path;

    fn resolve(self, context: &Self::Context) -> Result<Self::Resolved> {
        // Validate the file and console level filters.
        validate_level_filter(
            &self.console_output_level_filter,
            "console_output_level_filter",
        )?;
        validate_level_filter(
            &self.log_file_output_level_filter,
            "log_file_output_level_filter",
        )?;


        let log_file_output_directory = self
            .log_file_output_directory
            .map(|directory| resolve_relative_to(directory, context));


        Ok(Self::Resolved {
            console_output_level_filter: self.console_output_level_filter,
            log_file_output_level_filter: self.log_file_output_level_filter,
            log_file_output_directory,
        })
    }
}

impl LoggingConfiguration {
    // Both filters were validated in `resolve`, so `EnvFilter::new` drops nothing.

    pub fn console_output_level_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.console_output_level_filter)
    }

    pub fn log_file_output_level_filter(&self) -> EnvFilter {
        EnvFilter::new(&self.log_file_output_level_filter)
    }

    /// Replaces the console filter, validating it first.
    pub fn with_console_output_level_filter<S: Into<String>>(mut self, filter: S) -> Result<Self> {
        let filter = filter.into();
        validate_level_filter(&filter, "console_output_level_filter")?;

        self.console_output_level_filter = filter;
        Ok(self)
    }
}
