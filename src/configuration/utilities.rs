use std::{
    env::current_dir,
    path::{Path, PathBuf},
};

use miette::{miette, Context, IntoDiagnostic, Result};


/// Name of the configuration file looked up in the current directory.
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "nestcfg.toml";


/// Returns the default configuration file path, which is
/// `{current directory}/nestcfg.toml`.
pub fn get_default_configuration_file_path() -> Result<PathBuf> {
    let mut configuration_file_path = current_dir()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not get the current directory."))?;
    configuration_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);

    if !configuration_file_path.is_file() {
        return Err(miette!(
            "Could not find {} in the current directory.",
            DEFAULT_CONFIGURATION_FILE_NAME
        ));
    }

    Ok(configuration_file_path)
}

/// Interprets `path` relative to `base_directory` (absolute paths are left alone).
#[must_use = "function returns the joined path"]
pub fn resolve_relative_to<S>(path: S, base_directory: &Path) -> PathBuf
where
    S: Into<PathBuf>,
{
    let path: PathBuf = path.into();

    if path.is_absolute() {
        path
    } else {
        base_directory.join(path)
    }
}
