use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Installs the global tracing subscriber.
///
/// Console output goes to stderr (stdout carries command output). If `log_file_output`
/// is set, events passing its filter are also appended to `log_file_name` inside
/// that directory; the returned guard must be kept alive until exit so the file is flushed.
pub fn initialize_tracing(
    console_level_filter: EnvFilter,
    log_file_output: Option<(EnvFilter, &Path)>,
    log_file_name: &str,
) -> Result<Option<WorkerGuard>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level_filter);


    let (file_layer, guard) = match log_file_output {
        Some((file_level_filter, log_file_output_directory)) => {
            std::fs::create_dir_all(log_file_output_directory)
                .into_diagnostic()
                .wrap_err_with(|| {
                    miette!(
                        "Failed to create log file directory at {}.",
                        log_file_output_directory.display()
                    )
                })?;

            let file_appender =
                tracing_appender::rolling::never(log_file_output_directory, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking_file)
                .with_filter(file_level_filter);

            (Some(file_layer), Some(guard))
        }
        None => (None, None),
    };


    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install tracing subscriber.")?;

    Ok(guard)
}
