use std::process::ExitCode;

use clap::Parser;
use miette::{miette, Context, IntoDiagnostic, Result};
use nestcfg::{configuration::Configuration, Resolver, Value};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    cli::{parse_value_argument, CLIArgs, Command, OutputType},
    logging::initialize_tracing,
};

mod cli;
mod logging;


const LOG_FILE_NAME: &str = "nestcfg.log";


fn load_configuration(cli_args: &CLIArgs) -> Result<Configuration> {
    let configuration = match (
        cli_args.configuration_file_path.as_ref(),
        cli_args.source.as_ref(),
    ) {
        (Some(configuration_file_path), _) => Configuration::load_from_path(configuration_file_path)
            .wrap_err_with(|| {
                miette!(
                    "Failed to load configuration file {}.",
                    configuration_file_path.display()
                )
            })?,
        (None, Some(source)) => {
            return Configuration::from_source(source, cli_args.separator.as_deref())
                .wrap_err("Failed to set up document from --source.");
        }
        (None, None) => Configuration::load_from_default_path()
            .wrap_err("No --source given and no usable default configuration file.")?,
    };

    if cli_args.source.is_none() && cli_args.separator.is_none() {
        return Ok(configuration);
    }

    configuration
        .with_document_overrides(cli_args.source.as_deref(), cli_args.separator.as_deref())
        .wrap_err("Failed to apply command-line document options.")
}


fn render_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value)
        .into_diagnostic()
        .wrap_err("Failed to render value as YAML.")
}

fn print_value(resolver: &Resolver, path: &str, output_type: OutputType) -> Result<()> {
    match output_type {
        OutputType::Raw => match resolver.get(path) {
            Value::String(string) => println!("{string}"),
            other => print!("{}", render_yaml(&other)?),
        },
        OutputType::String => println!("{}", resolver.get_string(path)),
        OutputType::Int => println!("{}", resolver.get_int(path)),
        OutputType::Float => println!("{}", resolver.get_float(path)),
        OutputType::Bool => println!("{}", resolver.get_bool(path)),
        OutputType::Map => print!("{}", render_yaml(&resolver.get_map(path))?),
        OutputType::Slice => print!("{}", render_yaml(&resolver.get_slice(path))?),
    }

    Ok(())
}

fn apply_assignments(resolver: &Resolver, assignments: &[String]) -> Result<()> {
    if assignments.len() % 2 != 0 {
        return Err(miette!(
            "Expected PATH VALUE pairs, got an odd number of arguments ({}).",
            assignments.len()
        ));
    }

    for pair in assignments.chunks_exact(2) {
        let (path, raw_value) = (pair[0].as_str(), pair[1].as_str());

        if !resolver.set(path, parse_value_argument(raw_value)) {
            return Err(miette!("Cannot set a value at an empty key path."));
        }

        debug!(path, "Value set.");
    }

    Ok(())
}


fn run(cli_args: CLIArgs, configuration: Configuration) -> Result<ExitCode> {
    let resolver = configuration.open_document().wrap_err_with(|| {
        miette!(
            "Failed to load document {}.",
            configuration.document.source.display()
        )
    })?;

    info!(
        source = %configuration.document.source.display(),
        separator = resolver.separator(),
        "Document loaded."
    );

    match cli_args.command {
        Command::Get { path, output_type } => print_value(&resolver, &path, output_type)?,
        Command::Has { path, kind } => {
            let exists = resolver.has_key(&path, kind.into());
            println!("{exists}");

            if !exists {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Keys { path } => {
            let keys = match path {
                Some(path) => resolver.keys(&path),
                None => resolver.document().keys(),
            };

            for key in keys {
                println!("{key}");
            }
        }
        Command::Dump { path } => {
            let scope = match path {
                Some(path) => resolver.nested(&path),
                None => resolver,
            };

            print!("{}", render_yaml(scope.document())?);
        }
        Command::Set { assignments } => {
            apply_assignments(&resolver, &assignments)?;
            print!("{}", render_yaml(resolver.document())?);
        }
    }

    Ok(ExitCode::SUCCESS)
}


fn main() -> Result<ExitCode> {
    let cli_args = CLIArgs::parse();

    let mut configuration = load_configuration(&cli_args)?;

    if let Some(log_level) = cli_args.log_level.as_ref() {
        configuration.logging = configuration
            .logging
            .with_console_output_level_filter(log_level.as_str())
            .wrap_err("Invalid --log-level.")?;
    }


    let log_file_output_level_filter = configuration.logging.log_file_output_level_filter();
    let logging_raii_guard = initialize_tracing(
        configuration.logging.console_output_level_filter(),
        configuration
            .logging
            .log_file_output_directory
            .as_deref()
            .map(|directory| (log_file_output_level_filter, directory)),
        LOG_FILE_NAME,
    )
    .wrap_err("Failed to initialize tracing.")?;

    if let Some(file_path) = configuration.file_path.as_ref() {
        debug!(path = %file_path.display(), "Configuration loaded.");
    }


    let exit_code = run(cli_args, configuration)?;

    drop(logging_raii_guard);
    Ok(exit_code)
}
