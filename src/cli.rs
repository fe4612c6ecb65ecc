//! Command-line interface definitions for the `nestcfg` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use nestcfg::{KeyKind, Value};



/// Command-line arguments.
#[derive(Parser)]
#[command(
    name = "nestcfg",
    author,
    about = "Query and edit nested YAML/TOML documents using dot-separated key paths.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the configuration file to use.
    /// If neither this nor `--source` is given, this defaults to `./nestcfg.toml`.
    #[arg(
        short = 'c',
        long = "configuration-file-path",
        global = true,
        help = "Path to the configuration file to use. Defaults to ./nestcfg.toml"
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "source",
        global = true,
        help = "YAML or TOML document to load. Overrides the configuration file's document source."
    )]
    pub source: Option<PathBuf>,

    #[arg(
        long = "separator",
        global = true,
        help = "Key path separator. Defaults to \".\"."
    )]
    pub separator: Option<String>,

    #[arg(
        long = "log-level",
        global = true,
        help = "Console log filter (tracing-subscriber EnvFilter syntax), e.g. \"debug\"."
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}


#[derive(Subcommand)]
pub enum Command {
    /// Print the value at a key path.
    Get {
        path: String,

        #[arg(long = "as", value_enum, default_value_t = OutputType::Raw)]
        output_type: OutputType,
    },

    /// Check whether a key path exists (exit code 1 if it does not).
    Has {
        path: String,

        #[arg(long = "kind", value_enum, default_value_t = KindArgument::Any)]
        kind: KindArgument,
    },

    /// List the keys of the mapping at a key path (the root if omitted).
    Keys {
        path: Option<String>,
    },

    /// Print the mapping at a key path (the whole document if omitted) as YAML.
    Dump {
        path: Option<String>,
    },

    /// Set one or more values and print the resulting document as YAML.
    /// Values are parsed as YAML, so `8080` is an integer and `[a, b]` a sequence.
    Set {
        /// Alternating key paths and values: `PATH VALUE [PATH VALUE]...`.
        #[arg(required = true, value_name = "PATH VALUE")]
        assignments: Vec<String>,
    },
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    Raw,
    String,
    Int,
    Float,
    Bool,
    Map,
    Slice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArgument {
    Any,
    Mapping,
    Sequence,
}

impl From<KindArgument> for KeyKind {
    fn from(kind: KindArgument) -> Self {
        match kind {
            KindArgument::Any => KeyKind::Any,
            KindArgument::Mapping => KeyKind::Mapping,
            KindArgument::Sequence => KeyKind::Sequence,
        }
    }
}


/// Parse a value given on the command line.
///
/// Anything that is valid YAML is taken as such (`8080`, `true`, `[a, b]`, `{x: 1}`);
/// everything else, including the empty string, is kept as a plain string.
pub fn parse_value_argument(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::String(raw.to_string());
    }

    serde_yaml::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
