//! Operator CLI for runschema.
//!
//! Wraps a registered command and runs it once per selected schema:
//!
//! ```text
//! runschema migrate --schema tenant_a --schema tenant_b
//! runschema maintenance.ping --all-schemas
//! runschema reindex --tenant-schemas -- --verbose
//! ```
//!
//! Selector options are consumed here; everything after them is forwarded
//! verbatim to the wrapped command.

mod builtin;

use clap::Parser;
use runschema::{
    Error,
    config::Config,
    dispatch,
    resolver::{ConfigResolver, SchemaSelector},
};
use std::{env, fs, io, path::PathBuf, process::ExitCode};
use thiserror::Error as ThisError;

const CONFIG_ENV_VAR: &str = "RUNSCHEMA_CONFIG";
const CONFIG_DEFAULT_PATH: &str = "runschema.toml";

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(
    name = "runschema",
    version,
    about = "Run a registered command across one or more schemas"
)]
struct Cli {
    /// Path to the configuration file (falls back to $RUNSCHEMA_CONFIG,
    /// then ./runschema.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Command to run, dotted ("maintenance.ping") or bare ("ping")
    #[arg(value_name = "COMMAND")]
    command_name: String,

    /// Target schema; repeatable, runs in the order given
    #[arg(short = 's', long = "schema", value_name = "NAME")]
    schemas: Vec<String>,

    /// Run against every declared schema
    #[arg(long, conflicts_with_all = ["static_schemas", "tenant_schemas"])]
    all_schemas: bool,

    /// Run against the static schemas only
    #[arg(long)]
    static_schemas: bool,

    /// Run against the tenant schemas only
    #[arg(long)]
    tenant_schemas: bool,

    /// Do not create missing schemas before running
    #[arg(long)]
    skip_schema_creation: bool,

    /// Arguments forwarded verbatim to the wrapped command
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    forwarded: Vec<String>,
}

impl Cli {
    fn selector(&self) -> SchemaSelector {
        SchemaSelector {
            schemas: self.schemas.clone(),
            all_schemas: self.all_schemas,
            static_schemas: self.static_schemas,
            tenant_schemas: self.tenant_schemas,
            skip_creation: self.skip_schema_creation,
        }
    }

    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| {
            env::var_os(CONFIG_ENV_VAR)
                .map_or_else(|| PathBuf::from(CONFIG_DEFAULT_PATH), PathBuf::from)
        })
    }
}

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error("cannot read config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Runschema(#[from] Error),
}

fn try_main(cli: &Cli) -> Result<(), CliError> {
    let path = cli.config_path();
    let raw = fs::read_to_string(&path).map_err(|source| CliError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;

    Config::init_from_toml(&raw).map_err(Error::from)?;
    builtin::register_all();

    let resolver = ConfigResolver::from_config()?;

    dispatch::run(
        &cli.command_name,
        &cli.selector(),
        &resolver,
        cli.forwarded.clone(),
    )?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("runschema: {err}");
            ExitCode::FAILURE
        }
    }
}

///
/// TESTS
///
