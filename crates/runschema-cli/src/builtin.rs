//! Built-in maintenance commands shipped with the CLI.
//!
//! Registered explicitly at startup; embedding applications register their
//! own commands the same way.

use runschema::{
    Error,
    command::{Command, CommandContext},
    config::Config,
    log,
    log::Level,
    registry::CommandRegistry,
};

pub fn register_all() {
    CommandRegistry::register("maintenance.ping", || Box::new(Ping));
    CommandRegistry::register("maintenance.showconfig", || Box::new(ShowConfig));
}

///
/// Ping
///
/// Connectivity probe: logs one line under each selected schema.
///

#[derive(Debug)]
struct Ping;

impl Command for Ping {
    fn name(&self) -> &str {
        "ping"
    }

    fn run(&self, _ctx: &CommandContext) -> Result<(), Error> {
        log!("maintenance", Level::Ok, "pong");

        Ok(())
    }
}

///
/// ShowConfig
///
/// Print the loaded configuration as TOML. Diagnostics only.
///

#[derive(Debug)]
struct ShowConfig;

impl Command for ShowConfig {
    fn name(&self) -> &str {
        "showconfig"
    }

    fn run(&self, _ctx: &CommandContext) -> Result<(), Error> {
        let toml = Config::to_toml().map_err(Error::from)?;
        println!("{toml}");

        Ok(())
    }
}

///
/// TESTS
///
