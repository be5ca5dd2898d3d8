use crate::command::Command;
use std::{cell::RefCell, collections::BTreeMap};
use thiserror::Error as ThisError;

//
// Registered commands are keyed by dotted path ("maintenance.ping"); a
// separate index maps the bare trailing segment back to its path so both
// spellings resolve. Population happens through explicit `register` calls at
// startup, so a registry snapshot resolves deterministically.
//

thread_local! {
    static COMMANDS: RefCell<BTreeMap<String, CommandFactory>> =
        const { RefCell::new(BTreeMap::new()) };
    static BARE_INDEX: RefCell<BTreeMap<String, String>> = const { RefCell::new(BTreeMap::new()) };
}

/// Constructor for one registered command.
pub type CommandFactory = fn() -> Box<dyn Command>;

///
/// RegistryError
///

#[derive(Debug, ThisError)]
pub enum RegistryError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

///
/// CommandRegistry
///

pub struct CommandRegistry;

impl CommandRegistry {
    /// Register a command under its dotted path. The bare trailing segment
    /// is indexed as well; registering the same key again replaces the
    /// earlier entry.
    pub fn register(path: &str, factory: CommandFactory) {
        let bare = path.rsplit('.').next().unwrap_or(path);

        BARE_INDEX.with_borrow_mut(|index| {
            index.insert(bare.to_string(), path.to_string());
        });
        COMMANDS.with_borrow_mut(|commands| {
            commands.insert(path.to_string(), factory);
        });
    }

    /// Resolve a command by name.
    ///
    /// A dotted name resolves directly from the path table; the bare-name
    /// index is never consulted for it. A bare name goes through the index
    /// first. Either miss is fatal to the invocation.
    pub fn resolve(name: &str) -> Result<Box<dyn Command>, RegistryError> {
        if name.contains('.') {
            return Self::load(name).ok_or_else(|| RegistryError::UnknownCommand(name.to_string()));
        }

        let path = BARE_INDEX
            .with_borrow(|index| index.get(name).cloned())
            .ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))?;

        Self::load(&path).ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))
    }

    fn load(path: &str) -> Option<Box<dyn Command>> {
        COMMANDS
            .with_borrow(|commands| commands.get(path).copied())
            .map(|factory| factory())
    }

    /// All registered paths, sorted. For operator listings.
    #[must_use]
    pub fn command_paths() -> Vec<String> {
        COMMANDS.with_borrow(|commands| commands.keys().cloned().collect())
    }

    /// Test-only: drop every registration.
    #[cfg(test)]
    pub fn reset_for_tests() {
        COMMANDS.with_borrow_mut(BTreeMap::clear);
        BARE_INDEX.with_borrow_mut(BTreeMap::clear);
    }
}

///
/// TESTS
///
