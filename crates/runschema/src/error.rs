use crate::{
    command::CommandError, config::ConfigError, dispatch::DispatchError, registry::RegistryError,
    resolver::ResolverError,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error for the crate. Module errors chain in transparently so
/// callers see the originating message; nothing is caught and recovered
/// below this level.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Resolver(#[from] ResolverError),
}
