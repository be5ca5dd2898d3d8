mod model;

pub use model::*;

use std::{cell::RefCell, sync::Arc};
use thiserror::Error as ThisError;

//
// CONFIG
//
// The dispatch loop is strictly single-threaded (one ambient connection, one
// writer), so a thread_local cell is sufficient. Arc rather than Rc because
// resolver handles hold the model across call boundaries and host-side test
// binaries may be multi-threaded.
//

thread_local! {
    static CONFIG: RefCell<Option<Arc<ConfigModel>>> = const { RefCell::new(None) };
}

/// Errors related to configuration lifecycle and parsing.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("config has already been initialized")]
    AlreadyInitialized,

    #[error("config has not been initialized")]
    NotInitialized,

    /// TOML could not be parsed into the expected structure.
    #[error("toml error: {0}")]
    CannotParseToml(String),

    /// Wrapper for model-level validation errors.
    #[error(transparent)]
    ConfigSchema(#[from] ConfigSchemaError),
}

///
/// Config
///

pub struct Config {}

impl Config {
    pub(crate) fn get() -> Result<Arc<ConfigModel>, ConfigError> {
        CONFIG.with(|cfg| {
            if let Some(config) = cfg.borrow().as_ref() {
                return Ok(config.clone());
            }

            #[cfg(test)]
            {
                Ok(Self::init_for_tests())
            }

            #[cfg(not(test))]
            {
                Err(ConfigError::NotInitialized)
            }
        })
    }

    #[must_use]
    pub(crate) fn try_get() -> Option<Arc<ConfigModel>> {
        CONFIG.with(|cfg| {
            if let Some(config) = cfg.borrow().as_ref() {
                return Some(config.clone());
            }

            #[cfg(test)]
            {
                Some(Self::init_for_tests())
            }

            #[cfg(not(test))]
            {
                None
            }
        })
    }

    /// Initialize the process-wide configuration from a TOML string.
    pub fn init_from_toml(config_str: &str) -> Result<(), ConfigError> {
        let config: ConfigModel =
            toml::from_str(config_str).map_err(|e| ConfigError::CannotParseToml(e.to_string()))?;

        config.validate().map_err(ConfigError::from)?;

        CONFIG.with(|cfg| {
            let mut borrow = cfg.borrow_mut();
            if borrow.is_some() {
                return Err(ConfigError::AlreadyInitialized);
            }
            *borrow = Some(Arc::new(config));

            Ok(())
        })
    }

    /// Return the current config as a TOML string.
    /// Intended for diagnostics and tooling only.
    pub fn to_toml() -> Result<String, ConfigError> {
        let cfg = Self::get()?;

        toml::to_string_pretty(&*cfg).map_err(|e| ConfigError::CannotParseToml(e.to_string()))
    }

    /// Test-only: reset the global config so tests can reinitialize with a fresh TOML.
    #[cfg(test)]
    pub fn reset_for_tests() {
        CONFIG.with(|cfg| {
            *cfg.borrow_mut() = None;
        });
    }

    /// Test-only: ensure a minimal validated config is available.
    #[cfg(test)]
    #[must_use]
    pub fn init_for_tests() -> Arc<ConfigModel> {
        CONFIG.with(|cfg| {
            let mut borrow = cfg.borrow_mut();
            if let Some(existing) = borrow.as_ref() {
                return existing.clone();
            }

            let config = ConfigModel::test_default();
            config.validate().expect("test config must validate");

            let arc = Arc::new(config);
            *borrow = Some(arc.clone());
            arc
        })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SchemaName;

    const SAMPLE: &str = r#"
        default_schema = "public"

        [schemas]
        static = ["main", "reporting"]
        tenants = ["tenant_a", "tenant_b"]

        [log]
        level = "warn"
    "#;

    #[test]
    fn init_parses_and_exposes_the_model() {
        Config::reset_for_tests();
        Config::init_from_toml(SAMPLE).unwrap();

        let cfg = Config::get().unwrap();
        assert_eq!(cfg.default_schema, SchemaName::PUBLIC);
        assert_eq!(cfg.schemas.static_schemas.len(), 2);
        assert_eq!(cfg.schemas.tenants.len(), 2);
        assert_eq!(cfg.log.level, crate::log::Level::Warn);
    }

    #[test]
    fn double_init_is_rejected() {
        Config::reset_for_tests();
        Config::init_from_toml(SAMPLE).unwrap();

        let err = Config::init_from_toml(SAMPLE).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyInitialized));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        Config::reset_for_tests();

        let err = Config::init_from_toml("unexpected = true").unwrap_err();
        assert!(matches!(err, ConfigError::CannotParseToml(_)));
    }

    #[test]
    fn defaults_fill_an_empty_document() {
        Config::reset_for_tests();
        Config::init_from_toml("").unwrap();

        let cfg = Config::get().unwrap();
        assert_eq!(cfg.default_schema, SchemaName::PUBLIC);
        assert!(cfg.schemas.static_schemas.is_empty());
        assert!(cfg.schemas.tenants.is_empty());
        assert_eq!(cfg.log.level, crate::log::Level::Info);
    }

    #[test]
    fn exported_toml_round_trips() {
        Config::reset_for_tests();
        Config::init_from_toml(SAMPLE).unwrap();

        let exported = Config::to_toml().unwrap();
        let reparsed: ConfigModel = toml::from_str(&exported).unwrap();
        assert_eq!(
            reparsed.schemas.tenants,
            vec![SchemaName::new("tenant_a"), SchemaName::new("tenant_b")]
        );
    }
}
