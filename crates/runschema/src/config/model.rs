use crate::{Error, config::ConfigError, ids::SchemaName, log::Level};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ConfigSchemaError
///

#[derive(Debug, ThisError)]
pub enum ConfigSchemaError {
    #[error("validation error: {0}")]
    ValidationError(String),
}

impl From<ConfigSchemaError> for Error {
    fn from(err: ConfigSchemaError) -> Self {
        ConfigError::from(err).into()
    }
}

/// Postgres identifier limit; declared names must fit without truncation.
pub const NAME_MAX_BYTES: usize = 63;

fn validate_schema_name(name: &SchemaName, context: &str) -> Result<(), ConfigSchemaError> {
    let raw = name.as_str();

    if raw.is_empty() {
        return Err(ConfigSchemaError::ValidationError(format!(
            "{context} name is empty",
        )));
    }

    if raw.len() > NAME_MAX_BYTES {
        return Err(ConfigSchemaError::ValidationError(format!(
            "{context} '{name}' exceeds {NAME_MAX_BYTES} bytes",
        )));
    }

    let well_formed = raw.chars().enumerate().all(|(i, c)| {
        if i == 0 {
            c.is_ascii_lowercase() || c == '_'
        } else {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
        }
    });

    if !well_formed {
        return Err(ConfigSchemaError::ValidationError(format!(
            "{context} '{name}' must match [a-z_][a-z0-9_]*",
        )));
    }

    Ok(())
}

///
/// Defaults
///

mod defaults {
    use super::{Level, SchemaName};

    pub const fn default_schema() -> SchemaName {
        SchemaName::PUBLIC
    }

    pub const fn log_level() -> Level {
        Level::Info
    }
}

///
/// Validate
///

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigSchemaError>;
}

///
/// ConfigModel
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigModel {
    /// Schema reported for a connection nothing has switched yet.
    #[serde(default = "defaults::default_schema")]
    pub default_schema: SchemaName,

    #[serde(default)]
    pub schemas: SchemasConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl ConfigModel {
    /// Find a declared schema by raw name, static entries first.
    #[must_use]
    pub fn find(&self, raw: &str) -> Option<SchemaName> {
        self.schemas
            .static_schemas
            .iter()
            .chain(self.schemas.tenants.iter())
            .find(|schema| schema.as_str() == raw)
            .cloned()
    }

    /// Test-only: baseline config with a few declared schemas.
    #[cfg(test)]
    #[must_use]
    pub fn test_default() -> Self {
        let mut cfg = Self::default();
        cfg.schemas.static_schemas = vec![SchemaName::new("main")];
        cfg.schemas.tenants = vec![SchemaName::new("tenant_one"), SchemaName::new("tenant_two")];
        cfg
    }
}

impl Default for ConfigModel {
    fn default() -> Self {
        Self {
            default_schema: defaults::default_schema(),
            schemas: SchemasConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Validate for ConfigModel {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        validate_schema_name(&self.default_schema, "default schema")?;

        // Declared names must be well-formed and unique across both classes
        let mut seen: BTreeSet<&str> = BTreeSet::new();

        for schema in &self.schemas.static_schemas {
            validate_schema_name(schema, "static schema")?;
            if !seen.insert(schema.as_str()) {
                return Err(ConfigSchemaError::ValidationError(format!(
                    "schema '{schema}' declared more than once",
                )));
            }
        }

        for schema in &self.schemas.tenants {
            validate_schema_name(schema, "tenant schema")?;
            if !seen.insert(schema.as_str()) {
                return Err(ConfigSchemaError::ValidationError(format!(
                    "schema '{schema}' declared more than once",
                )));
            }
        }

        Ok(())
    }
}

///
/// SchemasConfig
///
/// Declared schemas, split by class: `static` entries exist for the life of
/// the deployment, `tenants` come and go with provisioning.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemasConfig {
    #[serde(default, rename = "static")]
    pub static_schemas: Vec<SchemaName>,

    #[serde(default)]
    pub tenants: Vec<SchemaName>,
}

///
/// LogConfig
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "defaults::log_level")]
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with(static_schemas: &[&'static str], tenants: &[&'static str]) -> ConfigModel {
        let mut cfg = ConfigModel::default();
        cfg.schemas.static_schemas = static_schemas.iter().map(|s| SchemaName::new(s)).collect();
        cfg.schemas.tenants = tenants.iter().map(|s| SchemaName::new(s)).collect();
        cfg
    }

    #[test]
    fn well_formed_declarations_validate() {
        let cfg = model_with(&["main", "reporting"], &["tenant_a", "tenant_b2"]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn malformed_names_are_rejected() {
        for bad in ["", "Tenant", "9lives", "has-dash", "has space"] {
            let mut cfg = model_with(&[], &[]);
            cfg.schemas.tenants = vec![SchemaName::owned(bad.to_string())];

            assert!(cfg.validate().is_err(), "expected rejection of {bad:?}");
        }
    }

    #[test]
    fn oversized_names_are_rejected() {
        let long = "a".repeat(NAME_MAX_BYTES + 1);
        let mut cfg = model_with(&[], &[]);
        cfg.schemas.tenants = vec![SchemaName::owned(long)];

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn duplicates_across_classes_are_rejected() {
        let cfg = model_with(&["shared"], &["shared"]);
        let err = cfg.validate().unwrap_err();

        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn find_prefers_declared_order() {
        let cfg = model_with(&["main"], &["tenant_a"]);

        assert_eq!(cfg.find("tenant_a"), Some(SchemaName::new("tenant_a")));
        assert_eq!(cfg.find("missing"), None);
    }
}
