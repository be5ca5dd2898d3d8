use crate::{
    Error,
    config::{Config, ConfigModel},
    ids::SchemaName,
};
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// ResolverError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ResolverError {
    #[error("no schemas matched the given selectors")]
    NoSchemasMatched,

    #[error("unknown schema: {0}")]
    UnknownSchema(String),
}

///
/// SchemaSelector
///
/// Parsed selector options for one invocation. Explicit names keep caller
/// order; the class flags expand to declaration order. `skip_creation` is
/// consumed by the resolution engine and never forwarded to the wrapped
/// command.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaSelector {
    pub schemas: Vec<String>,
    pub all_schemas: bool,
    pub static_schemas: bool,
    pub tenant_schemas: bool,
    pub skip_creation: bool,
}

impl SchemaSelector {
    /// Selector naming exactly the given schemas, in order.
    #[must_use]
    pub fn named(schemas: &[&str]) -> Self {
        Self {
            schemas: schemas.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }
}

///
/// SchemaResolver
///
/// The resolution engine seam. Implementations own schema enumeration and
/// validation; the dispatcher treats the result as an opaque ordered list
/// and propagates failures unchanged.
///

pub trait SchemaResolver {
    fn resolve(&self, selector: &SchemaSelector) -> Result<Vec<SchemaName>, ResolverError>;
}

///
/// ConfigResolver
///
/// Engine backed by the schema declarations in `runschema.toml`. Declared
/// schemas always exist, so `skip_creation` has nothing to gate here; an
/// engine that provisions schemas on demand would consult it.
///

pub struct ConfigResolver {
    model: Arc<ConfigModel>,
}

impl ConfigResolver {
    #[must_use]
    pub const fn new(model: Arc<ConfigModel>) -> Self {
        Self { model }
    }

    /// Build a resolver over the process-wide configuration.
    pub fn from_config() -> Result<Self, Error> {
        let model = Config::get().map_err(Error::from)?;

        Ok(Self::new(model))
    }
}

impl SchemaResolver for ConfigResolver {
    fn resolve(&self, selector: &SchemaSelector) -> Result<Vec<SchemaName>, ResolverError> {
        let mut matched: Vec<SchemaName> = Vec::new();

        // Explicit names first, in caller order, validated against the
        // declared set
        for raw in &selector.schemas {
            let schema = self
                .model
                .find(raw)
                .ok_or_else(|| ResolverError::UnknownSchema(raw.clone()))?;
            push_unique(&mut matched, schema);
        }

        // Class expansions append in declaration order
        if selector.all_schemas || selector.static_schemas {
            for schema in &self.model.schemas.static_schemas {
                push_unique(&mut matched, schema.clone());
            }
        }

        if selector.all_schemas || selector.tenant_schemas {
            for schema in &self.model.schemas.tenants {
                push_unique(&mut matched, schema.clone());
            }
        }

        if matched.is_empty() {
            return Err(ResolverError::NoSchemasMatched);
        }

        Ok(matched)
    }
}

fn push_unique(matched: &mut Vec<SchemaName>, schema: SchemaName) {
    if !matched.contains(&schema) {
        matched.push(schema);
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ConfigResolver {
        let mut model = ConfigModel::default();
        model.schemas.static_schemas = vec![SchemaName::new("main"), SchemaName::new("reporting")];
        model.schemas.tenants = vec![
            SchemaName::new("tenant_a"),
            SchemaName::new("tenant_b"),
            SchemaName::new("tenant_c"),
        ];

        ConfigResolver::new(Arc::new(model))
    }

    #[test]
    fn explicit_names_preserve_caller_order() {
        let schemas = resolver()
            .resolve(&SchemaSelector::named(&["tenant_b", "main", "tenant_a"]))
            .unwrap();

        assert_eq!(
            schemas,
            vec![
                SchemaName::new("tenant_b"),
                SchemaName::new("main"),
                SchemaName::new("tenant_a"),
            ]
        );
    }

    #[test]
    fn repeated_names_keep_the_first_occurrence() {
        let schemas = resolver()
            .resolve(&SchemaSelector::named(&["tenant_a", "tenant_a", "main"]))
            .unwrap();

        assert_eq!(
            schemas,
            vec![SchemaName::new("tenant_a"), SchemaName::new("main")]
        );
    }

    #[test]
    fn unknown_explicit_name_is_fatal() {
        let err = resolver()
            .resolve(&SchemaSelector::named(&["tenant_zz"]))
            .unwrap_err();

        assert!(matches!(err, ResolverError::UnknownSchema(name) if name == "tenant_zz"));
    }

    #[test]
    fn empty_selection_is_fatal() {
        let err = resolver().resolve(&SchemaSelector::default()).unwrap_err();

        assert!(matches!(err, ResolverError::NoSchemasMatched));
    }

    #[test]
    fn all_schemas_expands_static_then_tenants_in_declaration_order() {
        let selector = SchemaSelector {
            all_schemas: true,
            ..SchemaSelector::default()
        };

        let schemas = resolver().resolve(&selector).unwrap();
        assert_eq!(
            schemas,
            vec![
                SchemaName::new("main"),
                SchemaName::new("reporting"),
                SchemaName::new("tenant_a"),
                SchemaName::new("tenant_b"),
                SchemaName::new("tenant_c"),
            ]
        );
    }

    #[test]
    fn class_filters_select_one_class_only() {
        let static_only = SchemaSelector {
            static_schemas: true,
            ..SchemaSelector::default()
        };
        let tenants_only = SchemaSelector {
            tenant_schemas: true,
            ..SchemaSelector::default()
        };

        assert_eq!(
            resolver().resolve(&static_only).unwrap(),
            vec![SchemaName::new("main"), SchemaName::new("reporting")]
        );
        assert_eq!(
            resolver().resolve(&tenants_only).unwrap(),
            vec![
                SchemaName::new("tenant_a"),
                SchemaName::new("tenant_b"),
                SchemaName::new("tenant_c"),
            ]
        );
    }

    #[test]
    fn explicit_names_combine_with_class_expansion_without_duplicates() {
        let selector = SchemaSelector {
            schemas: vec!["tenant_c".to_string()],
            tenant_schemas: true,
            ..SchemaSelector::default()
        };

        let schemas = resolver().resolve(&selector).unwrap();
        assert_eq!(
            schemas,
            vec![
                SchemaName::new("tenant_c"),
                SchemaName::new("tenant_a"),
                SchemaName::new("tenant_b"),
            ]
        );
    }
}
