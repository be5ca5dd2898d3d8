//!
//! Strongly-typed identifiers used across the crate. Provides a string-backed
//! schema name wrapper so known constants stay zero-copy while dynamic values
//! allocate only when needed.
//!

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, borrow::Cow, str::FromStr};

///
/// SchemaName
///
/// A human-readable identifier for one schema within the shared store
/// (e.g., "public", "tenant_a"). Opaque to the dispatcher; validation of
/// declared names happens at config load.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SchemaName(pub Cow<'static, str>);

impl SchemaName {
    /// The well-known fallback schema an untouched connection points at.
    pub const PUBLIC: Self = Self(Cow::Borrowed("public"));

    #[must_use]
    pub const fn new(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }

    #[must_use]
    pub const fn owned(s: String) -> Self {
        Self(Cow::Owned(s))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this name is the well-known fallback schema.
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.0.as_ref() == "public"
    }

    /// Convert into an owned string (avoids an extra allocation for owned variants).
    #[must_use]
    pub fn into_string(self) -> String {
        self.0.into_owned()
    }
}

impl FromStr for SchemaName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::owned(s.to_string()))
    }
}

impl From<&'static str> for SchemaName {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<&String> for SchemaName {
    fn from(s: &String) -> Self {
        Self(Cow::Owned(s.clone()))
    }
}

impl From<String> for SchemaName {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl From<SchemaName> for String {
    fn from(name: SchemaName) -> Self {
        name.into_string()
    }
}

impl AsRef<str> for SchemaName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for SchemaName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

///
/// TESTS
///
