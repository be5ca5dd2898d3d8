use crate::{config::Config, ids::SchemaName};
use std::cell::RefCell;

//
// ACTIVE_SCHEMA
//
// The single ambient cell recording which schema the process is currently
// pointed at. Exactly one value is active at any instant; switching is not
// nested beyond the one-level restore a guard provides.
//

thread_local! {
    static ACTIVE_SCHEMA: RefCell<Option<SchemaName>> = const { RefCell::new(None) };
}

///
/// Connection
///
/// Accessor for the ambient active schema. The dispatcher must be the only
/// writer for the duration of a dispatch; a wrapped command that spawns
/// concurrent readers of this cell is outside the contract.
///

pub struct Connection;

impl Connection {
    /// The active schema. Falls back to the configured default schema, or
    /// `public` before any config is loaded.
    #[must_use]
    pub fn current() -> SchemaName {
        ACTIVE_SCHEMA
            .with_borrow(Clone::clone)
            .unwrap_or_else(|| {
                Config::try_get().map_or(SchemaName::PUBLIC, |cfg| cfg.default_schema.clone())
            })
    }

    /// Point the ambient connection at the given schema.
    pub fn set_current(schema: SchemaName) {
        ACTIVE_SCHEMA.with_borrow_mut(|active| *active = Some(schema));
    }

    /// Test-only: clear the cell back to its never-switched state.
    #[cfg(test)]
    pub fn reset_for_tests() {
        ACTIVE_SCHEMA.with_borrow_mut(|active| *active = None);
    }
}

///
/// ActiveSchemaGuard
///
/// Captures the active schema on construction and restores it when dropped,
/// so the pre-dispatch schema comes back on success, on error, and on panic.
///

#[must_use = "the prior schema is only restored while the guard is alive"]
pub struct ActiveSchemaGuard {
    saved: SchemaName,
}

impl ActiveSchemaGuard {
    pub fn capture() -> Self {
        Self {
            saved: Connection::current(),
        }
    }

    #[must_use]
    pub const fn saved(&self) -> &SchemaName {
        &self.saved
    }
}

impl Drop for ActiveSchemaGuard {
    fn drop(&mut self) {
        Connection::set_current(self.saved.clone());
    }
}

///
/// TESTS
///
