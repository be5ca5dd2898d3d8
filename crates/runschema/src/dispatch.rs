use crate::{
    Error,
    command::{Command, CommandContext},
    connection::{ActiveSchemaGuard, Connection},
    ids::SchemaName,
    registry::CommandRegistry,
    resolver::{SchemaResolver, SchemaSelector},
};
use thiserror::Error as ThisError;

///
/// DispatchError
///

#[derive(Debug, ThisError)]
pub enum DispatchError {
    #[error("command '{command}' failed under schema '{schema}': {source}")]
    HandlerFailed {
        command: String,
        schema: SchemaName,
        #[source]
        source: Box<Error>,
    },
}

///
/// ExecutionRequest
///
/// One resolved invocation: the handler, the forwarded arguments, and the
/// ordered target schemas. Built once, consumed by `execute`.
///

pub struct ExecutionRequest {
    handler: Box<dyn Command>,
    schemas: Vec<SchemaName>,
    ctx: CommandContext,
}

impl ExecutionRequest {
    #[must_use]
    pub const fn new(
        handler: Box<dyn Command>,
        schemas: Vec<SchemaName>,
        ctx: CommandContext,
    ) -> Self {
        Self {
            handler,
            schemas,
            ctx,
        }
    }

    pub fn execute(self) -> Result<(), Error> {
        dispatch(self.handler.as_ref(), &self.schemas, &self.ctx)
    }
}

/// Run the handler once per schema, in order, with the ambient connection
/// pointed at that schema for the duration of the call.
///
/// The pre-dispatch schema is captured up front and restored when the guard
/// drops, so it comes back on success, on a failing handler, and on a panic.
/// A handler failure aborts the remaining schemas and propagates with the
/// schema it failed under. An empty schema list is a no-op.
pub fn dispatch(
    handler: &dyn Command,
    schemas: &[SchemaName],
    ctx: &CommandContext,
) -> Result<(), Error> {
    let _guard = ActiveSchemaGuard::capture();

    for schema in schemas {
        crate::log!(
            "dispatch",
            "running '{}' under schema '{}'",
            handler.name(),
            schema
        );

        Connection::set_current(schema.clone());

        handler.run(ctx).map_err(|err| DispatchError::HandlerFailed {
            command: handler.name().to_string(),
            schema: schema.clone(),
            source: Box::new(err),
        })?;
    }

    Ok(())
}

/// Orchestration entry used by the CLI: resolve the handler, resolve the
/// schemas, then dispatch. An unknown command fails here, before the
/// ambient connection is ever touched.
pub fn run(
    name: &str,
    selector: &SchemaSelector,
    resolver: &dyn SchemaResolver,
    args: Vec<String>,
) -> Result<(), Error> {
    let handler = CommandRegistry::resolve(name)?;
    let schemas = resolver.resolve(selector)?;

    ExecutionRequest::new(handler, schemas, CommandContext::new(args)).execute()
}

///
/// TESTS
///
