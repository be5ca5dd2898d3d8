use crate::Error;
use thiserror::Error as ThisError;

///
/// CommandError
///
/// Failure channel for wrapped commands that have no richer error of their
/// own. Commands with structured failures should define their own type and
/// convert at the boundary.
///

#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

///
/// Command
///
/// One wrapped command's behavior. Resolution (constructing the value) is
/// pure; all side effects happen inside `run`, under whatever schema the
/// ambient connection is pointed at.
///

pub trait Command: std::fmt::Debug {
    /// Short name used in status lines.
    fn name(&self) -> &str;

    /// Execute against the currently-active schema.
    fn run(&self, ctx: &CommandContext) -> Result<(), Error>;
}

///
/// CommandContext
///
/// Arguments forwarded verbatim to the wrapped command. Built once per
/// invocation and shared across every schema in the run; selector options
/// are consumed before this is constructed and never appear here.
///

#[derive(Clone, Debug, Default)]
pub struct CommandContext {
    args: Vec<String>,
}

impl CommandContext {
    #[must_use]
    pub const fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_exposes_forwarded_args_in_order() {
        let ctx = CommandContext::new(vec!["--verbose".into(), "42".into()]);

        assert_eq!(ctx.args(), ["--verbose".to_string(), "42".to_string()]);
    }

    #[test]
    fn command_error_carries_the_message() {
        let err = CommandError::failed("backing store unreachable");

        assert_eq!(err.to_string(), "backing store unreachable");
    }
}
