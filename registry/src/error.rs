//! Registry error types.
//!
//! Each variant corresponds to one manifest-validation failure mode and
//! carries a stable string code (see [`RegistryError::code`]) for
//! cross-boundary transport.

use device_commands_core::ValueKind;
use thiserror::Error;

use crate::schema::SchemaError;

/// Errors raised while loading or projecting command definitions.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A manifest node that must be an object is something else.
    #[error("expected an object for {context}, found {found}")]
    TypeMismatch { context: String, found: ValueKind },

    /// Empty command name, or a custom command missing the `_` prefix.
    #[error("invalid command name '{name}' in package '{package}': {reason}")]
    InvalidCommandName {
        package: String,
        name: String,
        reason: String,
    },

    /// A command definition lacks a required member.
    #[error("command definition '{command}' is missing property '{property}'")]
    PropertyMissing {
        command: String,
        property: &'static str,
    },

    /// The parameter schema failed to build or serialize.
    #[error("invalid schema for command '{command}'")]
    InvalidObjectSchema {
        command: String,
        #[source]
        source: SchemaError,
    },

    /// A full command name collides with one registered under another
    /// category; one vendor daemon must not override another's commands.
    #[error("definition for command '{command}' overrides an earlier definition in category '{category}'")]
    DuplicateCommandDef { command: String, category: String },
}

impl RegistryError {
    /// Stable error code used for cross-boundary transport.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::InvalidCommandName { .. } => "invalid_command_name",
            Self::PropertyMissing { .. } => "parameter_missing",
            Self::InvalidObjectSchema { .. } => "invalid_object_schema",
            Self::DuplicateCommandDef { .. } => "duplicate_command_definition",
        }
    }
}

/// Convenience alias for results with [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
