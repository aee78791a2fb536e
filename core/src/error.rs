//! Codec error types.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors raised while converting between value trees and variants.
///
/// Every variant carries a stable string code (see [`CodecError::code`])
/// so failures can be reported across the process boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// A list mixed element types where a single concrete type is required.
    #[error("list elements must share one type: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    /// A value has no representation on the other side of the boundary.
    #[error("type '{type_name}' is not supported")]
    UnsupportedType { type_name: String },
}

impl CodecError {
    /// Stable error code used for cross-boundary transport.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::UnsupportedType { .. } => "unknown_type",
        }
    }
}

/// Convenience alias for results with [`CodecError`].
pub type Result<T> = std::result::Result<T, CodecError>;
