//! Structural validation errors.
//!
//! Raised while syntax nodes and types are being built, before any typing
//! information is available. Every failure names the offending value.

use crate::validate::IdentKind;

/// A syntax node or type that is malformed on its own terms.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid {kind} name `{name}`: expected a lowercase letter followed by letters, digits or `_`")]
    InvalidIdentifier { kind: IdentKind, name: String },

    #[error("integer literal {value} does not fit in {ty}")]
    IntOutOfRange { ty: String, value: i128 },

    #[error("unknown {family} operator `{op}`")]
    InvalidOperator { family: &'static str, op: String },

    /// A statement follows a `return` in the same block.
    #[error("statement {index} is unreachable: it follows a return in the same block")]
    UnreachableStatement { index: usize },

    #[error("duplicate struct field `{0}`")]
    DuplicateFieldName(String),

    #[error("type {ty} has no field {field}")]
    UnknownField { ty: String, field: String },

    #[error("unsupported float width {0}: expected 32 or 64")]
    UnsupportedFloatWidth(u32),

    #[error("unsupported integer width {0}: expected 8, 16, 32 or 64")]
    UnsupportedIntWidth(u32),
}
