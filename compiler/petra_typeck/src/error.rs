//! Type errors.
//!
//! Types and names are rendered into the error so that messages stay readable
//! after the offending tree is gone.

use petra_ir::{ReturnType, Type};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("use of undeclared variable `{0}`")]
    UndeclaredVariable(String),

    #[error("variable `{0}` is already declared in this scope")]
    Redeclaration(String),

    #[error("parameter `{0}` appears more than once")]
    DuplicateParameter(String),

    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    IncompatibleTypes { op: &'static str, left: Type, right: Type },

    #[error("operator `{op}` cannot be applied to {operand}")]
    IncompatibleOperand { op: &'static str, operand: Type },

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: Type, found: Type },

    #[error("call to undeclared function `{0}`")]
    UndeclaredFunction(String),

    #[error("function `{name}` takes {expected} argument(s) but {found} were supplied")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("argument {index} of `{name}`: expected {expected}, found {found}")]
    ArgTypeMismatch {
        name: String,
        index: usize,
        expected: Type,
        found: Type,
    },

    #[error("function `{0}` returns nothing and cannot be used as a value")]
    VoidAsExpr(String),

    #[error("cannot return a value from a function returning ()")]
    VoidReturnWithValue,

    #[error("missing return value: function returns {0}")]
    MissingReturnValue(Type),

    #[error("return type mismatch: expected {expected}, found {found}")]
    ReturnTypeMismatch { expected: ReturnType, found: Type },

    #[error("condition must be Bool, found {0}")]
    NonBoolPredicate(Type),

    #[error("{0} is not an array or struct")]
    NotAnAggregate(Type),

    #[error("cannot dereference {0}: not a pointer")]
    NotAPointer(Type),

    #[error("type {ty} has no field `{field}`")]
    UnknownField { ty: Type, field: String },

    #[error("index {index} out of bounds for {ty} with {len} element(s)")]
    IndexOutOfBounds { ty: Type, index: usize, len: usize },
}
