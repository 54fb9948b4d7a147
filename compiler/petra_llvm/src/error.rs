//! Backend and program-assembly errors.

use inkwell::builder::BuilderError;
use petra_ir::ValidationError;
use petra_typeck::TypeError;

/// Failure inside LLVM or while driving it.
///
/// LLVM messages are passed through as text; nothing here interprets them.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("LLVM builder error: {0}")]
    Builder(#[from] BuilderError),

    #[error("LLVM rejected the body of function `{0}`")]
    InvalidFunction(String),

    #[error("LLVM module verification failed: {0}")]
    InvalidModule(String),

    #[error("failed to initialize native target: {0}")]
    TargetInit(String),

    #[error("failed to create target machine for `{triple}`: {message}")]
    TargetMachine { triple: String, message: String },

    #[error("failed to write object file {path}: {message}")]
    ObjectEmission { path: String, message: String },

    #[error("failed to create JIT execution engine: {0}")]
    Jit(String),

    #[error("symbol `{name}` not found in compiled module: {message}")]
    MissingSymbol { name: String, message: String },

    /// A lowering precondition established by earlier passes does not hold.
    #[error("codegen invariant violated: {0}")]
    Invariant(String),
}

impl BackendError {
    #[cold]
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        BackendError::Invariant(message.into())
    }
}

/// Failure to register a function with a [`Program`](crate::Program).
///
/// Registration is atomic: on any of these the program is left exactly as it
/// was before the call.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("function `{0}` is already registered")]
    DuplicateFunction(String),
}
