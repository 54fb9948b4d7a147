//! Core representation of the Petra embedded language.
//!
//! Petra programs are built in code, not parsed from text: a host assembles
//! [`Expr`], [`Stmt`] and [`Block`] values over typed [`Symbol`]s and hands
//! function bodies to a backend. This crate owns that vocabulary.
//!
//! - [`types`]: scalar and aggregate types with structural equality
//! - [`symbol`]: variables with program-unique identity
//! - [`syntax`]: expression and statement nodes
//! - [`validate`]: structural checks applied while nodes are built
//!
//! Nothing here knows about typing rules or code generation; see
//! `petra_typeck` and `petra_llvm`.

mod error;
pub mod stack;
pub mod symbol;
pub mod syntax;
pub mod types;
pub mod validate;

pub use error::ValidationError;
pub use symbol::{Symbol, SymbolId, SymbolTable};
pub use syntax::{
    ArithOp, Block, Call, CompareOp, Constant, EqualityOp, Expr, ExprKind, LogicalOp, Stmt,
};
pub use types::{ArrayType, Field, FloatWidth, IntWidth, ReturnType, StructType, Type};
pub use validate::IdentKind;
