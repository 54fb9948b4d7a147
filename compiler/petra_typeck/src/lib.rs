//! Petra Typeck - type checker for the Petra embedded language.
//!
//! Runs once per function body, when the body is registered with a program.
//! Every expression node visited gets its type recorded, so the backend can
//! read types back while lowering.
//!
//! # Module Organization
//!
//! - `context`: typing context with O(1) branching
//! - `checker`: statements, blocks and function bodies
//! - `infer`: expression inference
//! - `operators`: operand rules for built-in operators

pub mod checker;
mod context;
mod error;
pub mod infer;
pub mod operators;

pub use checker::{check_block, check_function, check_stmt};
pub use context::{FnSig, FnTable, TypingContext};
pub use error::TypeError;
pub use infer::{check_call, infer_expr, resolve_field};
