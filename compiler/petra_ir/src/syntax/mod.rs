//! Syntax tree of a Petra function body.

mod constant;
mod expr;
mod ops;
mod stmt;

pub use constant::Constant;
pub use expr::{Expr, ExprKind};
pub use ops::{ArithOp, CompareOp, EqualityOp, LogicalOp};
pub use stmt::{Block, Call, Stmt};

#[cfg(test)]
mod tests;
