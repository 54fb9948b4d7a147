//! Structural validation.
//!
//! Nodes validate themselves when built, so a tree assembled through the
//! public constructors is always well formed. [`validate_block`] re-walks a
//! whole function body when it is handed to a program, which is where
//! function and parameter names are checked as well.

use std::fmt;

use crate::stack::ensure_sufficient_stack;
use crate::syntax::{Block, Call, Constant, Expr, ExprKind, Stmt};
use crate::ValidationError;

/// What an identifier names. Appears in error messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdentKind {
    Variable,
    Function,
    Parameter,
}

impl fmt::Display for IdentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdentKind::Variable => "variable",
            IdentKind::Function => "function",
            IdentKind::Parameter => "parameter",
        })
    }
}

/// Identifiers start with a lowercase ASCII letter, followed by ASCII
/// letters, digits or underscores.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn validate_identifier(kind: IdentKind, name: &str) -> Result<(), ValidationError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIdentifier {
            kind,
            name: name.to_owned(),
        })
    }
}

/// No statement may follow a `return` in the same statement list.
///
/// Only direct returns count: a list ending in an `if` whose arms both return
/// may still be followed by statements.
pub fn check_reachability(stmts: &[Stmt]) -> Result<(), ValidationError> {
    match stmts.iter().position(|stmt| matches!(stmt, Stmt::Return(_))) {
        Some(index) if index + 1 < stmts.len() => {
            Err(ValidationError::UnreachableStatement { index: index + 1 })
        }
        _ => Ok(()),
    }
}

pub fn validate_constant(constant: &Constant) -> Result<(), ValidationError> {
    match constant {
        Constant::Int { width, value } => crate::Type::Int(*width).range_check(i128::from(*value)),
        Constant::Bool(_) | Constant::Float32(_) | Constant::Float64(_) => Ok(()),
    }
}

pub fn validate_expr(expr: &Expr) -> Result<(), ValidationError> {
    ensure_sufficient_stack(|| match expr.kind() {
        ExprKind::Const(constant) => validate_constant(constant),
        ExprKind::Var(symbol) => validate_identifier(IdentKind::Variable, symbol.name()),
        ExprKind::Arith { left, right, .. }
        | ExprKind::Compare { left, right, .. }
        | ExprKind::Equality { left, right, .. }
        | ExprKind::Logical { left, right, .. } => {
            validate_expr(left)?;
            validate_expr(right)
        }
        ExprKind::Not(operand) | ExprKind::Deref(operand) => validate_expr(operand),
        ExprKind::GetElement { aggregate, .. } => validate_expr(aggregate),
        ExprKind::SetElement {
            aggregate, value, ..
        } => {
            validate_expr(aggregate)?;
            validate_expr(value)
        }
        ExprKind::Call(call) => validate_call(call),
    })
}

pub fn validate_call(call: &Call) -> Result<(), ValidationError> {
    validate_identifier(IdentKind::Function, call.name())?;
    call.args().iter().try_for_each(validate_expr)
}

pub fn validate_stmt(stmt: &Stmt) -> Result<(), ValidationError> {
    ensure_sufficient_stack(|| match stmt {
        Stmt::DefineVar { symbol, value } => {
            validate_identifier(IdentKind::Variable, symbol.name())?;
            value.as_ref().map_or(Ok(()), validate_expr)
        }
        Stmt::Assign { symbol, value } => {
            validate_identifier(IdentKind::Variable, symbol.name())?;
            validate_expr(value)
        }
        Stmt::Return(value) => value.as_ref().map_or(Ok(()), validate_expr),
        Stmt::If {
            pred,
            then_block,
            else_block,
        } => {
            validate_expr(pred)?;
            validate_block(then_block)?;
            validate_block(else_block)
        }
        Stmt::While { pred, body } => {
            validate_expr(pred)?;
            validate_block(body)
        }
        Stmt::Call(call) => validate_call(call),
    })
}

pub fn validate_block(block: &Block) -> Result<(), ValidationError> {
    check_reachability(block.stmts())?;
    block.stmts().iter().try_for_each(validate_stmt)
}
