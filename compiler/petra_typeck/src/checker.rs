//! Statement and function-body checking.
//!
//! A block threads one context through its statements, so declarations
//! accumulate in order. `if` arms and `while` bodies each get a branched copy,
//! so nothing they declare is visible to a sibling or after the construct.

use petra_ir::stack::ensure_sufficient_stack;
use petra_ir::{Block, Expr, ReturnType, Stmt, Symbol, Type};
use tracing::{debug, instrument, trace};

use crate::infer::{check_call, infer_expr};
use crate::{TypeError, TypingContext};

/// Check a function body.
///
/// `ctx` must already carry every signature the body may call, including the
/// function's own for recursion. Parameters are declared first, in order.
#[instrument(level = "debug", skip_all, fields(params = params.len()))]
pub fn check_function(params: &[Symbol], body: &Block, mut ctx: TypingContext) -> Result<(), TypeError> {
    for param in params {
        if ctx.is_declared(param) {
            return Err(TypeError::DuplicateParameter(param.name().to_owned()));
        }
        ctx.declare(param)?;
    }
    check_block(body, &mut ctx)?;
    debug!(declared = ctx.declared_count(), "function body checked");
    Ok(())
}

pub fn check_block(block: &Block, ctx: &mut TypingContext) -> Result<(), TypeError> {
    block.stmts().iter().try_for_each(|stmt| check_stmt(stmt, ctx))
}

pub fn check_stmt(stmt: &Stmt, ctx: &mut TypingContext) -> Result<(), TypeError> {
    trace!(kind = stmt.kind_name(), "check statement");
    ensure_sufficient_stack(|| match stmt {
        Stmt::DefineVar { symbol, value } => {
            let found = value.as_ref().map(|v| infer_expr(v, ctx)).transpose()?;
            ctx.declare(symbol)?;
            match found {
                Some(found) if &found != symbol.ty() => Err(TypeError::TypeMismatch {
                    expected: symbol.ty().clone(),
                    found,
                }),
                _ => Ok(()),
            }
        }
        Stmt::Assign { symbol, value } => {
            let found = infer_expr(value, ctx)?;
            if !ctx.is_declared(symbol) {
                return Err(TypeError::UndeclaredVariable(symbol.name().to_owned()));
            }
            if &found != symbol.ty() {
                return Err(TypeError::TypeMismatch {
                    expected: symbol.ty().clone(),
                    found,
                });
            }
            Ok(())
        }
        Stmt::Return(value) => check_return(value.as_ref(), ctx),
        Stmt::If {
            pred,
            then_block,
            else_block,
        } => {
            check_predicate(pred, ctx)?;
            check_block(then_block, &mut ctx.branch())?;
            check_block(else_block, &mut ctx.branch())
        }
        Stmt::While { pred, body } => {
            check_predicate(pred, ctx)?;
            check_block(body, &mut ctx.branch())
        }
        Stmt::Call(call) => check_call(call, ctx).map(|_| ()),
    })
}

fn check_return(value: Option<&Expr>, ctx: &TypingContext) -> Result<(), TypeError> {
    match (ctx.return_type(), value) {
        (ReturnType::Void, None) => Ok(()),
        (ReturnType::Void, Some(_)) => Err(TypeError::VoidReturnWithValue),
        (ReturnType::Value(expected), None) => Err(TypeError::MissingReturnValue(expected.clone())),
        (ReturnType::Value(expected), Some(value)) => {
            let found = infer_expr(value, ctx)?;
            if &found == expected {
                Ok(())
            } else {
                Err(TypeError::ReturnTypeMismatch {
                    expected: ctx.return_type().clone(),
                    found,
                })
            }
        }
    }
}

fn check_predicate(pred: &Expr, ctx: &TypingContext) -> Result<(), TypeError> {
    match infer_expr(pred, ctx)? {
        Type::Bool => Ok(()),
        other => Err(TypeError::NonBoolPredicate(other)),
    }
}

#[cfg(test)]
mod tests;
