//! Expression type inference.
//!
//! [`infer_expr`] checks an expression bottom-up, records the resulting type
//! in each node it visits, and returns the type of the root. Expressions never
//! declare variables, so they only read the context.

mod aggregate;
mod call;

use petra_ir::stack::ensure_sufficient_stack;
use petra_ir::{Expr, ExprKind, Type};
use tracing::trace;

use crate::operators::{check_arith, check_compare, check_equality, check_logical, check_not};
use crate::{TypeError, TypingContext};

pub use aggregate::{infer_get_element, infer_set_element, resolve_field};
pub use call::check_call;

pub fn infer_expr(expr: &Expr, ctx: &TypingContext) -> Result<Type, TypeError> {
    let ty = ensure_sufficient_stack(|| infer_kind(expr.kind(), ctx))?;
    trace!(%ty, "inferred expression");
    expr.set_type(ty.clone());
    Ok(ty)
}

fn infer_kind(kind: &ExprKind, ctx: &TypingContext) -> Result<Type, TypeError> {
    match kind {
        ExprKind::Const(constant) => Ok(constant.ty()),
        ExprKind::Var(symbol) => {
            if ctx.is_declared(symbol) {
                Ok(symbol.ty().clone())
            } else {
                Err(TypeError::UndeclaredVariable(symbol.name().to_owned()))
            }
        }
        ExprKind::Arith { op, left, right } => {
            let (l, r) = infer_operands(left, right, ctx)?;
            check_arith(*op, &l, &r)
        }
        ExprKind::Compare { op, left, right } => {
            let (l, r) = infer_operands(left, right, ctx)?;
            check_compare(*op, &l, &r)
        }
        ExprKind::Equality { op, left, right } => {
            let (l, r) = infer_operands(left, right, ctx)?;
            check_equality(*op, &l, &r)
        }
        ExprKind::Logical { op, left, right } => {
            let (l, r) = infer_operands(left, right, ctx)?;
            check_logical(*op, &l, &r)
        }
        ExprKind::Not(operand) => check_not(&infer_expr(operand, ctx)?),
        ExprKind::GetElement { aggregate, field } => infer_get_element(aggregate, field, ctx),
        ExprKind::SetElement {
            aggregate,
            field,
            value,
        } => infer_set_element(aggregate, field, value, ctx),
        ExprKind::Deref(pointer) => {
            let ty = infer_expr(pointer, ctx)?;
            ty.pointee()
                .cloned()
                .ok_or(TypeError::NotAPointer(ty))
        }
        ExprKind::Call(call) => check_call(call, ctx)?
            .as_type()
            .cloned()
            .ok_or_else(|| TypeError::VoidAsExpr(call.name().to_owned())),
    }
}

/// Left first, then right.
fn infer_operands(left: &Expr, right: &Expr, ctx: &TypingContext) -> Result<(Type, Type), TypeError> {
    let l = infer_expr(left, ctx)?;
    let r = infer_expr(right, ctx)?;
    Ok((l, r))
}

#[cfg(test)]
mod tests;
