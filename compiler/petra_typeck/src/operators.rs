//! Operand rules for the built-in operators.
//!
//! No implicit coercion: binary operands must have identical types. Arithmetic
//! and ordering accept integers only; equality also accepts `Bool`; logical
//! connectives and `!` accept `Bool` only.

use petra_ir::{ArithOp, CompareOp, EqualityOp, LogicalOp, Type};

use crate::TypeError;

fn incompatible(op: &'static str, left: &Type, right: &Type) -> TypeError {
    TypeError::IncompatibleTypes {
        op,
        left: left.clone(),
        right: right.clone(),
    }
}

/// Result type of `left op right`: the shared integer type.
pub fn check_arith(op: ArithOp, left: &Type, right: &Type) -> Result<Type, TypeError> {
    if left == right && left.is_int() {
        Ok(left.clone())
    } else {
        Err(incompatible(op.as_str(), left, right))
    }
}

pub fn check_compare(op: CompareOp, left: &Type, right: &Type) -> Result<Type, TypeError> {
    if left == right && left.is_int() {
        Ok(Type::Bool)
    } else {
        Err(incompatible(op.as_str(), left, right))
    }
}

pub fn check_equality(op: EqualityOp, left: &Type, right: &Type) -> Result<Type, TypeError> {
    if left == right && (left.is_int() || left.is_bool()) {
        Ok(Type::Bool)
    } else {
        Err(incompatible(op.as_str(), left, right))
    }
}

pub fn check_logical(op: LogicalOp, left: &Type, right: &Type) -> Result<Type, TypeError> {
    if left.is_bool() && right.is_bool() {
        Ok(Type::Bool)
    } else {
        Err(incompatible(op.as_str(), left, right))
    }
}

pub fn check_not(operand: &Type) -> Result<Type, TypeError> {
    if operand.is_bool() {
        Ok(Type::Bool)
    } else {
        Err(TypeError::IncompatibleOperand {
            op: "!",
            operand: operand.clone(),
        })
    }
}
