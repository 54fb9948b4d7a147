//! Element access on arrays and structs.

use petra_ir::{Expr, Field, Type};

use super::infer_expr;
use crate::{TypeError, TypingContext};

/// Position and type of `field` within `ty`.
pub fn resolve_field(ty: &Type, field: &Field) -> Result<(usize, Type), TypeError> {
    let len = match ty {
        Type::Array(array) => array.length,
        Type::Struct(structure) => structure.len(),
        _ => return Err(TypeError::NotAnAggregate(ty.clone())),
    };
    match ty.resolve_field(field) {
        Ok((index, field_ty)) => Ok((index, field_ty.clone())),
        Err(_) => Err(match field {
            Field::Index(index) => TypeError::IndexOutOfBounds {
                ty: ty.clone(),
                index: *index,
                len,
            },
            Field::Name(name) => TypeError::UnknownField {
                ty: ty.clone(),
                field: name.clone(),
            },
        }),
    }
}

pub fn infer_get_element(
    aggregate: &Expr,
    field: &Field,
    ctx: &TypingContext,
) -> Result<Type, TypeError> {
    let ty = infer_expr(aggregate, ctx)?;
    resolve_field(&ty, field).map(|(_, field_ty)| field_ty)
}

/// The result has the aggregate's own type.
pub fn infer_set_element(
    aggregate: &Expr,
    field: &Field,
    value: &Expr,
    ctx: &TypingContext,
) -> Result<Type, TypeError> {
    let ty = infer_expr(aggregate, ctx)?;
    let (_, expected) = resolve_field(&ty, field)?;
    let found = infer_expr(value, ctx)?;
    if found != expected {
        return Err(TypeError::TypeMismatch { expected, found });
    }
    Ok(ty)
}
