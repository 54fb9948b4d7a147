use crate::{FloatWidth, IntWidth, Type, ValidationError};

/// Literal value carried by [`ExprKind::Const`](super::ExprKind::Const).
///
/// Integer constants always fit their width; [`Constant::int`] enforces it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Constant {
    Bool(bool),
    Int { width: IntWidth, value: i64 },
    Float32(f32),
    Float64(f64),
}

impl Constant {
    pub fn int(width: IntWidth, value: i128) -> Result<Self, ValidationError> {
        Type::Int(width).range_check(value)?;
        let value = i64::try_from(value).map_err(|_| ValidationError::IntOutOfRange {
            ty: Type::Int(width).to_string(),
            value,
        })?;
        Ok(Constant::Int { width, value })
    }

    pub fn ty(&self) -> Type {
        match self {
            Constant::Bool(_) => Type::Bool,
            Constant::Int { width, .. } => Type::Int(*width),
            Constant::Float32(_) => Type::Float(FloatWidth::W32),
            Constant::Float64(_) => Type::Float(FloatWidth::W64),
        }
    }
}
