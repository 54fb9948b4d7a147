//! Expression nodes.
//!
//! Composite constructors never fail: their children were validated when they
//! were built. Constructors that take a name, a literal or an operator tag
//! validate it and return `Result`.
//!
//! Each expression carries a slot for its checked type. The slot is empty
//! until the type checker visits the node, and the backend reads it back when
//! lowering.

use std::cell::RefCell;

use super::{Call, Constant};
use crate::{ArithOp, CompareOp, EqualityOp, Field, IntWidth, LogicalOp, Symbol, Type, ValidationError};

#[derive(Clone, Debug)]
pub enum ExprKind {
    Const(Constant),
    Var(Symbol),
    Arith {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Equality {
        op: EqualityOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
    /// Read one element of an array or struct value.
    GetElement { aggregate: Box<Expr>, field: Field },
    /// A copy of `aggregate` with one element replaced by `value`.
    SetElement {
        aggregate: Box<Expr>,
        field: Field,
        value: Box<Expr>,
    },
    /// Load through a pointer.
    Deref(Box<Expr>),
    Call(Call),
}

#[derive(Clone, Debug)]
pub struct Expr {
    kind: ExprKind,
    ty: RefCell<Option<Type>>,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            kind,
            ty: RefCell::new(None),
        }
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// The type recorded by the type checker, if it has run.
    pub fn get_type(&self) -> Option<Type> {
        self.ty.borrow().clone()
    }

    /// Record the checked type of this node.
    pub fn set_type(&self, ty: Type) {
        *self.ty.borrow_mut() = Some(ty);
    }

    // Literals

    pub fn constant(constant: Constant) -> Self {
        Expr::new(ExprKind::Const(constant))
    }

    pub fn bool(value: bool) -> Self {
        Expr::constant(Constant::Bool(value))
    }

    pub fn int(width: IntWidth, value: i128) -> Result<Self, ValidationError> {
        Constant::int(width, value).map(Expr::constant)
    }

    pub fn int8(value: i128) -> Result<Self, ValidationError> {
        Expr::int(IntWidth::W8, value)
    }

    pub fn int16(value: i128) -> Result<Self, ValidationError> {
        Expr::int(IntWidth::W16, value)
    }

    pub fn int32(value: i128) -> Result<Self, ValidationError> {
        Expr::int(IntWidth::W32, value)
    }

    pub fn int64(value: i128) -> Result<Self, ValidationError> {
        Expr::int(IntWidth::W64, value)
    }

    pub fn float32(value: f32) -> Self {
        Expr::constant(Constant::Float32(value))
    }

    pub fn float64(value: f64) -> Self {
        Expr::constant(Constant::Float64(value))
    }

    pub fn var(symbol: &Symbol) -> Self {
        Expr::new(ExprKind::Var(symbol.clone()))
    }

    // Operators

    pub fn arith(op: ArithOp, left: Expr, right: Expr) -> Self {
        Expr::new(ExprKind::Arith {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Arithmetic from its textual tag, e.g. `"+"`.
    pub fn arithmetic(op: &str, left: Expr, right: Expr) -> Result<Self, ValidationError> {
        Ok(Expr::arith(op.parse()?, left, right))
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::arith(ArithOp::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Expr::arith(ArithOp::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Expr::arith(ArithOp::Mul, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Expr::arith(ArithOp::Div, left, right)
    }

    pub fn rem(left: Expr, right: Expr) -> Self {
        Expr::arith(ArithOp::Mod, left, right)
    }

    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Self {
        Expr::new(ExprKind::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Comparison from its textual tag, e.g. `"<="`.
    pub fn comparison(op: &str, left: Expr, right: Expr) -> Result<Self, ValidationError> {
        Ok(Expr::compare(op.parse()?, left, right))
    }

    pub fn lt(left: Expr, right: Expr) -> Self {
        Expr::compare(CompareOp::Lt, left, right)
    }

    pub fn lte(left: Expr, right: Expr) -> Self {
        Expr::compare(CompareOp::Lte, left, right)
    }

    pub fn gt(left: Expr, right: Expr) -> Self {
        Expr::compare(CompareOp::Gt, left, right)
    }

    pub fn gte(left: Expr, right: Expr) -> Self {
        Expr::compare(CompareOp::Gte, left, right)
    }

    pub fn equality(op: EqualityOp, left: Expr, right: Expr) -> Self {
        Expr::new(ExprKind::Equality {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn eq(left: Expr, right: Expr) -> Self {
        Expr::equality(EqualityOp::Eq, left, right)
    }

    pub fn neq(left: Expr, right: Expr) -> Self {
        Expr::equality(EqualityOp::Neq, left, right)
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::new(ExprKind::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::logical(LogicalOp::And, left, right)
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::logical(LogicalOp::Or, left, right)
    }

    pub fn not(operand: Expr) -> Self {
        Expr::new(ExprKind::Not(Box::new(operand)))
    }

    // Aggregates and pointers

    pub fn get_element(aggregate: Expr, field: impl Into<Field>) -> Self {
        Expr::new(ExprKind::GetElement {
            aggregate: Box::new(aggregate),
            field: field.into(),
        })
    }

    pub fn set_element(aggregate: Expr, field: impl Into<Field>, value: Expr) -> Self {
        Expr::new(ExprKind::SetElement {
            aggregate: Box::new(aggregate),
            field: field.into(),
            value: Box::new(value),
        })
    }

    pub fn deref(pointer: Expr) -> Self {
        Expr::new(ExprKind::Deref(Box::new(pointer)))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Result<Self, ValidationError> {
        Call::new(name, args).map(|call| Expr::new(ExprKind::Call(call)))
    }
}

impl From<Call> for Expr {
    fn from(call: Call) -> Self {
        Expr::new(ExprKind::Call(call))
    }
}
