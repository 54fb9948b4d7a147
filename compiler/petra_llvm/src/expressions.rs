//! Expression lowering dispatch.

use inkwell::values::{BasicValueEnum, FunctionValue};
use tracing::trace;

use petra_ir::stack::ensure_sufficient_stack;
use petra_ir::{Constant, Expr, ExprKind, Symbol, Type};

use crate::builder::{BuildResult, Builder, Locals};
use crate::BackendError;

/// The type recorded on `expr` by the type checker.
pub(crate) fn checked_type(expr: &Expr) -> BuildResult<Type> {
    expr.get_type()
        .ok_or_else(|| BackendError::invariant("expression lowered before type checking"))
}

impl<'ll> Builder<'_, 'll> {
    /// Lower an expression to a value at the current insertion point.
    pub fn compile_expr(
        &self,
        expr: &Expr,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        ensure_sufficient_stack(|| match expr.kind() {
            ExprKind::Const(constant) => Ok(self.compile_constant(constant)),
            ExprKind::Var(symbol) => self.load_variable(symbol, locals),
            ExprKind::Arith { op, left, right } => self.compile_arith(*op, left, right, locals, function),
            ExprKind::Compare { op, left, right } => self.compile_compare(*op, left, right, locals, function),
            ExprKind::Equality { op, left, right } => {
                self.compile_equality(*op, left, right, locals, function)
            }
            ExprKind::Logical { op, left, right } => {
                self.compile_logical(*op, left, right, locals, function)
            }
            ExprKind::Not(operand) => self.compile_not(operand, locals, function),
            ExprKind::GetElement { aggregate, field } => {
                self.compile_get_element(aggregate, field, locals, function)
            }
            ExprKind::SetElement {
                aggregate,
                field,
                value,
            } => self.compile_set_element(aggregate, field, value, locals, function),
            ExprKind::Deref(pointer) => {
                let pointee = self.cx().llvm_type(&checked_type(expr)?);
                let ptr = self.compile_expr(pointer, locals, function)?.into_pointer_value();
                self.load(pointee, ptr, "deref")
            }
            ExprKind::Call(call) => self
                .compile_call(call, locals, function)?
                .ok_or_else(|| BackendError::invariant(format!("void call to `{}` used as a value", call.name()))),
        })
    }

    fn compile_constant(&self, constant: &Constant) -> BasicValueEnum<'ll> {
        let cx = self.cx();
        match *constant {
            Constant::Bool(value) => cx.type_i1().const_int(u64::from(value), false).into(),
            // Two's complement bits; LLVM truncates to the target width.
            Constant::Int { width, value } => cx.type_int(width).const_int(value as u64, true).into(),
            Constant::Float32(value) => cx
                .type_float(petra_ir::FloatWidth::W32)
                .const_float(f64::from(value))
                .into(),
            Constant::Float64(value) => cx.type_float(petra_ir::FloatWidth::W64).const_float(value).into(),
        }
    }

    pub(crate) fn load_variable(&self, symbol: &Symbol, locals: &Locals<'ll>) -> BuildResult<BasicValueEnum<'ll>> {
        let slot = locals
            .get(symbol.id())
            .ok_or_else(|| BackendError::invariant(format!("no storage for variable `{symbol}`")))?;
        trace!(name = symbol.name(), "load variable");
        self.load(slot.ty, slot.ptr, symbol.name())
    }
}
