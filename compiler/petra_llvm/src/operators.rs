//! Operator lowering.
//!
//! Operands are already known to have identical types. Integer operators are
//! signed throughout. `&&` and `||` evaluate their right operand only when
//! needed, through a single stack temporary rather than a phi.

use inkwell::values::{BasicValueEnum, FunctionValue, IntValue};
use inkwell::IntPredicate;

use petra_ir::{ArithOp, CompareOp, EqualityOp, Expr, LogicalOp};

use crate::builder::{BuildResult, Builder, Locals};

impl<'ll> Builder<'_, 'll> {
    fn compile_int_operands(
        &self,
        left: &Expr,
        right: &Expr,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<(IntValue<'ll>, IntValue<'ll>)> {
        let lhs = self.compile_expr(left, locals, function)?.into_int_value();
        let rhs = self.compile_expr(right, locals, function)?.into_int_value();
        Ok((lhs, rhs))
    }

    pub(crate) fn compile_arith(
        &self,
        op: ArithOp,
        left: &Expr,
        right: &Expr,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        let (lhs, rhs) = self.compile_int_operands(left, right, locals, function)?;
        let value = match op {
            ArithOp::Add => self.add(lhs, rhs, "add")?,
            ArithOp::Sub => self.sub(lhs, rhs, "sub")?,
            ArithOp::Mul => self.mul(lhs, rhs, "mul")?,
            ArithOp::Div => self.sdiv(lhs, rhs, "div")?,
            ArithOp::Mod => self.srem(lhs, rhs, "rem")?,
        };
        Ok(value.into())
    }

    pub(crate) fn compile_compare(
        &self,
        op: CompareOp,
        left: &Expr,
        right: &Expr,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        let (lhs, rhs) = self.compile_int_operands(left, right, locals, function)?;
        let pred = match op {
            CompareOp::Lt => IntPredicate::SLT,
            CompareOp::Lte => IntPredicate::SLE,
            CompareOp::Gt => IntPredicate::SGT,
            CompareOp::Gte => IntPredicate::SGE,
        };
        Ok(self.icmp(pred, lhs, rhs, "cmp")?.into())
    }

    /// `Bool` operands are `i1` integers, so one instruction covers both kinds.
    pub(crate) fn compile_equality(
        &self,
        op: EqualityOp,
        left: &Expr,
        right: &Expr,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        let (lhs, rhs) = self.compile_int_operands(left, right, locals, function)?;
        let pred = match op {
            EqualityOp::Eq => IntPredicate::EQ,
            EqualityOp::Neq => IntPredicate::NE,
        };
        Ok(self.icmp(pred, lhs, rhs, "eq")?.into())
    }

    pub(crate) fn compile_not(
        &self,
        operand: &Expr,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        let value = self.compile_expr(operand, locals, function)?.into_int_value();
        Ok(self.not(value, "not")?.into())
    }

    /// The left value is stored as the provisional result. `&&` overwrites it
    /// with the right value only when left is true, `||` only when it is false.
    pub(crate) fn compile_logical(
        &self,
        op: LogicalOp,
        left: &Expr,
        right: &Expr,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        let bool_ty = self.cx().type_i1();
        let result = self.create_entry_alloca(function, "logical", bool_ty.into())?;

        let lhs = self.compile_expr(left, locals, function)?;
        self.store(lhs, result)?;

        let rhs_bb = self.append_block(function, "logical.rhs");
        let end_bb = self.append_block(function, "logical.end");
        match op {
            LogicalOp::And => self.cond_br(lhs.into_int_value(), rhs_bb, end_bb)?,
            LogicalOp::Or => self.cond_br(lhs.into_int_value(), end_bb, rhs_bb)?,
        }

        self.position_at_end(rhs_bb);
        let rhs = self.compile_expr(right, locals, function)?;
        self.store(rhs, result)?;
        self.br(end_bb)?;

        self.position_at_end(end_bb);
        self.load(bool_ty.into(), result, "logical.value")
    }
}
