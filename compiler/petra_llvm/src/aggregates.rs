//! Element access on array and struct values.
//!
//! Aggregates are SSA values: reads are `extractvalue`, and an update builds a
//! new value with `insertvalue`, leaving the original untouched.

use inkwell::values::{BasicValueEnum, FunctionValue};

use petra_ir::{Expr, Field};

use crate::builder::{BuildResult, Builder, Locals};
use crate::expressions::checked_type;
use crate::BackendError;

impl<'ll> Builder<'_, 'll> {
    /// Resolve `field` against the checked type of `aggregate`.
    fn field_index(&self, aggregate: &Expr, field: &Field) -> BuildResult<u32> {
        let ty = checked_type(aggregate)?;
        let (index, _) = petra_typeck::resolve_field(&ty, field)
            .map_err(|e| BackendError::invariant(format!("unresolved element access: {e}")))?;
        Ok(index as u32)
    }

    pub(crate) fn compile_get_element(
        &self,
        aggregate: &Expr,
        field: &Field,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        let index = self.field_index(aggregate, field)?;
        let value = self.compile_expr(aggregate, locals, function)?;
        self.extract_value(value, index, "elem")
    }

    pub(crate) fn compile_set_element(
        &self,
        aggregate: &Expr,
        field: &Field,
        value: &Expr,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        let index = self.field_index(aggregate, field)?;
        let agg = self.compile_expr(aggregate, locals, function)?;
        let value = self.compile_expr(value, locals, function)?;
        self.insert_value(agg, value, index, "updated")
    }
}
