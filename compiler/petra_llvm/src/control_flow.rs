//! `if` and `while` lowering.
//!
//! An arm or loop body that does not end in its own terminator gets an
//! explicit branch to the merge block or back to the loop test.

use inkwell::values::FunctionValue;

use petra_ir::{Block, Expr};

use crate::builder::{BuildResult, Builder, Locals};

impl<'ll> Builder<'_, 'll> {
    pub fn compile_block(
        &self,
        block: &Block,
        locals: &mut Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<()> {
        block
            .stmts()
            .iter()
            .try_for_each(|stmt| self.compile_stmt(stmt, locals, function))
    }

    /// ```text
    /// entry:
    ///     br %cond, then, else
    /// then:
    ///     ...
    ///     br merge            ; unless the arm returned
    /// else:
    ///     ...
    ///     br merge
    /// merge:
    /// ```
    pub(crate) fn compile_if(
        &self,
        pred: &Expr,
        then_block: &Block,
        else_block: &Block,
        locals: &mut Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<()> {
        let cond = self.compile_expr(pred, locals, function)?.into_int_value();

        let then_bb = self.append_block(function, "if.then");
        let else_bb = self.append_block(function, "if.else");
        let merge_bb = self.append_block(function, "if.end");
        self.cond_br(cond, then_bb, else_bb)?;

        for (bb, arm) in [(then_bb, then_block), (else_bb, else_block)] {
            self.position_at_end(bb);
            self.compile_block(arm, locals, function)?;
            if !self.is_terminated() {
                self.br(merge_bb)?;
            }
        }

        self.position_at_end(merge_bb);
        Ok(())
    }

    /// The predicate is re-evaluated in `while.test` on every iteration.
    pub(crate) fn compile_while(
        &self,
        pred: &Expr,
        body: &Block,
        locals: &mut Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<()> {
        let test_bb = self.append_block(function, "while.test");
        let body_bb = self.append_block(function, "while.body");
        let end_bb = self.append_block(function, "while.end");
        self.br(test_bb)?;

        self.position_at_end(test_bb);
        let cond = self.compile_expr(pred, locals, function)?.into_int_value();
        self.cond_br(cond, body_bb, end_bb)?;

        self.position_at_end(body_bb);
        self.compile_block(body, locals, function)?;
        if !self.is_terminated() {
            self.br(test_bb)?;
        }

        self.position_at_end(end_bb);
        Ok(())
    }
}
