//! Statements, calls and function bodies.

use inkwell::values::{BasicValueEnum, FunctionValue};
use tracing::{debug, instrument, trace};

use petra_ir::stack::ensure_sufficient_stack;
use petra_ir::{Block, Call, ReturnType, Stmt, Symbol};

use crate::builder::{BuildResult, Builder, Locals};
use crate::context::CodegenCx;
use crate::BackendError;

impl<'ll> Builder<'_, 'll> {
    pub fn compile_stmt(
        &self,
        stmt: &Stmt,
        locals: &mut Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<()> {
        trace!(kind = stmt.kind_name(), "lower statement");
        ensure_sufficient_stack(|| match stmt {
            Stmt::DefineVar { symbol, value } => {
                let ty = self.cx().llvm_type(symbol.ty());
                let slot = self.create_entry_alloca(function, &symbol.unique_name(), ty)?;
                if let Some(value) = value {
                    let value = self.compile_expr(value, locals, function)?;
                    self.store(value, slot)?;
                }
                locals.bind(symbol.id(), slot, ty);
                Ok(())
            }
            Stmt::Assign { symbol, value } => {
                let slot = locals.get(symbol.id()).ok_or_else(|| {
                    BackendError::invariant(format!("assignment to unallocated variable `{symbol}`"))
                })?;
                let value = self.compile_expr(value, locals, function)?;
                self.store(value, slot.ptr)
            }
            Stmt::Return(Some(value)) => {
                let value = self.compile_expr(value, locals, function)?;
                self.ret(value)
            }
            Stmt::Return(None) => self.ret_void(),
            Stmt::If {
                pred,
                then_block,
                else_block,
            } => self.compile_if(pred, then_block, else_block, locals, function),
            Stmt::While { pred, body } => self.compile_while(pred, body, locals, function),
            Stmt::Call(call) => self.compile_call(call, locals, function).map(|_| ()),
        })
    }

    /// Arguments are evaluated left to right, then one call is issued.
    pub(crate) fn compile_call(
        &self,
        call: &Call,
        locals: &Locals<'ll>,
        function: FunctionValue<'ll>,
    ) -> BuildResult<Option<BasicValueEnum<'ll>>> {
        let callee = self
            .cx()
            .get_function(call.name())
            .ok_or_else(|| BackendError::invariant(format!("call to undeclared function `{}`", call.name())))?;
        let args = call
            .args()
            .iter()
            .map(|arg| self.compile_expr(arg, locals, function))
            .collect::<BuildResult<Vec<_>>>()?;
        self.call(callee, &args, "call")
    }
}

/// Lower a checked body into the declared, still empty `function`.
///
/// Each parameter is spilled to its own stack slot and from then on treated
/// like any other variable. If control can reach the end of the body, a void
/// function gets an implicit `ret void` and any other function gets
/// `unreachable`.
#[instrument(level = "debug", skip_all, fields(function = %function.get_name().to_string_lossy()))]
pub(crate) fn define_function<'ll>(
    cx: &CodegenCx<'ll>,
    function: FunctionValue<'ll>,
    params: &[Symbol],
    ret: &ReturnType,
    body: &Block,
) -> BuildResult<()> {
    let entry = cx.llcx().append_basic_block(function, "entry");
    let bx = Builder::build(cx, entry);
    let mut locals = Locals::new();

    for (i, param) in params.iter().enumerate() {
        let value = function
            .get_nth_param(i as u32)
            .ok_or_else(|| BackendError::invariant(format!("missing parameter {i}")))?;
        value.set_name(param.name());
        let ty = cx.llvm_type(param.ty());
        let slot = bx.create_entry_alloca(function, &param.unique_name(), ty)?;
        bx.store(value, slot)?;
        locals.bind(param.id(), slot, ty);
    }

    bx.compile_block(body, &mut locals, function)?;

    if !bx.is_terminated() {
        debug!(void = ret.is_void(), "body falls through");
        match ret {
            ReturnType::Void => bx.ret_void()?,
            ReturnType::Value(_) => bx.unreachable()?,
        }
    }
    Ok(())
}
