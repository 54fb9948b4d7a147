//! LLVM instruction builder.
//!
//! Wraps an LLVM `IRBuilder` positioned in one function and exposes the
//! handful of instructions Petra lowers to. Every instruction returns a
//! `Result`; builder failures surface as [`BackendError::Builder`].
//!
//! | Concern | Location |
//! |---------|----------|
//! | Low-level LLVM ops, locals | `builder.rs` (this file) |
//! | Expression dispatch, constants | `expressions.rs` |
//! | Operators, short-circuit logic | `operators.rs` |
//! | Element access | `aggregates.rs` |
//! | `if` / `while` | `control_flow.rs` |
//! | Statements, calls, function bodies | `functions.rs` |

use inkwell::basic_block::BasicBlock;
use inkwell::builder::Builder as LLVMBuilder;
use inkwell::types::BasicTypeEnum;
use inkwell::values::{BasicMetadataValueEnum, BasicValueEnum, FunctionValue, IntValue, PointerValue};
use inkwell::IntPredicate;
use rustc_hash::FxHashMap;

use petra_ir::SymbolId;

use crate::context::CodegenCx;
use crate::BackendError;

pub type BuildResult<T> = Result<T, BackendError>;

/// Stack slot backing a variable or parameter.
#[derive(Debug, Clone, Copy)]
pub struct LocalSlot<'ll> {
    pub ptr: PointerValue<'ll>,
    /// Type of the stored value (needed for load instruction).
    pub ty: BasicTypeEnum<'ll>,
}

/// Stack slots by symbol.
///
/// Every variable lives in memory and is loaded on each use; LLVM's own
/// passes promote slots to registers. Symbol ids are unique per program, so
/// one flat map serves the whole function regardless of nesting.
#[derive(Debug, Default)]
pub struct Locals<'ll> {
    slots: FxHashMap<SymbolId, LocalSlot<'ll>>,
}

impl<'ll> Locals<'ll> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, id: SymbolId, ptr: PointerValue<'ll>, ty: BasicTypeEnum<'ll>) {
        self.slots.insert(id, LocalSlot { ptr, ty });
    }

    pub fn get(&self, id: SymbolId) -> Option<LocalSlot<'ll>> {
        self.slots.get(&id).copied()
    }
}

pub struct Builder<'a, 'll> {
    llbuilder: LLVMBuilder<'ll>,
    cx: &'a CodegenCx<'ll>,
}

impl<'a, 'll> Builder<'a, 'll> {
    /// Create a builder positioned at the end of `bb`.
    pub fn build(cx: &'a CodegenCx<'ll>, bb: BasicBlock<'ll>) -> Self {
        let llbuilder = cx.llcx().create_builder();
        llbuilder.position_at_end(bb);
        Self { llbuilder, cx }
    }

    #[inline]
    pub fn cx(&self) -> &'a CodegenCx<'ll> {
        self.cx
    }

    pub fn current_block(&self) -> Option<BasicBlock<'ll>> {
        self.llbuilder.get_insert_block()
    }

    pub fn position_at_end(&self, bb: BasicBlock<'ll>) {
        self.llbuilder.position_at_end(bb);
    }

    pub fn append_block(&self, function: FunctionValue<'ll>, name: &str) -> BasicBlock<'ll> {
        self.cx.llcx().append_basic_block(function, name)
    }

    /// Whether the current block already ends in a terminator.
    pub fn is_terminated(&self) -> bool {
        self.current_block()
            .and_then(|bb| bb.get_terminator())
            .is_some()
    }

    // -- Terminators --

    pub fn ret_void(&self) -> BuildResult<()> {
        self.llbuilder.build_return(None)?;
        Ok(())
    }

    pub fn ret(&self, val: BasicValueEnum<'ll>) -> BuildResult<()> {
        self.llbuilder.build_return(Some(&val))?;
        Ok(())
    }

    pub fn br(&self, dest: BasicBlock<'ll>) -> BuildResult<()> {
        self.llbuilder.build_unconditional_branch(dest)?;
        Ok(())
    }

    pub fn cond_br(
        &self,
        cond: IntValue<'ll>,
        then_bb: BasicBlock<'ll>,
        else_bb: BasicBlock<'ll>,
    ) -> BuildResult<()> {
        self.llbuilder
            .build_conditional_branch(cond, then_bb, else_bb)?;
        Ok(())
    }

    pub fn unreachable(&self) -> BuildResult<()> {
        self.llbuilder.build_unreachable()?;
        Ok(())
    }

    // -- Arithmetic --

    pub fn add(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> BuildResult<IntValue<'ll>> {
        Ok(self.llbuilder.build_int_add(lhs, rhs, name)?)
    }

    pub fn sub(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> BuildResult<IntValue<'ll>> {
        Ok(self.llbuilder.build_int_sub(lhs, rhs, name)?)
    }

    pub fn mul(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> BuildResult<IntValue<'ll>> {
        Ok(self.llbuilder.build_int_mul(lhs, rhs, name)?)
    }

    /// Signed division.
    pub fn sdiv(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> BuildResult<IntValue<'ll>> {
        Ok(self.llbuilder.build_int_signed_div(lhs, rhs, name)?)
    }

    /// Signed remainder.
    pub fn srem(&self, lhs: IntValue<'ll>, rhs: IntValue<'ll>, name: &str) -> BuildResult<IntValue<'ll>> {
        Ok(self.llbuilder.build_int_signed_rem(lhs, rhs, name)?)
    }

    /// Bitwise complement; logical negation on `i1`.
    pub fn not(&self, val: IntValue<'ll>, name: &str) -> BuildResult<IntValue<'ll>> {
        Ok(self.llbuilder.build_not(val, name)?)
    }

    pub fn icmp(
        &self,
        pred: IntPredicate,
        lhs: IntValue<'ll>,
        rhs: IntValue<'ll>,
        name: &str,
    ) -> BuildResult<IntValue<'ll>> {
        Ok(self.llbuilder.build_int_compare(pred, lhs, rhs, name)?)
    }

    // -- Memory --

    pub fn alloca(&self, ty: BasicTypeEnum<'ll>, name: &str) -> BuildResult<PointerValue<'ll>> {
        Ok(self.llbuilder.build_alloca(ty, name)?)
    }

    pub fn load(
        &self,
        ty: BasicTypeEnum<'ll>,
        ptr: PointerValue<'ll>,
        name: &str,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        Ok(self.llbuilder.build_load(ty, ptr, name)?)
    }

    pub fn store(&self, val: BasicValueEnum<'ll>, ptr: PointerValue<'ll>) -> BuildResult<()> {
        self.llbuilder.build_store(ptr, val)?;
        Ok(())
    }

    /// Allocate a stack slot in the entry block of `function`.
    ///
    /// Entry-block allocas run once per call even when requested from inside a
    /// loop body, and are what `mem2reg` promotes. The builder's position is
    /// restored to the end of the current block afterwards.
    pub fn create_entry_alloca(
        &self,
        function: FunctionValue<'ll>,
        name: &str,
        ty: BasicTypeEnum<'ll>,
    ) -> BuildResult<PointerValue<'ll>> {
        let entry = function
            .get_first_basic_block()
            .ok_or_else(|| BackendError::invariant("function has no entry block"))?;
        let current = self.current_block();

        match entry.get_first_instruction() {
            Some(first) => self.llbuilder.position_before(&first),
            None => self.position_at_end(entry),
        }
        let ptr = self.alloca(ty, name);

        if let Some(bb) = current {
            self.position_at_end(bb);
        }
        ptr
    }

    // -- Aggregates --

    pub fn extract_value(
        &self,
        agg: BasicValueEnum<'ll>,
        index: u32,
        name: &str,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        Ok(match agg {
            BasicValueEnum::StructValue(value) => {
                self.llbuilder.build_extract_value(value, index, name)?
            }
            BasicValueEnum::ArrayValue(value) => {
                self.llbuilder.build_extract_value(value, index, name)?
            }
            other => {
                return Err(BackendError::invariant(format!(
                    "element access on non-aggregate value {other:?}"
                )))
            }
        })
    }

    /// A copy of `agg` with element `index` replaced by `val`.
    pub fn insert_value(
        &self,
        agg: BasicValueEnum<'ll>,
        val: BasicValueEnum<'ll>,
        index: u32,
        name: &str,
    ) -> BuildResult<BasicValueEnum<'ll>> {
        Ok(match agg {
            BasicValueEnum::StructValue(value) => self
                .llbuilder
                .build_insert_value(value, val, index, name)?
                .into_struct_value()
                .into(),
            BasicValueEnum::ArrayValue(value) => self
                .llbuilder
                .build_insert_value(value, val, index, name)?
                .into_array_value()
                .into(),
            other => {
                return Err(BackendError::invariant(format!(
                    "element update on non-aggregate value {other:?}"
                )))
            }
        })
    }

    // -- Calls --

    /// Returns `None` when the callee returns void.
    pub fn call(
        &self,
        callee: FunctionValue<'ll>,
        args: &[BasicValueEnum<'ll>],
        name: &str,
    ) -> BuildResult<Option<BasicValueEnum<'ll>>> {
        let args_meta: Vec<BasicMetadataValueEnum<'ll>> = args.iter().map(|v| (*v).into()).collect();
        // Void results cannot carry a name.
        let name = if callee.get_type().get_return_type().is_none() { "" } else { name };
        let call_val = self.llbuilder.build_call(callee, &args_meta, name)?;
        Ok(call_val.try_as_basic_value().basic())
    }
}
