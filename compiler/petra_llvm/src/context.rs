//! Codegen context.
//!
//! Owns the LLVM module being built and maps Petra types to LLVM types. One
//! context per [`Program`](crate::Program).

use std::cell::RefCell;

use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::types::{
    BasicMetadataTypeEnum, BasicType, BasicTypeEnum, FloatType, FunctionType, IntType, PointerType,
};
use inkwell::values::FunctionValue;
use inkwell::AddressSpace;
use rustc_hash::FxHashMap;

use petra_ir::{FloatWidth, IntWidth, ReturnType, Type};
use petra_typeck::FnSig;

pub struct CodegenCx<'ll> {
    /// The LLVM context (owns all LLVM types and values).
    pub llcx: &'ll Context,
    /// The LLVM module being compiled.
    pub llmod: Module<'ll>,
    /// Opaque pointer type shared by every Petra pointer.
    pub ptr_type: PointerType<'ll>,
    /// Declared functions by name.
    pub instances: RefCell<FxHashMap<String, FunctionValue<'ll>>>,
}

impl<'ll> CodegenCx<'ll> {
    #[must_use]
    pub fn new(context: &'ll Context, module_name: &str) -> Self {
        Self {
            llcx: context,
            llmod: context.create_module(module_name),
            ptr_type: context.ptr_type(AddressSpace::default()),
            instances: RefCell::new(FxHashMap::default()),
        }
    }

    #[inline]
    pub fn llcx(&self) -> &'ll Context {
        self.llcx
    }

    #[inline]
    pub fn llmod(&self) -> &Module<'ll> {
        &self.llmod
    }

    // -- Type constructors --

    #[inline]
    pub fn type_i1(&self) -> IntType<'ll> {
        self.llcx.bool_type()
    }

    pub fn type_int(&self, width: IntWidth) -> IntType<'ll> {
        match width {
            IntWidth::W8 => self.llcx.i8_type(),
            IntWidth::W16 => self.llcx.i16_type(),
            IntWidth::W32 => self.llcx.i32_type(),
            IntWidth::W64 => self.llcx.i64_type(),
        }
    }

    pub fn type_float(&self, width: FloatWidth) -> FloatType<'ll> {
        match width {
            FloatWidth::W32 => self.llcx.f32_type(),
            FloatWidth::W64 => self.llcx.f64_type(),
        }
    }

    /// LLVM representation of a Petra type.
    ///
    /// Arrays and structs are first-class aggregate values, not pointers.
    /// All pointers share one opaque pointer type; loads take the pointee
    /// type from the Petra side.
    pub fn llvm_type(&self, ty: &Type) -> BasicTypeEnum<'ll> {
        match ty {
            Type::Bool => self.type_i1().into(),
            Type::Int(width) => self.type_int(*width).into(),
            Type::Float(width) => self.type_float(*width).into(),
            Type::Array(array) => self
                .llvm_type(&array.element)
                .array_type(array.length as u32)
                .into(),
            Type::Struct(structure) => {
                let fields: Vec<BasicTypeEnum<'ll>> = structure
                    .fields()
                    .iter()
                    .map(|(_, field)| self.llvm_type(field))
                    .collect();
                self.llcx.struct_type(&fields, false).into()
            }
            Type::Pointer(_) => self.ptr_type.into(),
        }
    }

    pub fn fn_type(&self, sig: &FnSig) -> FunctionType<'ll> {
        let params: Vec<BasicMetadataTypeEnum<'ll>> = sig
            .params
            .iter()
            .map(|param| self.llvm_type(param).into())
            .collect();
        match &sig.ret {
            ReturnType::Void => self.llcx.void_type().fn_type(&params, false),
            ReturnType::Value(ret) => self.llvm_type(ret).fn_type(&params, false),
        }
    }
}
