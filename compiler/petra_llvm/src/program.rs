//! Program assembly.
//!
//! A [`Program`] is one LLVM module plus the table of function signatures
//! visible to the bodies added to it. Functions are registered one at a time;
//! each registration validates, type-checks and lowers its body, and either
//! succeeds completely or leaves the program exactly as it was.

use std::path::Path;

use inkwell::context::Context;
use tracing::{debug, instrument, warn};

use petra_ir::validate::{validate_block, validate_identifier, IdentKind};
use petra_ir::{Block, ReturnType, Symbol, SymbolTable, Type, ValidationError};
use petra_typeck::{check_function, FnSig, FnTable, TypingContext};

use crate::context::CodegenCx;
use crate::functions::define_function;
use crate::jit::Executable;
use crate::options::CompileOptions;
use crate::target::emit_object;
use crate::{BackendError, ProgramError};

pub struct Program<'ll> {
    cx: CodegenCx<'ll>,
    functions: FnTable,
    symbols: SymbolTable,
    options: CompileOptions,
}

impl<'ll> Program<'ll> {
    /// Empty program with options read from the environment.
    pub fn new(context: &'ll Context, name: &str) -> Self {
        Self::with_options(context, name, CompileOptions::from_env())
    }

    pub fn with_options(context: &'ll Context, name: &str, options: CompileOptions) -> Self {
        Program {
            cx: CodegenCx::new(context, name),
            functions: FnTable::new(),
            symbols: SymbolTable::new(),
            options,
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Create a fresh variable or parameter symbol for this program.
    pub fn symbol(&mut self, name: &str, ty: Type) -> Result<Symbol, ValidationError> {
        self.symbols.declare(name, ty)
    }

    pub fn signature(&self, name: &str) -> Option<&FnSig> {
        self.functions.get(name)
    }

    /// Register the signature of a function defined elsewhere, e.g. `malloc`.
    #[instrument(level = "debug", skip(self, params, ret))]
    pub fn add_func_decl(
        &mut self,
        name: &str,
        params: &[Type],
        ret: impl Into<ReturnType>,
    ) -> Result<&mut Self, ProgramError> {
        validate_identifier(IdentKind::Function, name)?;
        self.ensure_unregistered(name)?;

        let sig = FnSig::new(params.to_vec(), ret);
        self.cx.declare_fn(name, &sig);
        debug!(%sig, "declared external function");
        self.functions.insert(name.to_owned(), sig);
        Ok(self)
    }

    /// Register and define a function.
    ///
    /// The body is validated, type-checked against every signature registered
    /// so far plus its own, lowered and verified. The signature is committed
    /// only once all of that succeeds.
    #[instrument(level = "debug", skip(self, params, ret, body))]
    pub fn add_func(
        &mut self,
        name: &str,
        params: &[Symbol],
        ret: impl Into<ReturnType>,
        body: Block,
    ) -> Result<&mut Self, ProgramError> {
        let ret = ret.into();
        validate_identifier(IdentKind::Function, name)?;
        for param in params {
            validate_identifier(IdentKind::Parameter, param.name())?;
        }
        validate_block(&body)?;
        self.ensure_unregistered(name)?;

        let sig = FnSig::new(params.iter().map(|p| p.ty().clone()).collect(), ret.clone());
        let candidate = self.functions.update(name.to_owned(), sig.clone());
        check_function(params, &body, TypingContext::new(candidate.clone(), ret.clone()))?;

        let function = self.cx.declare_fn(name, &sig);
        let lowered = define_function(&self.cx, function, params, &ret, &body).and_then(|()| {
            if function.verify(false) {
                Ok(())
            } else {
                Err(BackendError::InvalidFunction(name.to_owned()))
            }
        });
        if let Err(err) = lowered {
            warn!(error = %err, "discarding partially lowered function");
            self.cx.discard_function(name);
            return Err(err.into());
        }

        self.functions = candidate;
        debug!(%sig, "defined function");
        Ok(self)
    }

    /// The whole module as LLVM textual IR.
    pub fn to_ir_text(&self) -> String {
        self.cx.llmod().print_to_string().to_string()
    }

    /// Write the module to `path` as a native object file.
    pub fn save_object(&self, path: impl AsRef<Path>) -> Result<(), BackendError> {
        self.verify()?;
        emit_object(self.cx.llmod(), path.as_ref(), self.options.opt_level)
    }

    /// JIT-compile a snapshot of the module for in-process execution.
    pub fn compile(&self) -> Result<Executable<'ll>, BackendError> {
        self.verify()?;
        Executable::new(self.cx.llmod().clone(), &self.options)
    }

    fn verify(&self) -> Result<(), BackendError> {
        self.cx
            .llmod()
            .verify()
            .map_err(|e| BackendError::InvalidModule(e.to_string()))
    }

    fn ensure_unregistered(&self, name: &str) -> Result<(), ProgramError> {
        if self.functions.contains_key(name) {
            return Err(ProgramError::DuplicateFunction(name.to_owned()));
        }
        Ok(())
    }
}
