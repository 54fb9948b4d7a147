//! In-process execution of compiled programs.

use inkwell::execution_engine::{ExecutionEngine, JitFunction, UnsafeFunctionPointer};
use inkwell::module::Module;
use tracing::debug;

use crate::options::CompileOptions;
use crate::target::initialize_native_target;
use crate::BackendError;

/// A JIT-compiled snapshot of a program.
///
/// Owns its own copy of the module, so the program it came from can keep
/// growing and be compiled again.
pub struct Executable<'ll> {
    engine: ExecutionEngine<'ll>,
    _module: Module<'ll>,
}

impl<'ll> Executable<'ll> {
    pub(crate) fn new(module: Module<'ll>, options: &CompileOptions) -> Result<Self, BackendError> {
        initialize_native_target()?;
        if options.dump_ir {
            eprintln!("{}", module.print_to_string().to_string());
        }
        debug!(opt_level = ?options.opt_level, "creating JIT execution engine");
        let engine = module
            .create_jit_execution_engine(options.opt_level.into())
            .map_err(|e| BackendError::Jit(e.to_string()))?;
        Ok(Executable {
            engine,
            _module: module,
        })
    }

    /// Address of the compiled function `name`.
    pub fn function_address(&self, name: &str) -> Result<usize, BackendError> {
        self.engine
            .get_function_address(name)
            .map_err(|e| missing_symbol(name, &e))
    }

    /// Typed handle to the compiled function `name`.
    ///
    /// # Safety
    ///
    /// `F` must match the function's Petra signature under the C ABI, e.g.
    /// `unsafe extern "C" fn(i64) -> i32` for `(Int64) -> Int32`.
    pub unsafe fn get_function<F: UnsafeFunctionPointer>(
        &self,
        name: &str,
    ) -> Result<JitFunction<'ll, F>, BackendError> {
        // SAFETY: forwarded to the caller.
        unsafe { self.engine.get_function(name) }.map_err(|e| missing_symbol(name, &e))
    }
}

fn missing_symbol(name: &str, err: &impl std::fmt::Display) -> BackendError {
    BackendError::MissingSymbol {
        name: name.to_owned(),
        message: err.to_string(),
    }
}
