//! Function declarations.
//!
//! A function is declared (signature only) before its body is lowered, so a
//! body can call itself. External functions are only ever declared; the JIT
//! or the linker resolves them.

use inkwell::values::FunctionValue;
use tracing::trace;

use petra_typeck::FnSig;

use crate::context::CodegenCx;

impl<'ll> CodegenCx<'ll> {
    /// Declare a function, or return the existing declaration of that name.
    pub fn declare_fn(&self, name: &str, sig: &FnSig) -> FunctionValue<'ll> {
        if let Some(func) = self.get_function(name) {
            return func;
        }
        let func = self.llmod.add_function(name, self.fn_type(sig), None);
        trace!(name, %sig, "declared function");
        self.instances.borrow_mut().insert(name.to_owned(), func);
        func
    }

    pub fn get_function(&self, name: &str) -> Option<FunctionValue<'ll>> {
        self.instances.borrow().get(name).copied()
    }

    /// Remove a function and everything emitted into it from the module.
    pub fn discard_function(&self, name: &str) {
        if let Some(func) = self.instances.borrow_mut().remove(name) {
            trace!(name, "discarding function");
            // SAFETY: the function was created by this context and no other
            // function references it: a failed body is only ever called from
            // within itself.
            unsafe { func.delete() };
        }
    }
}
