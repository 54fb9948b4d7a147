//! LLVM backend for Petra.
//!
//! Lowers checked Petra function bodies to LLVM IR through inkwell, then
//! either JIT-compiles the module for in-process execution or writes it out
//! as a native object file.
//!
//! # Debug Environment Variables
//!
//! - `PETRA_DEBUG_LLVM`: Print LLVM IR to stderr before JIT compilation.
//!   Example: `PETRA_DEBUG_LLVM=1 cargo test`
//!
//! - `PETRA_OPT_LEVEL`: LLVM optimization level, `0` (default) to `3`.
//!
//! - `RUST_LOG=petra_llvm=debug`: Enable debug-level tracing output (call
//!   [`init_tracing`] first). `trace` follows lowering step by step.

// Crate-level lint configuration for codegen-specific patterns
#![allow(
    // LLVM uses u32 for struct/array indices, we use usize in Rust
    clippy::cast_possible_truncation,
    // Petra constants are i64; LLVM takes the two's complement bits as u64
    clippy::cast_sign_loss,
    reason = "LLVM API integer widths"
)]
//!
//! # Architecture
//!
//! - **Context** (`context.rs`): module ownership and type mapping
//! - **Declare** (`declare.rs`): signatures first, bodies second
//! - **Builder** (`builder.rs`): instruction generation and local slots
//! - **Program** (`program.rs`): transactional function registration
//!
//! # Example
//!
//! ```ignore
//! use inkwell::context::Context;
//! use petra_ir::{Block, Expr, Stmt, Type};
//! use petra_llvm::Program;
//!
//! let context = Context::create();
//! let mut program = Program::new(&context, "demo");
//! let body = Block::new(vec![Stmt::ret(Expr::int32(42)?)])?;
//! program.add_func("answer", &[], Type::INT32, body)?;
//!
//! let exe = program.compile()?;
//! let answer = unsafe { exe.get_function::<unsafe extern "C" fn() -> i32>("answer")? };
//! assert_eq!(unsafe { answer.call() }, 42);
//! ```

pub mod builder;
pub mod context;
pub mod declare;
mod error;
pub mod jit;
pub mod options;
pub mod program;
pub mod target;

// -- Private codegen modules (lowering methods on Builder) --
mod aggregates;
mod control_flow;
mod expressions;
mod functions;
mod operators;

#[cfg(test)]
mod tests;

pub use builder::{Builder, Locals};
pub use context::CodegenCx;
pub use error::{BackendError, ProgramError};
pub use jit::Executable;
pub use options::{CompileOptions, OptLevel};
pub use program::Program;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
