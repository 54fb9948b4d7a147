//! Test modules for LLVM codegen.

/// Creates `context` and a `program` named after the test.
///
/// Honors `RUST_LOG`, so `RUST_LOG=petra_llvm=trace` shows the lowering.
///
/// # Example
/// ```ignore
/// #[test]
/// fn test_example() {
///     setup_program!(test_example);
///     // now use: program
/// }
/// ```
macro_rules! setup_program {
    ($name:ident) => {
        $crate::init_tracing();
        let context = inkwell::context::Context::create();
        #[allow(unused_mut, reason = "not every test registers functions")]
        let mut program = $crate::Program::with_options(
            &context,
            stringify!($name),
            $crate::CompileOptions::from_env(),
        );
    };
}


pub mod helper {
    use petra_ir::{Block, Expr, Stmt};

    use crate::Program;

    pub fn block(stmts: Vec<Stmt>) -> Block {
        Block::new(stmts).unwrap()
    }

    pub fn int32(value: i128) -> Expr {
        Expr::int32(value).unwrap()
    }

    pub fn int64(value: i128) -> Expr {
        Expr::int64(value).unwrap()
    }

    /// JIT the program and call `name` as a nullary function returning `R`.
    pub fn run<R: Copy + 'static>(program: &Program<'_>, name: &str) -> R {
        let exe = program.compile().unwrap();
        let function = unsafe { exe.get_function::<unsafe extern "C" fn() -> R>(name) }.unwrap();
        unsafe { function.call() }
    }

    pub fn run_i32(program: &Program<'_>, name: &str) -> i32 {
        run::<i32>(program, name)
    }

    pub fn run_i64(program: &Program<'_>, name: &str) -> i64 {
        run::<i64>(program, name)
    }
}
