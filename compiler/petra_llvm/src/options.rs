//! Compilation options.
//!
//! Defaults favour fast JIT turnaround: no optimization, no IR dump. Both can
//! be switched from the environment without touching code:
//!
//! - `PETRA_OPT_LEVEL`: `0`..=`3`, passed to the JIT and to object emission
//! - `PETRA_DEBUG_LLVM`: any value prints the module IR to stderr before JIT

use inkwell::OptimizationLevel;
use tracing::warn;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OptLevel {
    #[default]
    None,
    Less,
    Default,
    Aggressive,
}

impl OptLevel {
    /// `0`..=`3`, as in `-O0`..`-O3`.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(OptLevel::None),
            1 => Some(OptLevel::Less),
            2 => Some(OptLevel::Default),
            3 => Some(OptLevel::Aggressive),
            _ => None,
        }
    }
}

impl From<OptLevel> for OptimizationLevel {
    fn from(level: OptLevel) -> Self {
        match level {
            OptLevel::None => OptimizationLevel::None,
            OptLevel::Less => OptimizationLevel::Less,
            OptLevel::Default => OptimizationLevel::Default,
            OptLevel::Aggressive => OptimizationLevel::Aggressive,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub opt_level: OptLevel,
    /// Print the module IR to stderr before JIT compilation.
    pub dump_ir: bool,
}

impl CompileOptions {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("PETRA_OPT_LEVEL").ok().as_deref(),
            std::env::var("PETRA_DEBUG_LLVM").ok().as_deref(),
        )
    }

    fn from_vars(opt_level: Option<&str>, debug_llvm: Option<&str>) -> Self {
        let opt_level = match opt_level {
            None => OptLevel::default(),
            Some(raw) => match raw.trim().parse().ok().and_then(OptLevel::from_level) {
                Some(level) => level,
                None => {
                    warn!(value = raw, "ignoring PETRA_OPT_LEVEL: expected 0, 1, 2 or 3");
                    OptLevel::default()
                }
            },
        };
        CompileOptions {
            opt_level,
            dump_ir: debug_llvm.is_some_and(|v| !v.is_empty()),
        }
    }

    #[must_use]
    pub fn with_opt_level(mut self, opt_level: OptLevel) -> Self {
        self.opt_level = opt_level;
        self
    }

    #[must_use]
    pub fn with_dump_ir(mut self, dump_ir: bool) -> Self {
        self.dump_ir = dump_ir;
        self
    }
}
