//! Native target setup and object emission.
//!
//! LLVM's native target is process-global state: it is initialized lazily,
//! exactly once, the first time a program is JIT-compiled or emitted.

use std::path::Path;
use std::sync::OnceLock;

use inkwell::module::Module;
use inkwell::targets::{
    CodeModel, FileType, InitializationConfig, RelocMode, Target, TargetMachine,
};
use tracing::debug;

use crate::options::OptLevel;
use crate::BackendError;

static NATIVE_TARGET: OnceLock<Result<(), String>> = OnceLock::new();

/// Initialize the native LLVM target.
///
/// Safe to call any number of times; the outcome of the first call is reused.
pub fn initialize_native_target() -> Result<(), BackendError> {
    NATIVE_TARGET
        .get_or_init(|| {
            debug!("initializing native target");
            Target::initialize_native(&InitializationConfig::default())
        })
        .clone()
        .map_err(BackendError::TargetInit)
}

/// Target machine for the host: default triple, host CPU and features.
pub fn native_target_machine(opt_level: OptLevel) -> Result<TargetMachine, BackendError> {
    initialize_native_target()?;

    let triple = TargetMachine::get_default_triple();
    let triple_str = triple.as_str().to_string_lossy().into_owned();
    let target = Target::from_triple(&triple).map_err(|e| BackendError::TargetMachine {
        triple: triple_str.clone(),
        message: e.to_string(),
    })?;

    let cpu = TargetMachine::get_host_cpu_name().to_string();
    let features = TargetMachine::get_host_cpu_features().to_string();
    target
        .create_target_machine(
            &triple,
            &cpu,
            &features,
            opt_level.into(),
            RelocMode::PIC,
            CodeModel::Default,
        )
        .ok_or_else(|| BackendError::TargetMachine {
            triple: triple_str,
            message: "LLVM returned no target machine".to_string(),
        })
}

/// Write `module` to `path` as a native object file.
///
/// The module is stamped with the host triple and data layout first.
pub fn emit_object(module: &Module<'_>, path: &Path, opt_level: OptLevel) -> Result<(), BackendError> {
    let machine = native_target_machine(opt_level)?;
    module.set_triple(&machine.get_triple());
    module.set_data_layout(&machine.get_target_data().get_data_layout());

    debug!(path = %path.display(), "emitting object file");
    machine
        .write_to_file(module, FileType::Object, path)
        .map_err(|e| BackendError::ObjectEmission {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
