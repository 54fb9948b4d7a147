use petra_ir::{Call, ReturnType};

use super::infer_expr;
use crate::{TypeError, TypingContext};

/// Check a call against the callee's registered signature.
///
/// Arguments are checked left to right; the first mismatch wins. Returns the
/// callee's return type, which is `Void` for procedures.
pub fn check_call(call: &Call, ctx: &TypingContext) -> Result<ReturnType, TypeError> {
    let name = call.name();
    let sig = ctx
        .function(name)
        .ok_or_else(|| TypeError::UndeclaredFunction(name.to_owned()))?;
    if sig.params.len() != call.args().len() {
        return Err(TypeError::ArityMismatch {
            name: name.to_owned(),
            expected: sig.params.len(),
            found: call.args().len(),
        });
    }
    for (index, (arg, expected)) in call.args().iter().zip(&sig.params).enumerate() {
        let found = infer_expr(arg, ctx)?;
        if &found != expected {
            return Err(TypeError::ArgTypeMismatch {
                name: name.to_owned(),
                index,
                expected: expected.clone(),
                found,
            });
        }
    }
    Ok(sig.ret.clone())
}
