//! Typing context.
//!
//! Holds the variables declared on the current path, the signatures of every
//! function visible to the body, and the return type of the enclosing
//! function. Both collections are persistent, so branching a context for the
//! arms of an `if` or the body of a `while` is O(1) and declarations made in a
//! branch never leak back into the parent.

use std::fmt;

use petra_ir::{ReturnType, Symbol, Type};

use crate::TypeError;

/// Parameter and return types of a function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FnSig {
    pub params: Vec<Type>,
    pub ret: ReturnType,
}

impl FnSig {
    pub fn new(params: Vec<Type>, ret: impl Into<ReturnType>) -> Self {
        FnSig {
            params,
            ret: ret.into(),
        }
    }
}

impl fmt::Display for FnSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

/// Function signatures by name.
pub type FnTable = im::HashMap<String, FnSig>;

#[derive(Clone, Debug)]
pub struct TypingContext {
    declared: im::HashSet<Symbol>,
    functions: FnTable,
    return_type: ReturnType,
}

impl TypingContext {
    pub fn new(functions: FnTable, return_type: impl Into<ReturnType>) -> Self {
        TypingContext {
            declared: im::HashSet::new(),
            functions,
            return_type: return_type.into(),
        }
    }

    /// Independent copy for a nested block.
    #[must_use]
    pub fn branch(&self) -> Self {
        self.clone()
    }

    /// Add `symbol` to the declared set. Fails if it is already there.
    pub fn declare(&mut self, symbol: &Symbol) -> Result<(), TypeError> {
        if self.declared.insert(symbol.clone()).is_some() {
            return Err(TypeError::Redeclaration(symbol.name().to_owned()));
        }
        Ok(())
    }

    pub fn is_declared(&self, symbol: &Symbol) -> bool {
        self.declared.contains(symbol)
    }

    pub fn declared_count(&self) -> usize {
        self.declared.len()
    }

    pub fn function(&self, name: &str) -> Option<&FnSig> {
        self.functions.get(name)
    }

    pub fn return_type(&self) -> &ReturnType {
        &self.return_type
    }
}
