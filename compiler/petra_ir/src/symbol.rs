//! Typed variable symbols.
//!
//! A [`Symbol`] is a typed variable binding with a process-unique id.
//! Identity is the id alone: two symbols with the same name and type are still
//! distinct variables. Ids are unique across the whole process, so symbols
//! made by different [`SymbolTable`]s or programs can never alias.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::validate::{validate_identifier, IdentKind};
use crate::{Type, ValidationError};

/// Process-unique symbol identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

static NEXT_SYMBOL_ID: AtomicU32 = AtomicU32::new(0);

impl SymbolId {
    /// Only uniqueness matters, not ordering between threads.
    fn fresh() -> Self {
        SymbolId(NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Debug)]
struct SymbolData {
    id: SymbolId,
    name: String,
    ty: Type,
}

/// Typed variable binding. Cheap to clone.
#[derive(Clone)]
pub struct Symbol(Arc<SymbolData>);

impl Symbol {
    pub fn id(&self) -> SymbolId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    /// Name that stays distinct across symbols sharing a source name, e.g. `x.3`.
    pub fn unique_name(&self) -> String {
        format!("{}.{}", self.0.name, self.0.id.0)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}: {}", self.0.name, self.0.id.0, self.0.ty)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// Issues symbols for one program.
#[derive(Debug, Default)]
pub struct SymbolTable {
    issued: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Create a fresh symbol. The name must be a valid identifier.
    pub fn declare(&mut self, name: impl Into<String>, ty: Type) -> Result<Symbol, ValidationError> {
        let name = name.into();
        validate_identifier(IdentKind::Variable, &name)?;
        self.issued += 1;
        Ok(Symbol(Arc::new(SymbolData {
            id: SymbolId::fresh(),
            name,
            ty,
        })))
    }

    /// Number of symbols issued by this table.
    pub fn len(&self) -> usize {
        self.issued
    }

    pub fn is_empty(&self) -> bool {
        self.issued == 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut table = SymbolTable::new();
        let a = table.declare("x", Type::INT32).unwrap();
        let b = table.declare("x", Type::INT32).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.name(), b.name());
        assert_ne!(a.unique_name(), b.unique_name());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_tables_never_share_ids() {
        let mut first = SymbolTable::new();
        let mut second = SymbolTable::new();
        let a = first.declare("a", Type::INT32).unwrap();
        let b = second.declare("b", Type::INT64).unwrap();
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_clone_is_same_symbol() {
        let mut table = SymbolTable::new();
        let a = table.declare("count", Type::INT64).unwrap();
        assert_eq!(a.clone(), a);
        assert_eq!(a.ty(), &Type::INT64);
    }

    #[test]
    fn test_invalid_name_rejected() {
        let mut table = SymbolTable::new();
        let err = table.declare("Count", Type::INT64).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidIdentifier { .. }));
        assert!(table.is_empty());
    }
}
