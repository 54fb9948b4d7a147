//! Checker tests, grouped by topic.

mod call_tests;
mod scoping_tests;

use petra_ir::{Block, ReturnType, Stmt, Symbol, SymbolTable, Type};

use crate::{FnSig, FnTable, TypeError, TypingContext};

/// Symbols plus a fixed set of callable signatures.
struct Fixture {
    symbols: SymbolTable,
    functions: FnTable,
}

impl Fixture {
    fn new() -> Self {
        let mut functions = FnTable::new();
        functions.insert("tick".to_owned(), FnSig::new(vec![], ReturnType::Void));
        functions.insert("seven".to_owned(), FnSig::new(vec![], Type::INT32));
        functions.insert(
            "malloc".to_owned(),
            FnSig::new(vec![Type::INT64], Type::pointer(Type::INT64)),
        );
        functions.insert(
            "pair".to_owned(),
            FnSig::new(vec![Type::INT32, Type::BOOL], Type::INT32),
        );
        Fixture {
            symbols: SymbolTable::new(),
            functions,
        }
    }

    fn sym(&mut self, name: &str, ty: Type) -> Symbol {
        self.symbols.declare(name, ty).unwrap()
    }

    fn check(&self, params: &[Symbol], ret: impl Into<ReturnType>, stmts: Vec<Stmt>) -> Result<(), TypeError> {
        let body = Block::new(stmts).unwrap();
        crate::check_function(params, &body, TypingContext::new(self.functions.clone(), ret))
    }
}

fn block(stmts: Vec<Stmt>) -> Block {
    Block::new(stmts).unwrap()
}
