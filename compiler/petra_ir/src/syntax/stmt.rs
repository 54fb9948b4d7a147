//! Statements, calls and blocks.

use super::Expr;
use crate::validate::{check_reachability, validate_identifier, IdentKind};
use crate::{Symbol, ValidationError};

/// A call by function name. Usable as an expression or as a statement.
#[derive(Clone, Debug)]
pub struct Call {
    name: String,
    args: Vec<Expr>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_identifier(IdentKind::Function, &name)?;
        Ok(Call { name, args })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

#[derive(Clone, Debug)]
pub enum Stmt {
    /// Introduce a variable. Without an initializer its storage is undefined
    /// until the first assignment.
    DefineVar { symbol: Symbol, value: Option<Expr> },
    Assign { symbol: Symbol, value: Expr },
    Return(Option<Expr>),
    If {
        pred: Expr,
        then_block: Block,
        else_block: Block,
    },
    While { pred: Expr, body: Block },
    Call(Call),
}

impl Stmt {
    /// Short name of the statement kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::DefineVar { .. } => "define",
            Stmt::Assign { .. } => "assign",
            Stmt::Return(_) => "return",
            Stmt::If { .. } => "if",
            Stmt::While { .. } => "while",
            Stmt::Call(_) => "call",
        }
    }

    pub fn define(symbol: &Symbol, value: Expr) -> Self {
        Stmt::DefineVar {
            symbol: symbol.clone(),
            value: Some(value),
        }
    }

    pub fn define_uninit(symbol: &Symbol) -> Self {
        Stmt::DefineVar {
            symbol: symbol.clone(),
            value: None,
        }
    }

    pub fn assign(symbol: &Symbol, value: Expr) -> Self {
        Stmt::Assign {
            symbol: symbol.clone(),
            value,
        }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }

    pub fn ret_void() -> Self {
        Stmt::Return(None)
    }

    pub fn if_else(pred: Expr, then_block: Block, else_block: Block) -> Self {
        Stmt::If {
            pred,
            then_block,
            else_block,
        }
    }

    /// `if` with an empty `else` arm.
    pub fn if_then(pred: Expr, then_block: Block) -> Self {
        Stmt::if_else(pred, then_block, Block::default())
    }

    pub fn while_loop(pred: Expr, body: Block) -> Self {
        Stmt::While { pred, body }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Result<Self, ValidationError> {
        Call::new(name, args).map(Stmt::Call)
    }
}

impl From<Call> for Stmt {
    fn from(call: Call) -> Self {
        Stmt::Call(call)
    }
}

/// Ordered statement list with no statement after a direct `return`.
#[derive(Clone, Debug, Default)]
pub struct Block {
    stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Result<Self, ValidationError> {
        check_reachability(&stmts)?;
        Ok(Block { stmts })
    }

    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}
