//! Declaration and scoping rules.

use petra_ir::{Expr, ReturnType, Stmt, SymbolTable, Type};
use pretty_assertions::assert_eq;

use super::{block, Fixture};
use crate::TypeError;

fn int32(v: i128) -> Expr {
    Expr::int32(v).unwrap()
}

#[test]
fn test_declarations_accumulate_in_block() {
    let mut fx = Fixture::new();
    let x = fx.sym("x", Type::INT32);
    let y = fx.sym("y", Type::INT32);
    let result = fx.check(
        &[],
        Type::INT32,
        vec![
            Stmt::define(&x, int32(1)),
            Stmt::define(&y, Expr::add(Expr::var(&x), int32(2))),
            Stmt::ret(Expr::var(&y)),
        ],
    );
    assert_eq!(result, Ok(()));
}

#[test]
fn test_use_before_declaration() {
    let mut fx = Fixture::new();
    let x = fx.sym("x", Type::INT32);
    let result = fx.check(&[], Type::INT32, vec![Stmt::ret(Expr::var(&x))]);
    assert_eq!(result, Err(TypeError::UndeclaredVariable("x".into())));
}

#[test]
fn test_symbols_from_another_table_are_distinct() {
    let mut fx = Fixture::new();
    let a = fx.sym("a", Type::INT32);
    let b = SymbolTable::new().declare("b", Type::INT64).unwrap();
    let result = fx.check(
        &[],
        Type::INT64,
        vec![Stmt::define(&a, int32(1)), Stmt::ret(Expr::var(&b))],
    );
    assert_eq!(result, Err(TypeError::UndeclaredVariable("b".into())));
}

#[test]
fn test_redeclaration_in_same_scope() {
    let mut fx = Fixture::new();
    let x = fx.sym("x", Type::INT32);
    let result = fx.check(
        &[],
        ReturnType::Void,
        vec![Stmt::define(&x, int32(1)), Stmt::define(&x, int32(2))],
    );
    assert_eq!(result, Err(TypeError::Redeclaration("x".into())));
}

#[test]
fn test_branch_declaration_does_not_leak() {
    let mut fx = Fixture::new();
    let x = fx.sym("x", Type::INT32);
    let result = fx.check(
        &[],
        Type::INT32,
        vec![
            Stmt::if_then(Expr::bool(true), block(vec![Stmt::define(&x, int32(1))])),
            Stmt::ret(Expr::var(&x)),
        ],
    );
    assert_eq!(result, Err(TypeError::UndeclaredVariable("x".into())));
}

#[test]
fn test_branch_declaration_invisible_in_sibling() {
    let mut fx = Fixture::new();
    let x = fx.sym("x", Type::INT32);
    let result = fx.check(
        &[],
        ReturnType::Void,
        vec![Stmt::if_else(
            Expr::bool(true),
            block(vec![Stmt::define(&x, int32(1))]),
            block(vec![Stmt::assign(&x, int32(2))]),
        )],
    );
    assert_eq!(result, Err(TypeError::UndeclaredVariable("x".into())));
}

#[test]
fn test_same_symbol_declared_in_each_branch() {
    let mut fx = Fixture::new();
    let x = fx.sym("x", Type::INT32);
    let result = fx.check(
        &[],
        ReturnType::Void,
        vec![
            Stmt::if_else(
                Expr::bool(false),
                block(vec![Stmt::define(&x, int32(1))]),
                block(vec![Stmt::define(&x, int32(2))]),
            ),
            Stmt::while_loop(Expr::bool(false), block(vec![Stmt::define(&x, int32(3))])),
            Stmt::define(&x, int32(4)),
        ],
    );
    assert_eq!(result, Ok(()));
}

#[test]
fn test_define_type_mismatch() {
    let mut fx = Fixture::new();
    let x = fx.sym("x", Type::INT64);
    let result = fx.check(&[], ReturnType::Void, vec![Stmt::define(&x, int32(1))]);
    assert_eq!(
        result,
        Err(TypeError::TypeMismatch {
            expected: Type::INT64,
            found: Type::INT32,
        })
    );
}

#[test]
fn test_uninitialized_define_then_assign() {
    let mut fx = Fixture::new();
    let pair = Type::structure([("a", Type::INT32), ("b", Type::BOOL)]).unwrap();
    let s = fx.sym("s", pair);
    let result = fx.check(
        &[],
        Type::INT32,
        vec![
            Stmt::define_uninit(&s),
            Stmt::assign(&s, Expr::set_element(Expr::var(&s), "a", int32(5))),
            Stmt::ret(Expr::get_element(Expr::var(&s), "a")),
        ],
    );
    assert_eq!(result, Ok(()));
}

#[test]
fn test_assign_requires_declaration_and_type() {
    let mut fx = Fixture::new();
    let x = fx.sym("x", Type::INT8);
    let undeclared = fx.check(&[], ReturnType::Void, vec![Stmt::assign(&x, Expr::int8(1).unwrap())]);
    assert_eq!(undeclared, Err(TypeError::UndeclaredVariable("x".into())));

    let mismatched = fx.check(
        &[x.clone()],
        ReturnType::Void,
        vec![Stmt::assign(&x, Expr::bool(true))],
    );
    assert_eq!(
        mismatched,
        Err(TypeError::TypeMismatch {
            expected: Type::INT8,
            found: Type::BOOL,
        })
    );
}

#[test]
fn test_duplicate_parameter() {
    let mut fx = Fixture::new();
    let a = fx.sym("a", Type::INT32);
    let result = fx.check(&[a.clone(), a], ReturnType::Void, vec![]);
    assert_eq!(result, Err(TypeError::DuplicateParameter("a".into())));
}

#[test]
fn test_parameter_cannot_be_redefined() {
    let mut fx = Fixture::new();
    let a = fx.sym("a", Type::INT32);
    let result = fx.check(&[a.clone()], ReturnType::Void, vec![Stmt::define(&a, int32(0))]);
    assert_eq!(result, Err(TypeError::Redeclaration("a".into())));
}

#[test]
fn test_predicates_must_be_bool() {
    let fx = Fixture::new();
    let result = fx.check(
        &[],
        ReturnType::Void,
        vec![Stmt::while_loop(int32(1), block(vec![]))],
    );
    assert_eq!(result, Err(TypeError::NonBoolPredicate(Type::INT32)));
}
