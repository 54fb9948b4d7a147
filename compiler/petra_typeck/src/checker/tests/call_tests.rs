//! Calls as statements and expressions.

use petra_ir::{Expr, ReturnType, Stmt, Type};
use pretty_assertions::assert_eq;

use super::Fixture;
use crate::TypeError;

#[test]
fn test_void_call_statement() {
    let fx = Fixture::new();
    let result = fx.check(&[], ReturnType::Void, vec![Stmt::call("tick", vec![]).unwrap()]);
    assert_eq!(result, Ok(()));
}

#[test]
fn test_value_call_statement_discards_result() {
    let fx = Fixture::new();
    let result = fx.check(&[], ReturnType::Void, vec![Stmt::call("seven", vec![]).unwrap()]);
    assert_eq!(result, Ok(()));
}

#[test]
fn test_void_call_as_expression() {
    let mut fx = Fixture::new();
    let x = fx.sym("x", Type::INT32);
    let result = fx.check(
        &[],
        ReturnType::Void,
        vec![Stmt::define(&x, Expr::call("tick", vec![]).unwrap())],
    );
    assert_eq!(result, Err(TypeError::VoidAsExpr("tick".into())));
}

#[test]
fn test_undeclared_function() {
    let fx = Fixture::new();
    let result = fx.check(&[], ReturnType::Void, vec![Stmt::call("missing", vec![]).unwrap()]);
    assert_eq!(result, Err(TypeError::UndeclaredFunction("missing".into())));
}

#[test]
fn test_arity_mismatch() {
    let fx = Fixture::new();
    let result = fx.check(
        &[],
        ReturnType::Void,
        vec![Stmt::call("pair", vec![Expr::int32(1).unwrap()]).unwrap()],
    );
    assert_eq!(
        result,
        Err(TypeError::ArityMismatch {
            name: "pair".into(),
            expected: 2,
            found: 1,
        })
    );
}

#[test]
fn test_argument_type_mismatch() {
    let fx = Fixture::new();
    let result = fx.check(
        &[],
        ReturnType::Void,
        vec![Stmt::call("pair", vec![Expr::int32(1).unwrap(), Expr::int32(0).unwrap()]).unwrap()],
    );
    assert_eq!(
        result,
        Err(TypeError::ArgTypeMismatch {
            name: "pair".into(),
            index: 1,
            expected: Type::BOOL,
            found: Type::INT32,
        })
    );
}

#[test]
fn test_call_result_feeds_deref() {
    let mut fx = Fixture::new();
    let p = fx.sym("p", Type::pointer(Type::INT64));
    let result = fx.check(
        &[],
        Type::INT64,
        vec![
            Stmt::define(&p, Expr::call("malloc", vec![Expr::int64(8).unwrap()]).unwrap()),
            Stmt::ret(Expr::deref(Expr::var(&p))),
        ],
    );
    assert_eq!(result, Ok(()));
}
