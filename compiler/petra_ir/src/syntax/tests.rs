//! Construction-time validation of syntax nodes.

use pretty_assertions::assert_eq;

use super::*;
use crate::{IntWidth, SymbolTable, Type, ValidationError};

#[test]
fn test_int_literal_range() {
    assert!(Expr::int8(127).is_ok());
    assert!(Expr::int8(-128).is_ok());
    assert_eq!(
        Expr::int8(300).unwrap_err(),
        ValidationError::IntOutOfRange {
            ty: "Int8".into(),
            value: 300,
        }
    );
    assert!(Expr::int64(i128::from(i64::MAX) + 1).is_err());
    assert!(Expr::int64(i128::from(i64::MIN)).is_ok());
}

#[test]
fn test_int_literal_bounds_every_width() {
    for width in IntWidth::ALL {
        let half = 1i128 << (width.bits() - 1);
        assert!(Expr::int(width, -half).is_ok(), "{width:?} min");
        assert!(Expr::int(width, half - 1).is_ok(), "{width:?} max");
        assert_eq!(
            Expr::int(width, -half - 1).unwrap_err(),
            ValidationError::IntOutOfRange {
                ty: Type::Int(width).to_string(),
                value: -half - 1,
            }
        );
        assert_eq!(
            Expr::int(width, half).unwrap_err(),
            ValidationError::IntOutOfRange {
                ty: Type::Int(width).to_string(),
                value: half,
            }
        );
    }
}

#[test]
fn test_constant_types() {
    assert_eq!(Constant::Bool(true).ty(), Type::BOOL);
    assert_eq!(Constant::int(IntWidth::W16, -5).unwrap().ty(), Type::INT16);
    assert_eq!(Constant::Float32(1.5).ty(), Type::FLOAT32);
    assert_eq!(Constant::Float64(1.5).ty(), Type::FLOAT64);
}

#[test]
fn test_textual_operators() {
    let one = || Expr::int32(1).unwrap();
    let lt = Expr::comparison("<", one(), one()).unwrap();
    assert!(matches!(lt.kind(), ExprKind::Compare { op: CompareOp::Lt, .. }));
    let rem = Expr::arithmetic("%", one(), one()).unwrap();
    assert!(matches!(rem.kind(), ExprKind::Arith { op: ArithOp::Mod, .. }));
    assert!(matches!(
        Expr::comparison("=<", one(), one()),
        Err(ValidationError::InvalidOperator { family: "comparison", .. })
    ));
}

#[test]
fn test_call_names_validated() {
    assert!(Expr::call("malloc", vec![]).is_ok());
    assert!(matches!(
        Expr::call("Malloc", vec![]),
        Err(ValidationError::InvalidIdentifier { .. })
    ));
    assert!(Stmt::call("9lives", vec![]).is_err());
}

#[test]
fn test_block_rejects_statement_after_return() {
    let err = Block::new(vec![
        Stmt::ret(Expr::int32(1).unwrap()),
        Stmt::ret(Expr::int32(2).unwrap()),
    ])
    .unwrap_err();
    assert_eq!(err, ValidationError::UnreachableStatement { index: 1 });
}

#[test]
fn test_return_inside_branch_does_not_end_outer_block() {
    let inner = Block::new(vec![Stmt::ret_void()]).unwrap();
    let outer = Block::new(vec![
        Stmt::if_else(Expr::bool(true), inner.clone(), inner),
        Stmt::ret_void(),
    ]);
    assert!(outer.is_ok());
}

#[test]
fn test_type_slot_starts_empty() {
    let mut symbols = SymbolTable::new();
    let x = symbols.declare("x", Type::INT32).unwrap();
    let expr = Expr::add(Expr::var(&x), Expr::int32(2).unwrap());
    assert_eq!(expr.get_type(), None);
    expr.set_type(Type::INT32);
    assert_eq!(expr.get_type(), Some(Type::INT32));
}

#[test]
fn test_uninitialized_definition() {
    let mut symbols = SymbolTable::new();
    let s = symbols.declare("s", Type::array(Type::INT8, 2)).unwrap();
    match Stmt::define_uninit(&s) {
        Stmt::DefineVar { symbol, value } => {
            assert_eq!(symbol, s);
            assert!(value.is_none());
        }
        other => panic!("expected a definition, got {other:?}"),
    }
}

#[test]
fn test_element_field_conversions() {
    let agg = || Expr::bool(false);
    let by_name = Expr::get_element(agg(), "a");
    let by_index = Expr::get_element(agg(), 2usize);
    assert!(matches!(by_name.kind(), ExprKind::GetElement { field: crate::Field::Name(n), .. } if n == "a"));
    assert!(matches!(by_index.kind(), ExprKind::GetElement { field: crate::Field::Index(2), .. }));
}

#[test]
fn test_statement_kind_names() {
    let stmts = [
        Stmt::ret_void(),
        Stmt::while_loop(Expr::bool(false), Block::default()),
        Stmt::call("tick", vec![]).unwrap(),
    ];
    let names: Vec<_> = stmts.iter().map(Stmt::kind_name).collect();
    assert_eq!(names, ["return", "while", "call"]);
}
