//! Expression inference.

use petra_ir::{Expr, IntWidth, ReturnType, SymbolTable, Type};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::{FnSig, FnTable};

fn empty_ctx() -> TypingContext {
    TypingContext::new(FnTable::new(), ReturnType::Void)
}

fn record() -> Type {
    Type::structure([("a", Type::INT32), ("b", Type::INT32), ("c", Type::INT8)]).unwrap()
}

#[test]
fn test_types_recorded_on_every_node() {
    let left = Expr::int16(3).unwrap();
    let expr = Expr::lt(left, Expr::int16(4).unwrap());
    assert_eq!(infer_expr(&expr, &empty_ctx()), Ok(Type::BOOL));
    assert_eq!(expr.get_type(), Some(Type::BOOL));
    match expr.kind() {
        ExprKind::Compare { left, right, .. } => {
            assert_eq!(left.get_type(), Some(Type::INT16));
            assert_eq!(right.get_type(), Some(Type::INT16));
        }
        other => panic!("unexpected node {other:?}"),
    }
}

#[test]
fn test_left_operand_checked_first() {
    let mut symbols = SymbolTable::new();
    let a = symbols.declare("a", Type::INT32).unwrap();
    let b = symbols.declare("b", Type::INT32).unwrap();
    let expr = Expr::add(Expr::var(&a), Expr::var(&b));
    assert_eq!(
        infer_expr(&expr, &empty_ctx()),
        Err(TypeError::UndeclaredVariable("a".into()))
    );
}

#[test]
fn test_logical_and_not() {
    let expr = Expr::not(Expr::or(Expr::bool(false), Expr::bool(true)));
    assert_eq!(infer_expr(&expr, &empty_ctx()), Ok(Type::BOOL));
    let bad = Expr::not(Expr::int8(1).unwrap());
    assert_eq!(
        infer_expr(&bad, &empty_ctx()),
        Err(TypeError::IncompatibleOperand {
            op: "!",
            operand: Type::INT8,
        })
    );
}

#[test]
fn test_get_element_by_name_and_index() {
    let mut symbols = SymbolTable::new();
    let s = symbols.declare("s", record()).unwrap();
    let mut ctx = empty_ctx();
    ctx.declare(&s).unwrap();
    assert_eq!(infer_expr(&Expr::get_element(Expr::var(&s), "c"), &ctx), Ok(Type::INT8));
    assert_eq!(infer_expr(&Expr::get_element(Expr::var(&s), 1usize), &ctx), Ok(Type::INT32));
    assert_eq!(
        infer_expr(&Expr::get_element(Expr::var(&s), "d"), &ctx),
        Err(TypeError::UnknownField {
            ty: record(),
            field: "d".into(),
        })
    );
    assert_eq!(
        infer_expr(&Expr::get_element(Expr::var(&s), 3usize), &ctx),
        Err(TypeError::IndexOutOfBounds {
            ty: record(),
            index: 3,
            len: 3,
        })
    );
}

#[test]
fn test_array_access() {
    let mut symbols = SymbolTable::new();
    let arr_ty = Type::array(Type::INT32, 3);
    let arr = symbols.declare("arr", arr_ty.clone()).unwrap();
    let mut ctx = empty_ctx();
    ctx.declare(&arr).unwrap();
    let update = Expr::set_element(Expr::var(&arr), 2usize, Expr::int32(3).unwrap());
    assert_eq!(infer_expr(&update, &ctx), Ok(arr_ty));
    let wrong_value = Expr::set_element(Expr::var(&arr), 0usize, Expr::int64(3).unwrap());
    assert_eq!(
        infer_expr(&wrong_value, &ctx),
        Err(TypeError::TypeMismatch {
            expected: Type::INT32,
            found: Type::INT64,
        })
    );
    let out_of_bounds = Expr::get_element(Expr::var(&arr), 3usize);
    assert!(matches!(
        infer_expr(&out_of_bounds, &ctx),
        Err(TypeError::IndexOutOfBounds { index: 3, len: 3, .. })
    ));
}

#[test]
fn test_element_of_scalar() {
    let expr = Expr::get_element(Expr::int32(1).unwrap(), 0usize);
    assert_eq!(
        infer_expr(&expr, &empty_ctx()),
        Err(TypeError::NotAnAggregate(Type::INT32))
    );
}

#[test]
fn test_deref() {
    let mut symbols = SymbolTable::new();
    let p = symbols.declare("p", Type::pointer(Type::INT8)).unwrap();
    let mut ctx = empty_ctx();
    ctx.declare(&p).unwrap();
    assert_eq!(infer_expr(&Expr::deref(Expr::var(&p)), &ctx), Ok(Type::INT8));
    assert_eq!(
        infer_expr(&Expr::deref(Expr::bool(true)), &ctx),
        Err(TypeError::NotAPointer(Type::BOOL))
    );
}

#[test]
fn test_call_expression_type() {
    let mut functions = FnTable::new();
    functions.insert("seven".to_owned(), FnSig::new(vec![], Type::INT32));
    let ctx = TypingContext::new(functions, ReturnType::Void);
    let expr = Expr::add(Expr::call("seven", vec![]).unwrap(), Expr::int32(1).unwrap());
    assert_eq!(infer_expr(&expr, &ctx), Ok(Type::INT32));
}

fn int_width() -> impl Strategy<Value = IntWidth> {
    prop::sample::select(IntWidth::ALL.to_vec())
}

proptest! {
    #[test]
    fn add_requires_identical_widths(a in int_width(), b in int_width(), x in -100i128..100, y in -100i128..100) {
        let expr = Expr::add(Expr::int(a, x).unwrap(), Expr::int(b, y).unwrap());
        let result = infer_expr(&expr, &empty_ctx());
        if a == b {
            prop_assert_eq!(result, Ok(Type::Int(a)));
        } else {
            let is_incompatible = matches!(result, Err(TypeError::IncompatibleTypes { op: "+", .. }));
            prop_assert!(is_incompatible);
        }
    }

    #[test]
    fn equality_never_coerces(a in int_width(), b in int_width()) {
        let expr = Expr::eq(Expr::int(a, 0).unwrap(), Expr::int(b, 0).unwrap());
        prop_assert_eq!(infer_expr(&expr, &empty_ctx()).is_ok(), a == b);
    }
}
