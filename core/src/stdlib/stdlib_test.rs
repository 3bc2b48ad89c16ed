use pretty_assertions::assert_eq;

use super::{PRIMITIVES, io, list, math};
use crate::api::ErrorCategory;
use crate::atoms::AtomTable;
use crate::env::Env;
use crate::evaluator::EvalErrorKind;
use crate::values::{Symbol, Value};

fn int(n: i64) -> Value {
    Value::int(n)
}

fn symbol(table: &mut AtomTable, name: &str) -> Value {
    let atom = table.intern(name);
    Value::Symbol(Symbol::new(atom, name.into()))
}

#[test]
fn test_registered_names() {
    let mut env = Env::new();
    for (name, primitive) in PRIMITIVES {
        let bound = env.lookup_name(name).unwrap();
        assert_eq!(bound, Value::Primitive(*primitive));
    }
    assert_eq!(
        env.lookup_name("*").unwrap().to_string(),
        "Primitive: MUL"
    );
}

#[test]
fn test_add_and_mul_fold() {
    assert_eq!(math::add(&[]).unwrap(), int(0));
    assert_eq!(math::add(&[int(1), int(2), int(3)]).unwrap(), int(6));
    assert_eq!(math::mul(&[]).unwrap(), int(1));
    assert_eq!(math::mul(&[int(2), int(5)]).unwrap(), int(10));
}

#[test]
fn test_sub_negates_single_argument() {
    assert_eq!(math::sub(&[int(4)]).unwrap(), int(-4));
    assert_eq!(math::sub(&[int(10), int(3), int(2)]).unwrap(), int(5));
    let err = math::sub(&[]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Arity);
}

#[test]
fn test_div() {
    assert_eq!(math::div(&[int(6), int(3)]).unwrap(), int(2));
    assert_eq!(math::div(&[int(4)]).unwrap(), Value::float(0.25));
    assert!(math::div(&[]).is_err());
}

#[test]
fn test_integral_flag_only_affects_rendering() {
    let whole = math::div(&[int(6), int(3)]).unwrap();
    assert_eq!(whole.to_string(), "2");
    let fraction = math::div(&[int(1), int(2)]).unwrap();
    assert_eq!(fraction.to_string(), "0.5");
    let mixed = math::add(&[int(1), Value::float(1.0)]).unwrap();
    assert_eq!(mixed, int(2));
    assert!(!mixed.as_number().unwrap().is_integral());
}

#[test]
fn test_arithmetic_rejects_non_numbers() {
    let err = math::add(&[int(1), Value::string("two")]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            function: "+".into(),
            expected: "Number",
            found: "String",
        }
    );
    assert_eq!(err.category(), ErrorCategory::Type);
}

#[test]
fn test_comparisons_chain() {
    assert_eq!(math::less(&[int(1), int(2), int(3)]).unwrap(), Value::bool(true));
    assert_eq!(math::less(&[int(1), int(3), int(2)]).unwrap(), Value::bool(false));
    assert_eq!(math::greater(&[int(3), int(1)]).unwrap(), Value::bool(true));
    assert_eq!(math::less(&[int(1)]).unwrap(), Value::bool(true));
    assert!(math::greater(&[]).is_err());
    assert!(math::less(&[int(1), Value::Nil]).is_err());
}

#[test]
fn test_equal_is_structural() {
    let mut table = AtomTable::new();
    assert_eq!(math::equal(&[int(2), Value::float(2.0)]).unwrap(), Value::bool(true));
    assert_eq!(
        math::equal(&[Value::string("a"), Value::string("a")]).unwrap(),
        Value::bool(true)
    );
    let a = symbol(&mut table, "a");
    let b = symbol(&mut table, "b");
    assert_eq!(math::equal(&[a.clone(), a.clone()]).unwrap(), Value::bool(true));
    assert_eq!(math::equal(&[a, b]).unwrap(), Value::bool(false));
    assert_eq!(
        math::equal(&[Value::list([int(1)]), Value::quote(Value::list([int(1)]))]).unwrap(),
        Value::bool(true)
    );
}

#[test]
fn test_list_car_cdr() {
    let items = list::list(&[int(1), int(2), int(3)]).unwrap();
    assert_eq!(items.to_string(), "(1 2 3)");
    assert_eq!(list::car(&[items.clone()]).unwrap(), int(1));
    assert_eq!(list::cdr(&[items]).unwrap().to_string(), "(2 3)");
    assert_eq!(list::car(&[Value::List(Vec::new())]).unwrap(), Value::Nil);
    assert_eq!(list::cdr(&[Value::List(Vec::new())]).unwrap().to_string(), "()");
}

#[test]
fn test_list_primitives_keep_quoted_data_quoted() {
    let mut table = AtomTable::new();
    let data = Value::quote(Value::list([
        symbol(&mut table, "f"),
        symbol(&mut table, "x"),
    ]));
    let head = list::car(&[data.clone()]).unwrap();
    assert!(head.is_quoted());
    assert_eq!(head.to_string(), "f");
    let tail = list::cdr(&[data.clone()]).unwrap();
    assert!(tail.is_quoted());

    let consed = list::cons(&[Value::quote(symbol(&mut table, "g")), tail]).unwrap();
    assert!(consed.is_quoted());
    assert_eq!(consed.to_string(), "(g x)");
    assert!(!consed.as_list().unwrap()[0].is_quoted());
}

#[test]
fn test_cons() {
    assert_eq!(list::cons(&[int(1), Value::Nil]).unwrap().to_string(), "(1)");
    assert_eq!(
        list::cons(&[int(1), Value::list([int(2)])]).unwrap().to_string(),
        "(1 2)"
    );
    let err = list::cons(&[int(1), int(2)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Type);
    let err = list::cons(&[int(1)]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Arity);
}

#[test]
fn test_car_arity_and_type() {
    assert_eq!(list::car(&[]).unwrap_err().category(), ErrorCategory::Arity);
    assert_eq!(
        list::car(&[int(1), int(2)]).unwrap_err().category(),
        ErrorCategory::Arity
    );
    assert_eq!(list::car(&[int(1)]).unwrap_err().category(), ErrorCategory::Type);
}

#[test]
fn test_print_renders_space_separated() {
    let rendered = io::render(&[int(1), Value::string("two"), Value::list([int(3)])]);
    assert_eq!(rendered, "1 two (3)");
    assert_eq!(io::print(&[]).unwrap(), Value::Nil);
}
