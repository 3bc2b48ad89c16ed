//! Unit tests for the apply step on hand-built values.

use alloc::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::api::{ErrorCategory, ExecutionOptions};
use crate::values::{Lambda, Symbol};

struct Runner {
    env: Env,
}

impl Runner {
    fn new() -> Self {
        Self { env: Env::new() }
    }

    fn sym(&mut self, name: &str) -> Value {
        Value::Symbol(self.env.symbol(name))
    }

    fn params(&mut self, names: &[&str]) -> alloc::vec::Vec<Symbol> {
        names.iter().map(|name| self.env.symbol(name)).collect()
    }

    fn call(&mut self, items: impl IntoIterator<Item = Value>) -> Result<Value, EvalError> {
        Value::list(items).execute(&mut self.env)
    }
}

#[test]
fn test_leaves_execute_to_themselves() {
    let mut r = Runner::new();
    for value in [Value::Nil, Value::int(1), Value::bool(false), Value::string("s")] {
        assert_eq!(value.execute(&mut r.env).unwrap(), value);
    }
}

#[test]
fn test_symbol_resolves() {
    let mut r = Runner::new();
    r.env.define("x", Value::int(7));
    let x = r.sym("x");
    assert_eq!(x.execute(&mut r.env).unwrap(), Value::int(7));

    let missing = r.sym("missing");
    let err = missing.execute(&mut r.env).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnboundSymbol {
            name: "missing".into()
        }
    );
    assert_eq!(err.category(), ErrorCategory::Binding);
}

#[test]
fn test_quote_executes_to_itself() {
    let mut r = Runner::new();
    let plus = r.sym("+");
    let data = Value::quote(Value::list([plus, Value::int(1), Value::int(2)]));
    let once = data.execute(&mut r.env).unwrap();
    assert!(once.is_quoted());
    assert_eq!(once.to_string(), "(+ 1 2)");
    assert_eq!(once.execute(&mut r.env).unwrap().to_string(), "(+ 1 2)");
}

#[test]
fn test_primitive_head_applies_to_executed_args() {
    let mut r = Runner::new();
    let plus = r.sym("+");
    let times = r.sym("*");
    let inner = Value::list([times, Value::int(2), Value::int(5)]);
    let result = r.call([plus, inner, Value::int(1)]).unwrap();
    assert_eq!(result, Value::int(11));
}

#[test]
fn test_empty_list_executes_to_empty_list() {
    let mut r = Runner::new();
    assert_eq!(r.call([]).unwrap().to_string(), "()");
}

#[test]
fn test_non_callable_head_builds_a_list() {
    let mut r = Runner::new();
    let plus = r.sym("+");
    let sum = Value::list([plus, Value::int(1), Value::int(1)]);
    let result = r.call([Value::int(1), sum]).unwrap();
    assert_eq!(result.to_string(), "(1 2)");
}

#[test]
fn test_lambda_promotes_to_closure() {
    let mut r = Runner::new();
    let params = r.params(&["x"]);
    let body = vec![r.sym("x")];
    let lambda = Value::Lambda(Rc::new(Lambda::new(params, body)));
    let closure = lambda.execute(&mut r.env).unwrap();
    assert!(matches!(closure, Value::Closure(_)));

    let result = r.call([lambda, Value::int(3)]).unwrap();
    assert_eq!(result, Value::int(3));
}

#[test]
fn test_closure_arity_is_exact() {
    let mut r = Runner::new();
    let params = r.params(&["a", "b"]);
    let lambda = Value::Lambda(Rc::new(Lambda::new(params, vec![])));
    let closure = lambda.execute(&mut r.env).unwrap();

    let err = r.call([closure.clone(), Value::int(1)]).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::WrongArgumentCount { found: 1, .. }
    ));
    assert_eq!(err.category(), ErrorCategory::Arity);
    assert_eq!(r.env.depth(), 1);

    assert_eq!(r.call([closure, Value::int(1), Value::int(2)]).unwrap(), Value::Nil);
}

#[test]
fn test_closure_runs_in_captured_frame() {
    crate::test_utils::init_test_logging();
    let mut r = Runner::new();
    r.env.push();
    r.env.define("hidden", Value::int(42));
    let body = vec![r.sym("hidden")];
    let closure = Value::Lambda(Rc::new(Lambda::new(vec![], body)))
        .execute(&mut r.env)
        .unwrap();
    r.env.pop();

    assert!(r.env.lookup_name("hidden").is_none());
    r.env.clear_error();
    assert_eq!(r.call([closure]).unwrap(), Value::int(42));
    assert_eq!(r.env.depth(), 1);
}

#[test]
fn test_closure_restores_frame_after_error() {
    let mut r = Runner::new();
    let body = vec![r.sym("nowhere")];
    let closure = Value::Lambda(Rc::new(Lambda::new(vec![], body)))
        .execute(&mut r.env)
        .unwrap();
    assert!(r.call([closure]).is_err());
    assert_eq!(r.env.depth(), 1);
}

#[test]
fn test_data_level_if() {
    let mut r = Runner::new();
    let if_ = r.sym("if");
    let less = r.sym("<");
    let test = Value::list([less, Value::int(2), Value::int(1)]);
    let form = Value::list([if_, test, Value::int(1), Value::int(2)]);
    assert_eq!(form.execute(&mut r.env).unwrap(), Value::int(2));

    let if_ = r.sym("if");
    let err = r.call([if_, Value::bool(true)]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::MalformedForm { form: "if", .. }));
}

#[test]
fn test_data_level_define_and_set() {
    let mut r = Runner::new();
    let define = r.sym("define");
    let x = r.sym("x");
    let list = r.sym("list");
    let value = Value::list([list, Value::int(1)]);
    let defined = r.call([define, x.clone(), value]).unwrap();
    assert!(defined.is_quoted());
    assert_eq!(r.env.lookup_name("x").unwrap().to_string(), "(1)");

    let set = r.sym("set");
    r.call([set, x, Value::int(2)]).unwrap();
    assert_eq!(r.env.lookup_name("x"), Some(Value::int(2)));

    let set = r.sym("set");
    let y = r.sym("y");
    let err = r.call([set, y, Value::int(2)]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UndefinedSet { name: "y".into() });
}

#[test]
fn test_data_level_let_scopes_bindings() {
    let mut r = Runner::new();
    let let_ = r.sym("let");
    let (a, b, plus) = (r.sym("a"), r.sym("b"), r.sym("+"));
    let bindings = Value::list([
        Value::list([a.clone(), Value::int(1)]),
        Value::list([b.clone(), Value::int(2)]),
    ]);
    let body = Value::list([plus, a, b]);
    assert_eq!(r.call([let_, bindings, body]).unwrap(), Value::int(3));
    assert_eq!(r.env.depth(), 1);
    assert!(r.env.lookup_name("a").is_none());
}

#[test]
fn test_data_level_let_rejects_bad_binding() {
    let mut r = Runner::new();
    let let_ = r.sym("let");
    let a = r.sym("a");
    let bindings = Value::list([Value::list([a, Value::int(1), Value::int(2)])]);
    let err = r.call([let_, bindings]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::MalformedForm { form: "let", .. }));
    assert_eq!(r.env.depth(), 1);
}

#[test]
fn test_data_level_quote_and_lambda() {
    let mut r = Runner::new();
    let quote = r.sym("quote");
    let a = r.sym("a");
    let quoted = r.call([quote, a]).unwrap();
    assert!(quoted.is_quoted());
    assert_eq!(quoted.to_string(), "a");

    let lambda = r.sym("lambda");
    let x = r.sym("x");
    let params = Value::list([x.clone()]);
    let closure = r.call([lambda, params, x]).unwrap();
    assert_eq!(closure.to_string(), "#<closure (x)>");
    assert_eq!(r.call([closure, Value::int(9)]).unwrap(), Value::int(9));
}

#[test]
fn test_depth_limit() {
    let mut env = Env::with_options(ExecutionOptions { max_depth: 2 });
    let let_ = Value::Symbol(env.symbol("let"));
    let empty = Value::List(alloc::vec::Vec::new());
    let innermost = Value::list([let_.clone(), empty.clone(), Value::int(1)]);
    let middle = Value::list([let_.clone(), empty.clone(), innermost]);
    assert_eq!(middle.execute(&mut env).unwrap(), Value::int(1));

    let outer = Value::list([let_, empty, middle]);
    let err = outer.execute(&mut env).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::StackOverflow { max_depth: 2, .. }
    ));
    assert_eq!(err.category(), ErrorCategory::ResourceExceeded);
    assert_eq!(env.depth(), 1);
}

#[test]
fn test_data_level_forms_reject_reserved_names() {
    let mut r = Runner::new();
    let define = r.sym("define");
    let if_ = r.sym("if");
    let err = r.call([define, if_, Value::int(5)]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::MalformedForm { form: "define", .. }));
    assert_eq!(err.category(), ErrorCategory::Syntax);
    assert!(r.env.lookup_name("if").is_none());
    r.env.clear_error();

    let let_ = r.sym("let");
    let quote = r.sym("quote");
    let bindings = Value::list([Value::list([quote, Value::int(1)])]);
    let err = r.call([let_, bindings, Value::int(2)]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::MalformedForm { form: "let", .. }));
    assert_eq!(r.env.depth(), 1);

    let lambda = r.sym("lambda");
    let (x, set) = (r.sym("x"), r.sym("set"));
    let params = Value::list([x.clone(), set]);
    let err = r.call([lambda, params, x]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::MalformedForm {
            form: "lambda",
            reason: "cannot bind reserved word 'set'".into()
        }
    );
}
