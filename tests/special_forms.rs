#[macro_use]
mod cases;

use cases::run;
use pretty_assertions::assert_eq;

test_case! {
    name: if_takes_consequent,
    input: "(if (< 1 2) 1 2)",
    output: "1",
}

test_case! {
    name: if_takes_alternative,
    input: "(if (< 2 1) 1 2)",
    output: "2",
}

test_case! {
    name: zero_is_truthy,
    input: "(if 0 'yes 'no)",
    output: "yes",
}

test_case! {
    name: empty_string_and_list_are_falsy,
    input: "(list (if \"\" 1 2) (if (list) 1 2) (if nil 1 2) (if FALSE 1 2))",
    output: "(2 2 2 2)",
}

test_case! {
    name: if_with_two_operands_is_a_syntax_error,
    input: "(if true 1)",
    error: Syntax, "P005",
}

test_case! {
    name: reserved_word_cannot_be_defined,
    input: "(define if 5)",
    error: Syntax, "P012",
}

test_case! {
    name: reserved_word_cannot_be_a_parameter,
    input: "(define f (lambda (n quote) n))",
    error: Syntax, "P012",
}

test_case! {
    name: define_returns_value,
    input: "(define x 5)",
    output: "5",
}

test_case! {
    name: define_persists_across_forms,
    input: "(define x 5) x",
    output: "5",
}

test_case! {
    name: define_shadows_in_current_frame,
    input: "(define x 1) (let () (define x 2) x)",
    output: "2",
}

test_case! {
    name: define_inside_let_does_not_leak,
    input: "(define x 1) (let () (define x 2)) x",
    output: "1",
}

test_case! {
    name: define_needs_a_symbol,
    input: "(define 1 2)",
    error: Syntax, "P006",
}

test_case! {
    name: set_mutates_outer_binding,
    input: "(define x 1) (let () (set x 2)) x",
    output: "2",
}

test_case! {
    name: set_undefined_is_a_binding_error,
    input: "(set nope 1)",
    error: Binding, "E002",
}

test_case! {
    name: let_sums_bindings,
    input: "(let ((a 1) (b 2)) (+ a b))",
    output: "3",
}

test_case! {
    name: let_bindings_are_not_sequential,
    input: "(define a 10) (let ((a 1) (b a)) b)",
    output: "10",
}

test_case! {
    name: let_with_empty_body_is_nil,
    input: "(let ((a 1)))",
    output: "Nil",
}

test_case! {
    name: let_binding_must_be_a_pair,
    input: "(let ((a 1 2)) a)",
    error: Syntax, "P008",
}

#[test]
fn test_let_bindings_are_invisible_afterwards() {
    let (mut interpreter, result) = run("(let ((a 1) (b 2)) (+ a b))");
    assert_eq!(result.unwrap().to_string(), "3");
    for name in ["a", "b"] {
        let err = interpreter.eval(name).unwrap_err();
        assert_eq!(err.category, sprig::ErrorCategory::Binding);
    }
    assert_eq!(interpreter.env().depth(), 1);
}
