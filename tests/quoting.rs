#[macro_use]
mod cases;

use cases::run;
use pretty_assertions::assert_eq;

test_case! {
    name: quote_form_keeps_shape,
    input: "(quote (list 6 (* 1 3)))",
    output: "(list 6 (* 1 3))",
}

test_case! {
    name: unquoted_form_computes,
    input: "(list 6 (* 1 3))",
    output: "(6 3)",
}

test_case! {
    name: quote_mark_sugar,
    input: "'(a (b c) \"d\")",
    output: "(a (b c) d)",
}

test_case! {
    name: quoted_symbol,
    input: "'hello",
    output: "hello",
}

test_case! {
    name: quoted_literals_are_themselves,
    input: "(list '1 'true 'nil)",
    output: "(1 True Nil)",
}

test_case! {
    name: quote_never_looks_up,
    input: "'(undefined names everywhere)",
    output: "(undefined names everywhere)",
}

test_case! {
    name: car_and_cdr_of_quoted_data,
    input: "(list (car '(a b c)) (cdr '(a b c)))",
    output: "(a (b c))",
}

test_case! {
    name: cons_onto_quoted_list,
    input: "(cons 'x '(y z))",
    output: "(x y z)",
}

test_case! {
    name: quoted_data_is_not_reapplied,
    input: "(define code '(+ 1 2)) code",
    output: "(+ 1 2)",
}

test_case! {
    name: quote_takes_one_operand,
    input: "(quote a b)",
    error: Syntax, "P005",
}

#[test]
fn test_quote_differs_from_evaluation() {
    let (mut interpreter, quoted) = run("(quote (list 6 (* 1 3)))");
    let evaluated = interpreter.eval("(list 6 (* 1 3))").unwrap();
    assert_ne!(quoted.unwrap(), evaluated);
}
