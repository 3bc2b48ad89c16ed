//! Special forms applied to quoted data.
//!
//! These mirror the AST-level forms in `ast::eval` and are reached when a
//! lambda body, stored as data, is executed.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use super::apply::close_over;
use super::error::{EvalError, EvalErrorKind};
use super::{SpecialForm, with_bindings};
use crate::atoms::Atom;
use crate::env::Env;
use crate::values::{Lambda, Value};

pub(super) fn apply(env: &mut Env, form: SpecialForm, args: &[Value]) -> Result<Value, EvalError> {
    match form {
        SpecialForm::If => {
            let [test, then, otherwise] = args else {
                return Err(malformed("if", format!("expected 3 operands, found {}", args.len())));
            };
            let branch = if test.execute(env)?.is_truthy() {
                then
            } else {
                otherwise
            };
            branch.execute(env)
        }
        SpecialForm::Define => {
            let (atom, value) = target_and_value(env, "define", args)?;
            env.define_atom(atom, value.clone());
            Ok(value)
        }
        SpecialForm::Set => {
            let (atom, value) = target_and_value(env, "set", args)?;
            if env.set(atom, value.clone()) {
                Ok(value)
            } else {
                Err(EvalErrorKind::UndefinedSet {
                    name: name_of(env, atom),
                }
                .into())
            }
        }
        SpecialForm::Let => {
            let Some((bindings, body)) = args.split_first() else {
                return Err(malformed("let", String::from("missing binding list")));
            };
            let bindings = let_bindings(env, bindings)?;
            with_bindings(env, bindings, |env| {
                let mut result = Value::Nil;
                for statement in body {
                    result = statement.execute(env)?;
                }
                Ok(result.settled())
            })
        }
        SpecialForm::Lambda => {
            let Some((params, body)) = args.split_first() else {
                return Err(malformed("lambda", String::from("missing parameter list")));
            };
            let lambda = Lambda::from_parts(env, params, body.to_vec())?;
            Ok(close_over(env, Rc::new(lambda)))
        }
        SpecialForm::Quote => match args {
            [datum] => Ok(Value::quote(datum.clone())),
            _ => Err(malformed("quote", format!("expected 1 operand, found {}", args.len()))),
        },
    }
}

fn malformed(form: &'static str, reason: String) -> EvalError {
    EvalErrorKind::MalformedForm { form, reason }.into()
}

fn name_of(env: &Env, atom: Atom) -> String {
    env.name_of(atom).map(String::from).unwrap_or_else(|| format!("{}", atom))
}

/// Checks a `(form symbol expr)` shape and runs `expr`.
fn target_and_value(
    env: &mut Env,
    form: &'static str,
    args: &[Value],
) -> Result<(Atom, Value), EvalError> {
    let [target, value] = args else {
        return Err(malformed(form, format!("expected 2 operands, found {}", args.len())));
    };
    let atom = binding_name(env, form, target)?;
    let value = value.execute(env)?.settled();
    Ok((atom, value))
}

/// The atom a form may bind `name` to. Reserved words are never bindable.
fn binding_name(env: &Env, form: &'static str, name: &Value) -> Result<Atom, EvalError> {
    let Some(symbol) = name.as_symbol() else {
        return Err(malformed(form, format!("expected a symbol, found {}", name)));
    };
    if env.special_form(symbol.atom).is_some() {
        return Err(malformed(
            form,
            format!("cannot bind reserved word '{}'", symbol.name),
        ));
    }
    Ok(symbol.atom)
}

/// Computes every binding of a let in the current, enclosing scope.
fn let_bindings(env: &mut Env, bindings: &Value) -> Result<Vec<(Atom, Value)>, EvalError> {
    let Value::List(pairs) = bindings else {
        return Err(malformed("let", format!("expected a binding list, found {}", bindings)));
    };
    let mut computed = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let Value::List(pair) = pair else {
            return Err(malformed("let", format!("binding {} is not a list", pair)));
        };
        let [name, expr] = pair.as_slice() else {
            return Err(malformed(
                "let",
                format!("binding has {} elements, expected 2", pair.len()),
            ));
        };
        let atom = binding_name(env, "let", name)?;
        computed.push((atom, expr.execute(env)?));
    }
    Ok(computed)
}
