use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use tracing::trace;

use super::{Node, NodeKind};
use crate::env::Env;
use crate::evaluator::{EvalError, EvalErrorKind, with_bindings};
use crate::values::{Closure, Lambda, Value};

impl<'a> Node<'a> {
    /// Ordinary evaluation.
    ///
    /// Lists evaluate their children into a List value without applying
    /// anything; application is left to [`Value::execute`]. Special forms run
    /// the sub-expressions they consume, so `define`, `set` and `let` see
    /// fully applied values.
    pub fn eval(&self, env: &mut Env) -> Result<Value, EvalError> {
        self.eval_kind(env).map_err(|e| e.or_at(&self.span, self.pos))
    }

    /// `eval` followed by `execute`.
    pub fn run(&self, env: &mut Env) -> Result<Value, EvalError> {
        let value = self.eval(env)?;
        value
            .execute(env)
            .map_err(|e| e.or_at(&self.span, self.pos))
    }

    /// Literal data for this node. Never looks anything up.
    ///
    /// Special forms quote to the List they were written as, headed by their
    /// reserved word.
    pub fn quote(&self, env: &mut Env) -> Value {
        match &self.kind {
            NodeKind::Number(n) => Value::Number(*n),
            NodeKind::String(s) => Value::string(s),
            NodeKind::Boolean(b) => Value::Boolean(*b),
            NodeKind::Nil => Value::Nil,
            NodeKind::Symbol(name) => Value::Symbol(env.symbol(name)),
            NodeKind::List(items) => quote_all(env, items),
            NodeKind::Quote(inner) => Value::quote(inner.quote(env)),
            NodeKind::If {
                test,
                then,
                otherwise,
            } => keyword_list(env, "if", [*test, *then, *otherwise], &[]),
            NodeKind::Define { target, value } => {
                keyword_list(env, "define", [*target, *value], &[])
            }
            NodeKind::Set { target, value } => keyword_list(env, "set", [*target, *value], &[]),
            NodeKind::Let { bindings, body } => keyword_list(env, "let", [*bindings], body),
            NodeKind::Lambda { params, body } => keyword_list(env, "lambda", [*params], body),
            NodeKind::Start(root) => root.quote(env),
        }
    }

    fn eval_kind(&self, env: &mut Env) -> Result<Value, EvalError> {
        match &self.kind {
            NodeKind::Number(n) => Ok(Value::Number(*n)),
            NodeKind::String(s) => Ok(Value::string(s)),
            NodeKind::Boolean(b) => Ok(Value::Boolean(*b)),
            NodeKind::Nil => Ok(Value::Nil),
            NodeKind::Symbol(name) => {
                let atom = env.intern(name);
                env.lookup(atom).ok_or_else(|| {
                    EvalErrorKind::UnboundSymbol {
                        name: String::from(*name),
                    }
                    .into()
                })
            }
            NodeKind::List(items) => {
                let values = items
                    .iter()
                    .map(|item| item.eval(env))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(values))
            }
            NodeKind::Quote(inner) => Ok(Value::quote(inner.quote(env))),
            NodeKind::If {
                test,
                then,
                otherwise,
            } => {
                if test.run(env)?.is_truthy() {
                    then.eval(env)
                } else {
                    otherwise.eval(env)
                }
            }
            NodeKind::Define { target, value } => {
                let name = target_name(target);
                let value = value.run(env)?.settled();
                trace!(name, "define");
                env.define(name, value.clone());
                Ok(value)
            }
            NodeKind::Set { target, value } => {
                let name = target_name(target);
                let value = value.run(env)?.settled();
                let atom = env.intern(name);
                if env.set(atom, value.clone()) {
                    Ok(value)
                } else {
                    Err(EvalError::at(
                        EvalErrorKind::UndefinedSet {
                            name: String::from(name),
                        },
                        target.span.clone(),
                        target.pos,
                    ))
                }
            }
            NodeKind::Let { bindings, body } => {
                let pairs = bindings.list_items().unwrap_or_default();
                let mut computed = Vec::with_capacity(pairs.len());
                for pair in pairs {
                    let Some([name, expr]) = pair.list_items() else {
                        return Err(EvalError::at(
                            EvalErrorKind::MalformedForm {
                                form: "let",
                                reason: String::from("binding must be a (symbol expression) pair"),
                            },
                            pair.span.clone(),
                            pair.pos,
                        ));
                    };
                    let atom = env.intern(target_name(name));
                    computed.push((atom, expr.run(env)?));
                }
                with_bindings(env, computed, |env| {
                    let mut result = Value::Nil;
                    for statement in body.iter() {
                        result = statement.run(env)?;
                    }
                    Ok(result.settled())
                })
            }
            NodeKind::Lambda { params, body } => {
                let params = params.quote(env);
                let body = body.iter().map(|statement| statement.quote(env)).collect();
                let lambda = Lambda::from_parts(env, &params, body)?;
                Ok(Value::Closure(Rc::new(Closure::new(
                    Rc::new(lambda),
                    env.current_frame(),
                ))))
            }
            NodeKind::Start(root) => root.eval(env),
        }
    }
}

/// Name of a `define`/`set`/`let` target. The parser only builds these forms
/// around Symbol nodes.
fn target_name<'a>(node: &Node<'a>) -> &'a str {
    node.symbol_name().unwrap_or(node.text)
}

fn quote_all(env: &mut Env, nodes: &[Node<'_>]) -> Value {
    Value::List(nodes.iter().map(|node| node.quote(env)).collect())
}

fn keyword_list<const N: usize>(
    env: &mut Env,
    keyword: &str,
    operands: [&Node<'_>; N],
    rest: &[Node<'_>],
) -> Value {
    let mut items = Vec::with_capacity(1 + N + rest.len());
    items.push(Value::Symbol(env.symbol(keyword)));
    for operand in operands {
        items.push(operand.quote(env));
    }
    for node in rest {
        items.push(node.quote(env));
    }
    Value::List(items)
}
