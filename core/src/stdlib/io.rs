use std::io::Write;

use crate::evaluator::EvalError;
use crate::values::Value;

/// Writes the renderings of its arguments, space separated, and a newline to
/// stdout. Returns Nil.
pub fn print(args: &[Value]) -> Result<Value, EvalError> {
    let line = render(args);
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", line) {
        tracing::warn!("print failed: {}", e);
    }
    Ok(Value::Nil)
}

pub(crate) fn render(args: &[Value]) -> String {
    let parts: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    parts.join(" ")
}
