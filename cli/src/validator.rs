use reedline::{ValidationResult, Validator};

use crate::lexer::calculate_depth;

/// Keeps the editor open while a list or string is still unclosed.
pub struct ParenValidator;

impl Validator for ParenValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        match calculate_depth(line) {
            Some(0) => ValidationResult::Complete,
            _ => ValidationResult::Incomplete,
        }
    }
}
