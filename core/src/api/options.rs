//! Configuration options for the sprig interpreter.

/// Configuration options for parsing.
///
/// # Example
///
/// ```
/// use sprig_core::api::ParserOptions;
///
/// let options = ParserOptions {
///     strict: true,
///     ..ParserOptions::default()
/// };
/// assert_eq!(options.max_depth, 256);
/// ```
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Maximum number of simultaneously open lists and quotes.
    ///
    /// Default: 256
    pub max_depth: usize,

    /// Reject input that continues after the first complete form instead of
    /// ignoring it.
    ///
    /// Default: false
    pub strict: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            strict: false,
        }
    }
}

/// Configuration options for expression execution.
///
/// These options control resource limits during evaluation.
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Maximum nesting of closure calls and `let` scopes (for recursion
    /// protection).
    ///
    /// Each level costs native stack, so the default stays within a 2 MiB
    /// thread stack in unoptimized builds. Raise it only on threads with a
    /// larger stack.
    ///
    /// Default: 64
    pub max_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Configuration options for an [`Interpreter`](super::Interpreter).
///
/// # Example
///
/// ```
/// use sprig_core::api::{ExecutionOptions, InterpreterOptions, ParserOptions};
///
/// let options = InterpreterOptions {
///     parser: ParserOptions::default(),
///     execution: ExecutionOptions { max_depth: 32 },
///     reset_on_error: true,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterpreterOptions {
    pub parser: ParserOptions,
    pub execution: ExecutionOptions,

    /// Discard every definition after a failed evaluation.
    ///
    /// Default: false
    pub reset_on_error: bool,
}
