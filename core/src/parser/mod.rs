pub mod error;
#[allow(clippy::module_inception)]
pub mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{Parser, parse, parse_all, parse_with_options};
