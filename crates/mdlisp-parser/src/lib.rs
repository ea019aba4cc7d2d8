//! mdlisp parser: builds the AST from scanned lines.

mod parse_item;
mod parser;

pub use parse_item::parse_item;
pub use parser::{ParseResult, Parser};
