//! mdlisp scanner: converts source text into classified, indentation-annotated lines.

pub mod line;
pub mod scanner;

pub use line::{strip_bullet_marker, LineKind, ScannedLine};
pub use scanner::{indent_level, Scanner};
