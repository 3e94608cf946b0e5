//! wiregen-parser - Front end for the wiregen code generator
//!
//! Parses the C#-style declaration subset into [`wiregen_symbols`] syntax
//! nodes. Pair with [`wiregen_symbols::SemanticModel::bind_unit`] to
//! populate the type universe, then drive the engine:
//!
//! ```
//! use wiregen_parser::parse_source;
//! use wiregen_symbols::SemanticModel;
//!
//! let unit = parse_source(
//!     "demo.cs",
//!     "namespace Demo { [Serializable] partial class Ping { int Seq; } }",
//! )
//! .unwrap();
//! let mut model = SemanticModel::new();
//! model.bind_unit(&unit).unwrap();
//! ```

mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::parse_source;
