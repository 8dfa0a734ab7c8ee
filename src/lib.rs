//! Mica language front end.
//!
//! This facade re-exports the workspace crates:
//! - [`core`]: spans, interning, access modifiers, and diagnostics
//! - [`parser`]: the parser and the scope graph it populates
//!
//! ```
//! use mica::core::{Interner, Span};
//! use mica::parser::token::{Token, TokenKind};
//! use mica::Parser;
//!
//! let interner = Interner::new();
//! let tokens = [Token::new(TokenKind::Eof, Span::new(1, 1, 0))];
//! let unit = Parser::parse(&tokens, &interner).unwrap();
//! assert!(unit.success);
//! ```

pub use mica_core as core;
pub use mica_parser as parser;

pub use mica_parser::{Parser, Unit};
