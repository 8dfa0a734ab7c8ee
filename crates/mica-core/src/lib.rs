//! Mica core crate.
//!
//! Foundation types shared by every phase of Mica processing:
//! - Source location tracking ([`Span`])
//! - Error types and reporting ([`ParseError`], [`ParseErrors`])
//! - String interning for one compilation unit ([`Interner`], [`StrId`])
//! - Access modifiers ([`Access`])

pub mod access;
pub mod error;
pub mod interner;
pub mod span;

pub use access::Access;
pub use error::{ParseError, ParseErrorKind, ParseErrors};
pub use interner::{Interner, StrId};
pub use span::Span;
