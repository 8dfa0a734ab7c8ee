//! Error types for the Mica front end.
//!
//! Every diagnostic the parser emits is a [`ParseError`]: an error kind, the
//! source location it occurred at, and a human-readable message. Errors are
//! accumulated per compilation unit rather than aborting the parse; the unit
//! as a whole succeeds only when no errors were recorded.

use std::fmt;
use thiserror::Error;

use crate::Span;

/// A parse error with location and diagnostic information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}: {message}")]
pub struct ParseError {
    /// The type of error that occurred.
    pub kind: ParseErrorKind,
    /// The location in source where the error occurred.
    pub span: Span,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }
}

/// Categories of parse errors.
///
/// Syntax errors come from missing tokens or constructs; shape errors from
/// token sequences that violate a structural invariant; `UnexpectedEof` from
/// input ending while a construct is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    // Token-level errors
    /// A specific token was expected but not found.
    ExpectedToken,
    /// An unexpected token was encountered.
    UnexpectedToken,
    /// Unexpected end of input.
    UnexpectedEof,
    /// Statements must be separated by a newline or `;`.
    MissingTerminator,

    // Expression errors
    /// An expression was expected.
    ExpectedExpression,
    /// An identifier was expected.
    ExpectedIdentifier,
    /// Assignment target is not a variable reference.
    InvalidAssignTarget,

    // Type errors
    /// A type was expected.
    ExpectedType,

    // Declaration-shape errors
    /// Duplicate parameter name within one parameter list.
    DuplicateParameter,
    /// Parameter names must be a single component.
    InvalidParameterName,
    /// A function was already declared with the same parameters.
    DuplicateOverload,
    /// The class already overloads this operator or cast.
    DuplicateOperator,
    /// Operator overloads are only valid inside a class.
    OperatorOutsideClass,
    /// Return statement outside of a function.
    ReturnOutsideFunction,
    /// Namespaces may only be declared in the global scope.
    NamespaceOutsideGlobal,
    /// A name already exists with an incompatible kind.
    NameCollision,
    /// The name was already declared in this scope.
    Redeclaration,
    /// A function body only returns on some paths.
    PartialReturn,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseErrorKind::*;
        let msg = match self {
            ExpectedToken => "expected token",
            UnexpectedToken => "unexpected token",
            UnexpectedEof => "unexpected end of input",
            MissingTerminator => "expected ';' or newline",
            ExpectedExpression => "expected expression",
            ExpectedIdentifier => "expected identifier",
            InvalidAssignTarget => "invalid assignment target",
            ExpectedType => "expected type",
            DuplicateParameter => "duplicate parameter name",
            InvalidParameterName => "invalid parameter name",
            DuplicateOverload => "duplicate overload",
            DuplicateOperator => "duplicate operator overload",
            OperatorOutsideClass => "operator overload outside of class",
            ReturnOutsideFunction => "return statement outside function",
            NamespaceOutsideGlobal => "namespace declared outside the global scope",
            NameCollision => "name collision",
            Redeclaration => "redeclaration",
            PartialReturn => "function only returns in some cases",
        };
        write!(f, "{}", msg)
    }
}

/// A collection of parse errors from one compilation unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseErrors(Vec<ParseError>);

impl ParseErrors {
    pub fn new(errors: Vec<ParseError>) -> Self {
        Self(errors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.0
    }
}

impl From<Vec<ParseError>> for ParseErrors {
    fn from(errors: Vec<ParseError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}
