//! Type syntax.
//!
//! A type is a primitive keyword or a class identifier chain, optionally
//! parameterized with `:[T, ...]`, followed by any number of `[]` array
//! suffixes. Malformed types are reported once and come back as
//! [`DataType::Err`], which downstream matching treats as compatible with
//! everything.

use mica_core::ParseErrorKind;

use crate::parser::Parser;
use crate::token::TokenKind;
use crate::types::DataType;

impl Parser<'_> {
    /// Parse a type at the current position.
    pub(crate) fn parse_data_type(&mut self) -> DataType {
        self.step();
        let mut ty = match self.previous().kind {
            TokenKind::PrimType(prim) => prim.into(),
            TokenKind::Identifier(first) => {
                let name = self.identifier(first);
                let mut type_args = Vec::new();
                if self.match_tk(TokenKind::Colon) {
                    if !self.match_tk(TokenKind::LeftBracket) {
                        self.error_sync(
                            ParseErrorKind::ExpectedType,
                            "expected a type argument list",
                        );
                        return DataType::Err;
                    }
                    loop {
                        let arg = self.parse_data_type();
                        if arg.is_err() {
                            return DataType::Err;
                        }
                        type_args.push(arg);
                        if self.match_tk(TokenKind::Comma) {
                            continue;
                        }
                        if !self.match_tk(TokenKind::RightBracket) {
                            self.error_sync(ParseErrorKind::ExpectedToken, "expected ']'");
                            return DataType::Err;
                        }
                        break;
                    }
                }
                DataType::obj(name, type_args)
            }
            _ => {
                let span = self.previous().span;
                let found = self.previous().kind;
                self.error(
                    ParseErrorKind::ExpectedType,
                    span,
                    format!("expected a type, found {}", found),
                );
                self.panic_mode();
                return DataType::Err;
            }
        };
        // `[]` suffixes nest left to right: `num[][]` is an array of arrays
        while self.match_tk(TokenKind::LeftBracket) {
            if !self.match_tk(TokenKind::RightBracket) {
                let span = self.peek().span;
                self.error(ParseErrorKind::ExpectedToken, span, "expected ']'");
                self.panic_until(TokenKind::RightBracket);
                return DataType::Err;
            }
            ty = DataType::Arr(Box::new(ty));
        }
        ty
    }
}
