//! Integer-literal parsing, split out from expression parsing so a
//! malformed literal (spec section 8's `"skb->len > 1024x"` example) reports
//! as `CompileError::LiteralParse` rather than a syntax error: the parser
//! only recognises the *shape* of a literal token, this module gives it a
//! value.

use crate::error::CompileError;

/// The raw, lexically-categorised form of an integer literal, before its
/// numeric value is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLiteral {
    /// Decimal digits, possibly with trailing garbage (e.g. `1024x`).
    Decimal(String),
    /// Hex digits after a stripped `0x`/`0X` prefix.
    Hex(String),
    /// Octal digits after a stripped leading `0`.
    Octal(String),
    /// A `'c'`-style character literal, already unescaped to its byte value.
    Char(i64),
}

/// Resolves a [`RawLiteral`] to its 64-bit value, or a `LiteralParse` error
/// naming the offending text.
pub fn resolve(raw: &RawLiteral) -> Result<i64, CompileError> {
    match raw {
        RawLiteral::Char(v) => Ok(*v),
        RawLiteral::Decimal(s) => s
            .parse::<i64>()
            .map_err(|_| CompileError::LiteralParse(format!("{s:?} is not a valid decimal integer"))),
        RawLiteral::Hex(s) => i64::from_str_radix(s, 16)
            .map_err(|_| CompileError::LiteralParse(format!("{s:?} is not a valid hexadecimal integer"))),
        RawLiteral::Octal(s) => {
            if s.is_empty() {
                Ok(0)
            } else {
                i64::from_str_radix(s, 8)
                    .map_err(|_| CompileError::LiteralParse(format!("{s:?} is not a valid octal integer")))
            }
        }
    }
}
