//! HCL tokens.
//!
//! The fallback serializer produces a flat token stream; the writer lays it
//! out. Each token remembers how many spaces precede it on its line.

use std::fmt;

/// The syntactic class of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    OBrace,
    CBrace,
    OBrack,
    CBrack,
    Equal,
    Comma,
    Newline,
    QuotedLit,
    NumberLit,
    Ident,
}

impl TokenKind {
    /// Returns `true` for `{` and `[`.
    #[must_use]
    pub const fn opens(&self) -> bool {
        matches!(self, TokenKind::OBrace | TokenKind::OBrack)
    }

    /// Returns `true` for `}` and `]`.
    #[must_use]
    pub const fn closes(&self) -> bool {
        matches!(self, TokenKind::CBrace | TokenKind::CBrack)
    }
}

/// A single token and its leading spaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub bytes: String,
    pub spaces_before: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, bytes: impl Into<String>, spaces_before: usize) -> Self {
        Token {
            kind,
            bytes: bytes.into(),
            spaces_before,
        }
    }

    /// A punctuation token.
    #[must_use]
    pub fn punct(kind: TokenKind, spaces_before: usize) -> Self {
        let bytes = match kind {
            TokenKind::OBrace => "{",
            TokenKind::CBrace => "}",
            TokenKind::OBrack => "[",
            TokenKind::CBrack => "]",
            TokenKind::Equal => "=",
            TokenKind::Comma => ",",
            TokenKind::Newline => "\n",
            TokenKind::QuotedLit | TokenKind::NumberLit | TokenKind::Ident => "",
        };
        Token::new(kind, bytes, spaces_before)
    }

    /// A quoted string literal, escaped for HCL.
    #[must_use]
    pub fn quoted(s: &str, spaces_before: usize) -> Self {
        Token::new(TokenKind::QuotedLit, quote(s), spaces_before)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}{}", "", self.bytes, width = self.spaces_before)
    }
}

/// Quotes and escapes a string as an HCL template literal.
///
/// Template introducers are doubled so `${` and `%{` stay literal.
///
/// # Examples
///
/// ```rust
/// use ktf::token::quote;
///
/// assert_eq!(quote("a\"b"), r#""a\"b""#);
/// assert_eq!(quote("${HOME}"), r#""$${HOME}""#);
/// ```
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(ch);
                out.push(ch);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quote("back\\slash"), "\"back\\\\slash\"");
        assert_eq!(quote("%{if}"), "\"%%{if}\"");
        assert_eq!(quote("cost: $5"), "\"cost: $5\"");
        assert_eq!(quote("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_display_includes_spaces() {
        assert_eq!(Token::punct(TokenKind::Equal, 1).to_string(), " =");
        assert_eq!(Token::quoted("a", 0).to_string(), "\"a\"");
    }
}
