use std::{collections::VecDeque, fmt};

use crate::util::num::format_number;

/// The kind of a lexical token.
///
/// Numeric literals carry their accumulated value; every other kind is fully
/// described by its tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// End of input. Also returned forever once a stream is exhausted.
    Eof,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `,` separating function arguments.
    Separator,
    /// A numeric literal such as `7`, `3.25` or `.5`.
    Numeric(f64),
    /// A run of letters and digits, most likely a function name.
    Text,
}

impl TokenKind {
    /// The name shown for tokens that carry no text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::OpenParen => "OpenParen",
            Self::CloseParen => "CloseParen",
            Self::Plus => "Plus",
            Self::Minus => "Minus",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Separator => "Separator",
            Self::Numeric(_) => "Numeric",
            Self::Text => "Text",
        }
    }
}

/// Represents a lexical token of an expression.
///
/// `Numeric` and `Text` tokens carry the raw lexeme; all other kinds carry an
/// empty text. The constructors are the only way to build a token, which keeps
/// kind and text consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind:   TokenKind,
    text:   String,
    offset: usize,
}

impl Token {
    /// Creates a punctuation or EOF token.
    ///
    /// # Panics
    /// Debug builds assert that `kind` is neither `Numeric` nor `Text`.
    #[must_use]
    pub fn punctuation(kind: TokenKind, offset: usize) -> Self {
        debug_assert!(!matches!(kind, TokenKind::Numeric(_) | TokenKind::Text),
                      "{} tokens need a lexeme",
                      kind.name());
        Self { kind,
               text: String::new(),
               offset }
    }

    /// Creates a numeric literal token from its value and raw lexeme.
    #[must_use]
    pub fn numeric(value: f64, lexeme: &str, offset: usize) -> Self {
        Self { kind: TokenKind::Numeric(value),
               text: lexeme.to_string(),
               offset }
    }

    /// Creates an identifier token. Case is preserved.
    #[must_use]
    pub fn text(name: &str, offset: usize) -> Self {
        Self { kind: TokenKind::Text,
               text: name.to_string(),
               offset }
    }

    /// Creates the end-of-input token.
    #[must_use]
    pub fn eof(offset: usize) -> Self {
        Self::punctuation(TokenKind::Eof, offset)
    }

    /// The token kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw lexeme; empty for punctuation and EOF.
    #[must_use]
    pub fn lexeme(&self) -> &str {
        &self.text
    }

    /// The 0-based character offset of the token in the source.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Whether this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Numeric(value) => write!(f, "{}", format_number(value)),
            TokenKind::Text => write!(f, "{}", self.text),
            kind => write!(f, "{}", kind.name()),
        }
    }
}

/// A forward-only, read-once sequence of tokens.
///
/// Past the last stored token the stream keeps yielding EOF tokens at the
/// final offset, so a parser never has to treat exhaustion as a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
    eof:    Token,
}

impl TokenStream {
    /// Wraps scanned tokens; `end` is the offset reported by trailing EOFs.
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = Token>, end: usize) -> Self {
        Self { tokens: tokens.into_iter().collect(),
               eof:    Token::eof(end), }
    }

    /// Looks at the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> &Token {
        self.tokens.front().unwrap_or(&self.eof)
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Token {
        self.tokens.pop_front().unwrap_or_else(|| self.eof.clone())
    }

    /// Iterates over the tokens not consumed yet, without consuming them.
    pub fn remaining(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Number of stored tokens not consumed yet.
    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.tokens.iter().map(ToString::to_string).collect::<Vec<_>>();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> TokenStream {
        TokenStream::new([Token::numeric(2.0, "2", 0),
                          Token::punctuation(TokenKind::Plus, 1),
                          Token::numeric(3.0, "3", 2),
                          Token::eof(3)],
                         3)
    }

    #[test]
    fn peek_does_not_consume() {
        let tokens = stream();
        assert_eq!(tokens.peek().kind(), TokenKind::Numeric(2.0));
        assert_eq!(tokens.peek().kind(), TokenKind::Numeric(2.0));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn exhausted_stream_yields_eof_forever() {
        let mut tokens = stream();
        for _ in 0..4 {
            tokens.advance();
        }
        assert_eq!(tokens.len(), 0);
        for _ in 0..3 {
            let token = tokens.advance();
            assert!(token.is_eof());
            assert_eq!(token.offset(), 3);
        }
        assert!(tokens.peek().is_eof());
    }

    #[test]
    fn only_literals_and_names_carry_text() {
        assert_eq!(Token::punctuation(TokenKind::Separator, 4).lexeme(), "");
        assert_eq!(Token::numeric(3.25, "3.25", 0).lexeme(), "3.25");
        assert_eq!(Token::text("Power", 0).lexeme(), "Power");
    }

    #[test]
    fn display_lists_remaining_tokens() {
        let mut tokens = stream();
        tokens.advance();
        assert_eq!(tokens.to_string(), "Plus, 3, EOF");
    }
}
