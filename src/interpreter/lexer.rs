use logos::Logos;
use tracing::debug;

use crate::{
    error::ScanError,
    interpreter::token::{Token, TokenKind, TokenStream},
    util::num::accumulate_decimal,
};

/// The lexical grammar of an expression.
///
/// Only ASCII digits, letters, `.` and the punctuation set `()+-*/,` start a
/// token. White space is skipped; anything else is a scan error.
#[derive(Logos, Debug, PartialEq, Clone)]
enum Lexeme {
    /// Numeric literals such as `42`, `3.25`, `7.` or `.5`. A bare `.` is `0`.
    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]*", |lex| accumulate_decimal(lex.slice()))]
    Number(f64),
    /// Function name candidates such as `POWER` or `sqrt2`.
    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Identifier,
    /// `(`
    #[token("(")]
    OpenParen,
    /// `)`
    #[token(")")]
    CloseParen,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `,`
    #[token(",")]
    Comma,
    /// Any white space.
    #[regex(r"\s+", logos::skip)]
    Ignored,
}

/// Maps the byte positions reported by the lexer to character offsets.
///
/// Positions must be requested in non-decreasing order; each request only
/// counts the characters since the previous one.
struct CharOffsets<'a> {
    source: &'a str,
    byte:   usize,
    chars:  usize,
}

impl<'a> CharOffsets<'a> {
    const fn new(source: &'a str) -> Self {
        Self { source,
               byte: 0,
               chars: 0 }
    }

    fn at(&mut self, byte: usize) -> usize {
        self.chars += self.source[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// Scans an expression into a stream of tokens.
///
/// The stream ends with a single EOF token placed at the offset just past the
/// last character. Offsets count characters, not bytes.
///
/// # Errors
/// - [`ScanError::EmptyExpression`] if the input is empty or only white space.
/// - [`ScanError::UnexpectedCharacter`] for the first character that starts no
///   token.
///
/// # Example
/// ```
/// use exprcalc::interpreter::{lexer::scan, token::TokenKind};
///
/// let mut tokens = scan("3.25").unwrap();
/// assert_eq!(tokens.advance().kind(), TokenKind::Numeric(3.25));
/// assert!(tokens.advance().is_eof());
///
/// let err = scan("2+@").unwrap_err();
/// assert_eq!(err.offset(), 2);
/// ```
pub fn scan(source: &str) -> Result<TokenStream, ScanError> {
    if source.trim().is_empty() {
        return Err(ScanError::EmptyExpression);
    }

    let mut lexer = Lexeme::lexer(source);
    let mut offsets = CharOffsets::new(source);
    let mut tokens = Vec::new();

    while let Some(lexeme) = lexer.next() {
        let start = lexer.span().start;
        let offset = offsets.at(start);
        let token = match lexeme {
            Ok(Lexeme::Number(value)) => Token::numeric(value, lexer.slice(), offset),
            Ok(Lexeme::Identifier) => Token::text(lexer.slice(), offset),
            Ok(Lexeme::OpenParen) => Token::punctuation(TokenKind::OpenParen, offset),
            Ok(Lexeme::CloseParen) => Token::punctuation(TokenKind::CloseParen, offset),
            Ok(Lexeme::Plus) => Token::punctuation(TokenKind::Plus, offset),
            Ok(Lexeme::Minus) => Token::punctuation(TokenKind::Minus, offset),
            Ok(Lexeme::Star) => Token::punctuation(TokenKind::Multiply, offset),
            Ok(Lexeme::Slash) => Token::punctuation(TokenKind::Divide, offset),
            Ok(Lexeme::Comma) => Token::punctuation(TokenKind::Separator, offset),
            Ok(Lexeme::Ignored) => continue,
            Err(()) => {
                let character = source[start..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ScanError::UnexpectedCharacter { character, offset });
            },
        };
        tokens.push(token);
    }

    let end = offsets.at(source.len());
    tokens.push(Token::eof(end));

    let stream = TokenStream::new(tokens, end);
    debug!(tokens = stream.len(), "scanned expression");
    Ok(stream)
}
