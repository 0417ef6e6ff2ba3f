/// Represents all errors that can occur while parsing a token stream.
///
/// Every variant carries the 0-based character offset it refers to, so a
/// front end can point at the exact character.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A parenthesised expression was not closed. Reported at the opening
    /// bracket.
    #[error("Expected close bracket for the bracket opened at {offset}.")]
    ExpectedCloseBracket {
        /// Offset of the unmatched `(`.
        offset: usize,
    },
    /// A function argument list was not closed.
    #[error("Expected close bracket at {offset}.")]
    UnclosedArgumentList {
        /// Offset of the token found instead of `)`.
        offset: usize,
    },
    /// A function name was not followed by `(`.
    #[error("Expected open bracket at {offset}.")]
    ExpectedOpenBracket {
        /// Offset of the token found instead of `(`.
        offset: usize,
    },
    /// Two function arguments were not separated by `,`.
    #[error("Expected comma at {offset}.")]
    ExpectedComma {
        /// Offset of the token found instead of `,`.
        offset: usize,
    },
    /// The token cannot start a factor: not a number, not `(` and not a
    /// registered function name.
    #[error("Unrecognised factor '{token}' at {offset}.")]
    UnrecognisedFactor {
        /// The offending token as displayed in diagnostics.
        token:  String,
        /// Offset of the offending token.
        offset: usize,
    },
    /// A function was called with the wrong number of arguments.
    #[error("Invalid number of function parameters in function {name}. Expected {expected}, found \
             {found} at {offset}.")]
    ArityMismatch {
        /// Canonical name of the function.
        name:     String,
        /// Registered arity.
        expected: usize,
        /// Number of arguments actually parsed.
        found:    usize,
        /// Offset of the token closing the argument list.
        offset:   usize,
    },
    /// A complete expression was followed by more tokens.
    #[error("Tokens remain after parsing: {remaining}.")]
    TrailingTokens {
        /// The unconsumed tokens, joined for display.
        remaining: String,
        /// Offset of the first unconsumed token.
        offset:    usize,
    },
    /// Brackets or function calls were nested deeper than the configured
    /// limit.
    #[error("Expression nested deeper than {limit} levels at {offset}.")]
    NestingTooDeep {
        /// The configured maximum depth.
        limit:  usize,
        /// Offset of the first token nested one level too deep.
        offset: usize,
    },
}

impl ParseError {
    /// Returns the 0-based character offset the error refers to.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::ExpectedCloseBracket { offset }
            | Self::UnclosedArgumentList { offset }
            | Self::ExpectedOpenBracket { offset }
            | Self::ExpectedComma { offset }
            | Self::UnrecognisedFactor { offset, .. }
            | Self::ArityMismatch { offset, .. }
            | Self::TrailingTokens { offset, .. }
            | Self::NestingTooDeep { offset, .. } => *offset,
        }
    }
}
