/// Errors raised while turning source text into tokens.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The expression was empty or contained only white space.
    #[error("Cannot scan an empty expression.")]
    EmptyExpression,
    /// A character that starts no token was found.
    #[error("Scanner encountered unexpected char '{character}' at {offset}.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Character offset of the offending character.
        offset:    usize,
    },
}

impl ScanError {
    /// Returns the 0-based character offset the error refers to.
    ///
    /// An empty expression is reported at offset `0`.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::EmptyExpression => 0,
            Self::UnexpectedCharacter { offset, .. } => *offset,
        }
    }
}
