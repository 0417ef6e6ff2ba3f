/// Evaluation errors.
///
/// Raised by the postfix stack machine when a program violates its stack
/// discipline or names a function the registry does not provide.
pub mod eval_error;
/// Parsing errors.
///
/// Defines all error types that can occur while parsing a token stream:
/// missing brackets, unknown factors, wrong function arity, trailing tokens
/// and excessive nesting.
pub mod parse_error;
/// Scanning errors.
///
/// Defines the errors raised while turning source text into tokens: empty
/// input and characters that start no token.
pub mod scan_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;
pub use scan_error::ScanError;

/// The top-level error returned by the compile and evaluate entry points.
///
/// Each stage reports its own error type; this enum lets callers handle the
/// whole pipeline with a single `?`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// The source text could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// The token stream does not follow the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The postfix program could not be executed.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl ExpressionError {
    /// Returns the source offset of the error, if the failing stage knows one.
    ///
    /// Evaluation errors have no source position.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::Scan(e) => Some(e.offset()),
            Self::Parse(e) => Some(e.offset()),
            Self::Eval(_) => None,
        }
    }
}
