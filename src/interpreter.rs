/// The evaluator module executes postfix programs.
///
/// The evaluator is a stack machine over `f64`: numbers are pushed, operators
/// and functions pop their operands and push their result.
///
/// # Responsibilities
/// - Runs a [`program::Program`] against a function registry.
/// - Reports stack underflow, leftover values and unknown functions.
pub mod evaluator;
/// The lexer module tokenizes expressions for further parsing.
///
/// The lexer (scanner) reads the raw expression text and produces a stream
/// of tokens: numbers, names, operators, brackets and separators. This is the
/// first stage of the pipeline.
///
/// # Responsibilities
/// - Converts the input characters into tokens with kind and character
///   offset.
/// - Accumulates numeric literals digit by digit.
/// - Reports empty input and unexpected characters.
pub mod lexer;
/// The parser module builds the expression tree from tokens.
///
/// The parser consumes the token stream produced by the lexer and constructs
/// an [`Expr`](crate::ast::Expr). The postfix program and the diagnostic tree
/// are derived from that tree once parsing succeeds.
///
/// # Responsibilities
/// - Applies operator precedence and left associativity.
/// - Checks function names and arities against the registry.
/// - Reports syntax errors with the offset of the offending token.
pub mod parser;
/// Postfix programs.
///
/// Defines the instruction set executed by the evaluator and its derivation
/// from an expression tree.
pub mod program;
/// The function registry.
///
/// Maps case-insensitive function names to their arity and implementation.
pub mod registry;
/// Tokens and token streams.
pub mod token;
/// The label-only parse tree used for diagnostics.
pub mod tree;
