//! # exprcalc
//!
//! exprcalc evaluates infix arithmetic expressions written in Rust.
//! An expression is scanned into tokens, parsed by recursive descent into a
//! typed tree, lowered to a postfix program and executed on a value stack.
//! Numbers, `+ - * /`, parentheses, unary minus and registered functions such
//! as `POWER(a, b)` are supported.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::{
    ast::Expr,
    error::ExpressionError,
    interpreter::{
        evaluator,
        lexer::scan,
        parser::{ParseOutput, Parser, ParserConfig},
        program::Program,
        registry::FunctionRegistry,
        token::Token,
        tree::TreeNode,
    },
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the binary operators that
/// represent an expression as a tree. The tree is built by the parser; the
/// postfix program and the diagnostic tree are derived from it.
///
/// # Responsibilities
/// - Defines the expression node types.
/// - Attaches source offsets to every node for diagnostics.
/// - Provides the iterative post-order walk shared by all derivations.
pub mod ast;
/// Provides unified error types for scanning, parsing and evaluation.
///
/// Every stage reports a dedicated error enum carrying the source offset
/// where it applies. [`ExpressionError`] wraps them for callers of the whole
/// pipeline.
pub mod error;
/// Orchestrates the expression pipeline.
///
/// This module ties together the lexer, the parser, the function registry
/// and the postfix evaluator.
///
/// # Responsibilities
/// - Coordinates scanning, parsing and evaluation.
/// - Defines tokens, programs and diagnostic trees.
pub mod interpreter;
/// Numeric helpers shared by the scanner and the diagnostic output.
pub mod util;

/// The artefacts of compiling one expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    /// Every scanned token, ending with EOF.
    pub tokens:       Vec<Token>,
    /// The typed expression tree.
    pub expr:         Expr,
    /// The postfix program.
    pub instructions: Program,
    /// The label-only diagnostic tree.
    pub tree:         TreeNode,
}

/// An expression calculator with a fixed function registry and parser
/// configuration.
///
/// A calculator holds no state between calls and can be shared freely.
///
/// # Examples
/// ```
/// use exprcalc::{Calculator, interpreter::registry::FunctionRegistry};
///
/// let calculator = Calculator::new();
/// assert_eq!(calculator.evaluate("POWER(2, 3) - 1").unwrap(), 7.0);
///
/// let scientific = Calculator::with_registry(FunctionRegistry::scientific());
/// assert_eq!(scientific.evaluate("sqrt(16) * -1").unwrap(), -4.0);
///
/// let compiled = calculator.compile("-3").unwrap();
/// assert_eq!(compiled.instructions.to_string(), "3 -1 MULTIPLY");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    registry: FunctionRegistry,
    config:   ParserConfig,
}

impl Calculator {
    /// Creates a calculator with the standard registry and default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator accepting the functions of `registry`.
    #[must_use]
    pub fn with_registry(registry: FunctionRegistry) -> Self {
        Self { registry,
               config: ParserConfig::default() }
    }

    /// Replaces the parser configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// The function registry used for parsing and evaluation.
    #[must_use]
    pub const fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Scans and parses `source` without evaluating it.
    ///
    /// # Errors
    /// Returns the scan or parse error of the first failing stage.
    pub fn compile(&self, source: &str) -> Result<Compilation, ExpressionError> {
        let stream = scan(source)?;
        let tokens = stream.remaining().cloned().collect();

        let ParseOutput { expr,
                          instructions,
                          tree, } = Parser::new(&self.registry, self.config).parse(stream)?;

        Ok(Compilation { tokens,
                         expr,
                         instructions,
                         tree })
    }

    /// Evaluates `source` to a number.
    ///
    /// Division by zero yields an infinity or `NaN` rather than an error.
    ///
    /// # Errors
    /// Returns the error of the first failing stage.
    pub fn evaluate(&self, source: &str) -> Result<f64, ExpressionError> {
        let compilation = self.compile(source)?;
        let result = evaluator::evaluate(&compilation.instructions, &self.registry)?;
        debug!(source, result, "evaluated expression");
        Ok(result)
    }
}

/// Evaluates an expression with the standard registry and default limits.
///
/// # Errors
/// Returns an error if scanning, parsing or evaluation fails.
///
/// # Examples
/// ```
/// use exprcalc::evaluate;
///
/// assert_eq!(evaluate("10 - 3 - 2").unwrap(), 5.0);
/// assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
///
/// let err = evaluate("2 + @").unwrap_err();
/// assert_eq!(err.offset(), Some(4));
/// ```
pub fn evaluate(source: &str) -> Result<f64, ExpressionError> {
    Calculator::new().evaluate(source)
}
