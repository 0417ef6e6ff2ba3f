use tracing::{debug, trace};

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        parser::core::{ParseContext, ParseResult, parse_expression},
        program::Program,
        registry::FunctionRegistry,
        token::TokenStream,
        tree::TreeNode,
    },
};

/// Core parsing state and the top-level expression rule.
///
/// Holds the parse context shared by every rule and enforces the nesting
/// limit whenever a bracketed expression or function argument is entered.
pub mod core;

/// Binary operator parsing.
///
/// Left-associative loops for the additive and multiplicative levels.
pub mod binary;

/// Factor parsing: unary minus, numbers, parentheses and function calls.
pub mod unary;

/// Helpers for function argument lists.
pub mod utils;

/// Default limit on nested brackets and function arguments.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of nested `( ... )` groups and function argument
    /// lists. The top-level expression is not counted.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Everything a successful parse produces.
///
/// `instructions` and `tree` are both derived from `expr` after descent, so
/// they always describe the same parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// The typed expression tree.
    pub expr:         Expr,
    /// The postfix program.
    pub instructions: Program,
    /// The label-only diagnostic tree.
    pub tree:         TreeNode,
}

/// A recursive-descent parser bound to a function registry.
///
/// The parser only borrows the registry, so one registry can serve any
/// number of parsers.
///
/// # Example
/// ```
/// use exprcalc::interpreter::{
///     lexer::scan,
///     parser::{Parser, ParserConfig},
///     registry::FunctionRegistry,
/// };
///
/// let registry = FunctionRegistry::new();
/// let parser = Parser::new(&registry, ParserConfig::default());
///
/// let output = parser.parse(scan("2 + 3 * 4").unwrap()).unwrap();
/// assert_eq!(output.instructions.to_string(), "2 3 4 MULTIPLY ADD");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Parser<'r> {
    registry: &'r FunctionRegistry,
    config:   ParserConfig,
}

impl<'r> Parser<'r> {
    /// Creates a parser that accepts the functions of `registry`.
    #[must_use]
    pub const fn new(registry: &'r FunctionRegistry, config: ParserConfig) -> Self {
        Self { registry, config }
    }

    /// Parses a complete expression.
    ///
    /// The whole stream must form one expression: after it, only EOF may
    /// remain.
    ///
    /// # Errors
    /// Returns the first [`ParseError`] encountered; there is no recovery.
    pub fn parse(&self, tokens: TokenStream) -> ParseResult<ParseOutput> {
        let mut ctx = ParseContext::new(tokens, self.registry, self.config.max_depth);

        let expr = parse_expression(&mut ctx)?;
        expect_end(&ctx)?;

        let instructions = Program::from_expr(&expr);
        let tree = TreeNode::from(&expr);
        debug!(instructions = instructions.len(), nodes = tree.size(), "parsed expression");
        trace!(program = %instructions, "derived postfix program");

        Ok(ParseOutput { expr,
                         instructions,
                         tree })
    }
}

/// Fails unless the next token is EOF.
fn expect_end(ctx: &ParseContext<'_>) -> ParseResult<()> {
    let next = ctx.tokens.peek();
    if next.is_eof() {
        return Ok(());
    }

    Err(ParseError::TrailingTokens { remaining: ctx.tokens.to_string(),
                                     offset:    next.offset(), })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::BinaryOperator, interpreter::lexer::scan};

    fn parse_with(source: &str, registry: &FunctionRegistry) -> ParseResult<ParseOutput> {
        Parser::new(registry, ParserConfig::default()).parse(scan(source).unwrap())
    }

    fn parse(source: &str) -> ParseResult<ParseOutput> {
        parse_with(source, &FunctionRegistry::new())
    }

    fn program(source: &str) -> String {
        parse(source).unwrap().instructions.to_string()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(program("2+3*4"), "2 3 4 MULTIPLY ADD");
        assert_eq!(program("(2+3)*4"), "2 3 ADD 4 MULTIPLY");
        assert_eq!(program("10-3-2"), "10 3 SUBTRACT 2 SUBTRACT");
        assert_eq!(program("8/4/2"), "8 4 DIVIDE 2 DIVIDE");
    }

    #[test]
    fn unary_minus_multiplies_by_minus_one() {
        assert_eq!(program("-3"), "3 -1 MULTIPLY");
        assert_eq!(program("-(1+2)"), "1 2 ADD -1 MULTIPLY");
        assert_eq!(program("2*-3"), "2 3 -1 MULTIPLY MULTIPLY");
    }

    #[test]
    fn negation_nodes_sit_at_the_minus_sign() {
        let output = parse(" -3").unwrap();
        match &output.expr {
            Expr::Binary { op: BinaryOperator::Multiply,
                           left,
                           right,
                           offset, } => {
                assert_eq!(*offset, 1);
                assert_eq!(left.offset(), 2);
                assert_eq!(**right,
                           Expr::Number { value:  -1.0,
                                          offset: 1, });
            },
            other => panic!("expected a negation, got {other:?}"),
        }
    }

    #[test]
    fn double_minus_is_an_unrecognised_factor() {
        assert_eq!(parse("--3").unwrap_err(),
                   ParseError::UnrecognisedFactor { token:  "Minus".to_string(),
                                                    offset: 1, });
    }

    #[test]
    fn function_calls_are_case_insensitive() {
        let output = parse("power(2, 3)").unwrap();
        assert_eq!(output.instructions.to_string(), "2 3 POWER");
        assert_eq!(output.tree.label, "POWER");
        assert_eq!(output.tree.children.len(), 2);
    }

    #[test]
    fn zero_arity_function_takes_empty_parentheses() {
        let registry = FunctionRegistry::new().with("PI", 0, |_| std::f64::consts::PI);
        let output = parse_with("PI() * 2", &registry).unwrap();
        assert_eq!(output.instructions.to_string(), "PI 2 MULTIPLY");

        assert_eq!(parse_with("PI(1)", &registry).unwrap_err(),
                   ParseError::ArityMismatch { name:     "PI".to_string(),
                                               expected: 0,
                                               found:    1,
                                               offset:   4, });
    }

    #[test]
    fn arity_mismatch_points_at_the_closing_bracket() {
        assert_eq!(parse("POWER(2)").unwrap_err(),
                   ParseError::ArityMismatch { name:     "POWER".to_string(),
                                               expected: 2,
                                               found:    1,
                                               offset:   7, });
        assert_eq!(parse("POWER()").unwrap_err().offset(), 6);
    }

    #[test]
    fn unknown_identifier_is_an_unrecognised_factor() {
        assert_eq!(parse("1 + SQRT(4)").unwrap_err(),
                   ParseError::UnrecognisedFactor { token:  "SQRT".to_string(),
                                                    offset: 4, });
        assert!(parse_with("1 + SQRT(4)", &FunctionRegistry::scientific()).is_ok());
    }

    #[test]
    fn missing_close_bracket_points_at_the_open_bracket() {
        assert_eq!(parse("1 + (2+3").unwrap_err(),
                   ParseError::ExpectedCloseBracket { offset: 4 });
        assert_eq!(parse("((1)").unwrap_err(),
                   ParseError::ExpectedCloseBracket { offset: 0 });
    }

    #[test]
    fn malformed_argument_lists() {
        assert_eq!(parse("POWER 2").unwrap_err(),
                   ParseError::ExpectedOpenBracket { offset: 6 });
        assert_eq!(parse("POWER(2 3)").unwrap_err(),
                   ParseError::ExpectedComma { offset: 8 });
        assert_eq!(parse("POWER(2,3").unwrap_err(),
                   ParseError::UnclosedArgumentList { offset: 9 });
    }

    #[test]
    fn trailing_tokens_are_listed() {
        assert_eq!(parse("2 3").unwrap_err(),
                   ParseError::TrailingTokens { remaining: "3, EOF".to_string(),
                                                offset:    2, });
        assert_eq!(parse("(1))").unwrap_err().offset(), 3);
    }

    #[test]
    fn empty_brackets_are_not_a_factor() {
        assert_eq!(parse("()").unwrap_err(),
                   ParseError::UnrecognisedFactor { token:  "CloseParen".to_string(),
                                                    offset: 1, });
    }

    #[test]
    fn nesting_is_limited() {
        let registry = FunctionRegistry::new();
        let parser = Parser::new(&registry, ParserConfig { max_depth: 3 });

        assert!(parser.parse(scan("(((1)))").unwrap()).is_ok());
        assert_eq!(parser.parse(scan("((((1))))").unwrap()).unwrap_err(),
                   ParseError::NestingTooDeep { limit:  3,
                                                offset: 4, });
        assert!(parser.parse(scan("POWER((1), 2)").unwrap()).is_ok());
        assert_eq!(parser.parse(scan("POWER((((1))), 2)").unwrap())
                         .unwrap_err()
                         .offset(),
                   9);
    }

    #[test]
    fn default_limit_accepts_moderate_nesting() {
        let source = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert!(parse(&source).is_ok());

        let source = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        assert!(matches!(parse(&source).unwrap_err(), ParseError::NestingTooDeep { limit: 256, .. }));
    }

    #[test]
    fn tree_mirrors_the_program() {
        let output = parse("POWER(2, -1) / 4").unwrap();
        assert_eq!(output.instructions.to_string(), "2 1 -1 MULTIPLY POWER 4 DIVIDE");
        assert_eq!(output.tree.to_string(),
                   "/ (@ Position 13)\n \
                    POWER (@ Position 0)\n  \
                    2 (@ Position 6)\n  \
                    * (@ Position 9)\n   \
                    1 (@ Position 10)\n   \
                    -1 (@ Position 9)\n \
                    4 (@ Position 15)\n");
    }
}
