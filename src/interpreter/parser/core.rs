use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        parser::binary::parse_additive,
        registry::FunctionRegistry,
        token::TokenStream,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// State threaded through every parsing rule.
pub struct ParseContext<'r> {
    /// Tokens not consumed yet.
    pub tokens:    TokenStream,
    /// Functions a `Text` token may name.
    pub registry:  &'r FunctionRegistry,
    /// Current number of nested groups and argument lists.
    pub depth:     usize,
    /// Nesting limit from the parser configuration.
    pub max_depth: usize,
}

impl<'r> ParseContext<'r> {
    pub const fn new(tokens: TokenStream, registry: &'r FunctionRegistry, max_depth: usize) -> Self {
        Self { tokens,
               registry,
               depth: 0,
               max_depth }
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the lowest
/// precedence level, addition and subtraction, and descends from there.
///
/// Grammar: `expression := term (("+" | "-") term)*`
///
/// # Parameters
/// - `ctx`: Parse context positioned at the first token of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(ctx: &mut ParseContext<'_>) -> ParseResult<Expr> {
    parse_additive(ctx)
}

/// Parses an expression one nesting level deeper than the current one.
///
/// Used for the inside of `( ... )` and for each function argument.
///
/// # Errors
/// - `NestingTooDeep` at the next token if the limit is already reached.
/// - Propagates any errors from the nested expression.
pub fn parse_nested_expression(ctx: &mut ParseContext<'_>) -> ParseResult<Expr> {
    if ctx.depth >= ctx.max_depth {
        return Err(ParseError::NestingTooDeep { limit:  ctx.max_depth,
                                                offset: ctx.tokens.peek().offset(), });
    }

    ctx.depth += 1;
    let expr = parse_expression(ctx);
    ctx.depth -= 1;
    expr
}
