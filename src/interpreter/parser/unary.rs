use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        parser::{
            core::{ParseContext, ParseResult, parse_nested_expression},
            utils::parse_argument_list,
        },
        token::TokenKind,
    },
};

/// Parses a factor: an optionally negated factor tail.
///
/// Only a single leading minus is accepted, so `--3` fails on the second
/// `-`. The negation is expressed as a multiplication by `-1`.
///
/// Grammar: `factor := "-" factor_tail | factor_tail`
///
/// # Parameters
/// - `ctx`: Parse context positioned at the start of a factor.
///
/// # Returns
/// The factor, wrapped in [`Expr::negation`] when preceded by `-`.
pub(crate) fn parse_factor(ctx: &mut ParseContext<'_>) -> ParseResult<Expr> {
    if ctx.tokens.peek().kind() == TokenKind::Minus {
        let offset = ctx.tokens.advance().offset();
        let operand = parse_factor_tail(ctx)?;
        return Ok(Expr::negation(operand, offset));
    }
    parse_factor_tail(ctx)
}

/// Parses a number, a parenthesised expression or a function call.
///
/// Grammar:
/// ```text
///     factor_tail := number
///                  | "(" expression ")"
///                  | registered_name "(" arguments ")"
/// ```
/// # Errors
/// `UnrecognisedFactor` when the next token starts none of the above,
/// including names the registry does not know.
pub(crate) fn parse_factor_tail(ctx: &mut ParseContext<'_>) -> ParseResult<Expr> {
    let next = ctx.tokens.peek();

    match next.kind() {
        TokenKind::Numeric(_) => parse_number(ctx),
        TokenKind::OpenParen => parse_grouping(ctx),
        TokenKind::Text if ctx.registry.is_registered(next.lexeme()) => parse_function(ctx),
        _ => Err(ParseError::UnrecognisedFactor { token:  next.to_string(),
                                                  offset: next.offset(), }),
    }
}

/// Parses a numeric literal.
fn parse_number(ctx: &mut ParseContext<'_>) -> ParseResult<Expr> {
    let token = ctx.tokens.advance();
    match token.kind() {
        TokenKind::Numeric(value) => Ok(Expr::Number { value,
                                                       offset: token.offset() }),
        _ => Err(ParseError::UnrecognisedFactor { token:  token.to_string(),
                                                  offset: token.offset(), }),
    }
}

/// Parses `( expression )`.
///
/// # Errors
/// `ExpectedCloseBracket` at the opening bracket if the group is not closed.
fn parse_grouping(ctx: &mut ParseContext<'_>) -> ParseResult<Expr> {
    let open = ctx.tokens.advance().offset();
    let expr = parse_nested_expression(ctx)?;

    if ctx.tokens.peek().kind() != TokenKind::CloseParen {
        return Err(ParseError::ExpectedCloseBracket { offset: open });
    }
    ctx.tokens.advance();

    Ok(expr)
}

/// Parses a call of a registered function.
///
/// Grammar: `function := registered_name "(" arguments ")"`
///
/// The argument count is checked against the registered arity once the
/// list is closed.
///
/// # Errors
/// - `ExpectedOpenBracket` if the name is not followed by `(`.
/// - `ArityMismatch` at the closing bracket if the count is wrong.
/// - Propagates argument list errors.
fn parse_function(ctx: &mut ParseContext<'_>) -> ParseResult<Expr> {
    let name_token = ctx.tokens.advance();
    let function = ctx.registry
                      .lookup(name_token.lexeme())
                      .ok_or_else(|| ParseError::UnrecognisedFactor { token:  name_token.to_string(),
                                                                      offset: name_token.offset(), })?;
    let (name, arity) = (function.name().to_string(), function.arity());

    let open = ctx.tokens.peek();
    if open.kind() != TokenKind::OpenParen {
        return Err(ParseError::ExpectedOpenBracket { offset: open.offset() });
    }
    ctx.tokens.advance();

    let arguments = parse_argument_list(ctx)?;

    let close = ctx.tokens.advance();
    if arguments.len() != arity {
        return Err(ParseError::ArityMismatch { name,
                                               expected: arity,
                                               found: arguments.len(),
                                               offset: close.offset() });
    }

    Ok(Expr::Call { name,
                    arguments,
                    offset: name_token.offset() })
}
