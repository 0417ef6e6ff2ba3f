use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        parser::core::{ParseContext, ParseResult, parse_nested_expression},
        token::TokenKind,
    },
};

/// Parses a comma-separated function argument list up to, but not
/// including, the closing bracket.
///
/// An immediately encountered `)` produces an empty list. On success the
/// next token is always the `)`, left for the caller so it can report arity
/// errors at its position.
///
/// Grammar: `arguments := (expression ("," expression)*)?`
///
/// # Parameters
/// - `ctx`: Parse context positioned just after the opening bracket.
///
/// # Returns
/// The argument expressions in source order.
///
/// # Errors
/// - `UnclosedArgumentList` if the input ends inside the list.
/// - `ExpectedComma` if an argument is followed by anything other than `,`
///   or `)`.
/// - Propagates any errors from argument parsing.
pub(in crate::interpreter::parser) fn parse_argument_list(ctx: &mut ParseContext<'_>)
                                                          -> ParseResult<Vec<Expr>> {
    let mut arguments = Vec::new();
    if ctx.tokens.peek().kind() == TokenKind::CloseParen {
        return Ok(arguments);
    }

    loop {
        arguments.push(parse_nested_expression(ctx)?);

        let next = ctx.tokens.peek();
        match next.kind() {
            TokenKind::Separator => {
                ctx.tokens.advance();
            },
            TokenKind::CloseParen => break,
            TokenKind::Eof => {
                return Err(ParseError::UnclosedArgumentList { offset: next.offset() });
            },
            _ => return Err(ParseError::ExpectedComma { offset: next.offset() }),
        }
    }
    Ok(arguments)
}
