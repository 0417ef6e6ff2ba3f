use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        parser::{
            core::{ParseContext, ParseResult},
            unary::parse_factor,
        },
        token::TokenKind,
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles the left-associative operators `+` and `-`.
///
/// The rule is: `additive := term (("+" | "-") term)*`
///
/// # Parameters
/// - `ctx`: Parse context.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_additive(ctx: &mut ParseContext<'_>) -> ParseResult<Expr> {
    let mut left = parse_term(ctx)?;
    while let Some(op) = token_to_binary_operator(ctx.tokens.peek().kind())
          && matches!(op, BinaryOperator::Add | BinaryOperator::Subtract)
    {
        let offset = ctx.tokens.advance().offset();
        let right = parse_term(ctx)?;
        left = Expr::Binary { op,
                              left: Box::new(left),
                              right: Box::new(right),
                              offset };
    }
    Ok(left)
}

/// Parses multiplication and division expressions.
///
/// The rule is: `term := factor (("*" | "/") factor)*`
///
/// # Parameters
/// - `ctx`: Parse context.
///
/// # Returns
/// A binary expression tree combining factor-level nodes.
pub fn parse_term(ctx: &mut ParseContext<'_>) -> ParseResult<Expr> {
    let mut left = parse_factor(ctx)?;
    while let Some(op) = token_to_binary_operator(ctx.tokens.peek().kind())
          && matches!(op, BinaryOperator::Multiply | BinaryOperator::Divide)
    {
        let offset = ctx.tokens.advance().offset();
        let right = parse_factor(ctx)?;
        left = Expr::Binary { op,
                              left: Box::new(left),
                              right: Box::new(right),
                              offset };
    }
    Ok(left)
}

/// Maps an operator token to its binary operator, if it is one.
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        TokenKind::Multiply => Some(BinaryOperator::Multiply),
        TokenKind::Divide => Some(BinaryOperator::Divide),
        _ => None,
    }
}
