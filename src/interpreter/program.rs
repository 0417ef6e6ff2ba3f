use std::fmt;

use crate::{
    ast::{BinaryOperator, Expr},
    util::num::format_number,
};

/// One step of a postfix program.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Push a number.
    Number(f64),
    /// Pop the right then the left operand, push `left op right`.
    Binary(BinaryOperator),
    /// Pop the arguments of a registered function, push its result.
    Function(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", format_number(*value)),
            Self::Binary(op) => write!(f, "{}", op.mnemonic()),
            Self::Function(name) => write!(f, "{name}"),
        }
    }
}

/// A postfix (reverse Polish) instruction sequence.
///
/// Operands always precede their operator, so the sequence can be executed
/// left to right on a single stack.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program(pub Vec<Instruction>);

impl std::ops::Deref for Program {
    type Target = Vec<Instruction>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for Program {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.iter().map(ToString::to_string).collect::<Vec<_>>();
        write!(f, "{}", parts.join(" "))
    }
}

impl Program {
    /// Derives the postfix program of an expression tree.
    ///
    /// The program is the post-order sequence of the tree's nodes, so operands
    /// always precede their operator.
    ///
    /// # Example
    /// ```
    /// use exprcalc::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::program::{Instruction, Program},
    /// };
    ///
    /// let minus_three = Expr::negation(Expr::Number { value: 3.0, offset: 1 }, 0);
    /// let program = Program::from_expr(&minus_three);
    ///
    /// assert_eq!(*program,
    ///            vec![Instruction::Number(3.0),
    ///                 Instruction::Number(-1.0),
    ///                 Instruction::Binary(BinaryOperator::Multiply)]);
    /// assert_eq!(program.to_string(), "3 -1 MULTIPLY");
    /// ```
    #[must_use]
    pub fn from_expr(expr: &Expr) -> Self {
        expr.post_order()
            .map(|node| match node {
                Expr::Number { value, .. } => Instruction::Number(*value),
                Expr::Binary { op, .. } => Instruction::Binary(*op),
                Expr::Call { name, .. } => Instruction::Function(name.clone()),
            })
            .collect()
    }
}
