use std::mem;

/// A binary arithmetic operator.
///
/// Unary negation has no operator of its own: the parser rewrites `-x` as
/// `x * -1`, so these four operators are the whole arithmetic instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

impl BinaryOperator {
    /// The source symbol of the operator, used as its parse tree label.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// The upper-case mnemonic printed in postfix programs.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Subtract => "SUBTRACT",
            Self::Multiply => "MULTIPLY",
            Self::Divide => "DIVIDE",
        }
    }

    /// Applies the operator to `left` and `right` with IEEE semantics.
    ///
    /// Division by zero yields an infinity or `NaN`; it is not an error.
    ///
    /// # Example
    /// ```
    /// use exprcalc::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Subtract.apply(10.0, 3.0), 7.0);
    /// assert_eq!(BinaryOperator::Divide.apply(1.0, 0.0), f64::INFINITY);
    /// ```
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }
}

/// An abstract syntax tree node produced by the parser.
///
/// `Expr` is the single structure built during descent. The postfix program
/// and the label-only diagnostic tree are both derived from it afterwards,
/// so the two views of one parse always agree.
///
/// Long operator chains produce trees as deep as the chain is long, so
/// `Clone`, `PartialEq` and `Drop` are implemented with explicit work stacks
/// instead of recursion.
#[derive(Debug)]
pub enum Expr {
    /// A numeric literal, or the `-1` synthesised for unary minus.
    Number {
        /// The literal value.
        value:  f64,
        /// Character offset in the source expression.
        offset: usize,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        op:     BinaryOperator,
        /// Left operand.
        left:   Box<Self>,
        /// Right operand.
        right:  Box<Self>,
        /// Offset of the operator (of the `-` for a negation).
        offset: usize,
    },
    /// A call of a registered function.
    Call {
        /// Canonical (upper-case) function name.
        name:      String,
        /// Arguments in source order; their count equals the arity.
        arguments: Vec<Self>,
        /// Offset of the function name.
        offset:    usize,
    },
}

impl Expr {
    /// Builds the node for a unary minus applied to `operand`.
    ///
    /// Negation is expressed as multiplication by `-1`; both synthetic nodes
    /// sit at the offset of the minus sign.
    #[must_use]
    pub fn negation(operand: Self, offset: usize) -> Self {
        Self::Binary { op: BinaryOperator::Multiply,
                       left: Box::new(operand),
                       right: Box::new(Self::Number { value: -1.0,
                                                      offset }),
                       offset }
    }

    /// Iterates over the tree in post-order: children left to right, then
    /// the node itself.
    ///
    /// The walk is driven by an explicit work stack, so long operator chains
    /// (which produce deep left-leaning trees) do not consume native stack.
    #[must_use]
    pub fn post_order(&self) -> PostOrder<'_> {
        PostOrder { work: vec![Visit::Expand(self)] }
    }

    /// Returns the source offset recorded for this node.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Number { offset, .. } | Self::Binary { offset, .. } | Self::Call { offset, .. } => {
                *offset
            },
        }
    }

    /// Number of direct children: two for an operator, one per argument for
    /// a call.
    #[must_use]
    pub const fn child_count(&self) -> usize {
        match self {
            Self::Number { .. } => 0,
            Self::Binary { .. } => 2,
            Self::Call { arguments, .. } => arguments.len(),
        }
    }

    /// Builds a value bottom-up over the tree.
    ///
    /// `build` is called once per node in post-order with the results already
    /// built for its children, in source order.
    pub fn fold<T>(&self, mut build: impl FnMut(&Self, Vec<T>) -> T) -> T {
        let mut built: Vec<T> = Vec::new();
        for node in self.post_order() {
            let children = built.split_off(built.len() - node.child_count());
            built.push(build(node, children));
        }
        built.pop()
             .unwrap_or_else(|| unreachable!("a post-order walk always yields the root"))
    }

    /// Compares the node itself, ignoring its children.
    #[allow(clippy::float_cmp)]
    fn same_node(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number { value: a, offset: x }, Self::Number { value: b, offset: y }) => {
                a == b && x == y
            },
            (Self::Binary { op: a, offset: x, .. }, Self::Binary { op: b, offset: y, .. }) => {
                a == b && x == y
            },
            (Self::Call { name: a, offset: x, .. }, Self::Call { name: b, offset: y, .. }) => {
                a == b && x == y && self.child_count() == other.child_count()
            },
            _ => false,
        }
    }

    /// Moves the children of this node into `into`, leaving it childless.
    fn detach_children(&mut self, into: &mut Vec<Self>) {
        match self {
            Self::Number { .. } => {},
            Self::Binary { left, right, .. } => {
                into.push(mem::replace(&mut **left, Self::Number { value:  0.0,
                                                                   offset: 0, }));
                into.push(mem::replace(&mut **right, Self::Number { value:  0.0,
                                                                    offset: 0, }));
            },
            Self::Call { arguments, .. } => into.append(arguments),
        }
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        self.fold(|node, children| match node {
                Self::Number { value, offset } => Self::Number { value:  *value,
                                                                 offset: *offset, },
                Self::Binary { op, offset, .. } => {
                    let [left, right] = <[Self; 2]>::try_from(children)
                        .unwrap_or_else(|_| unreachable!("an operator has two operands"));
                    Self::Binary { op:     *op,
                                   left:   Box::new(left),
                                   right:  Box::new(right),
                                   offset: *offset, }
                },
                Self::Call { name, offset, .. } => Self::Call { name:      name.clone(),
                                                                arguments: children,
                                                                offset:    *offset, },
            })
    }
}

impl PartialEq for Expr {
    /// Two trees are equal when their post-order walks match node by node.
    /// Every node's child count is part of the comparison, so equal walks
    /// imply equal shapes.
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.post_order();
        let mut right = other.post_order();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.same_node(b) => {},
                _ => return false,
            }
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// A pending step of the post-order walk.
enum Visit<'a> {
    /// Schedule the children of the node, then the node itself.
    Expand(&'a Expr),
    /// All children were yielded; yield the node.
    Yield(&'a Expr),
}

/// Post-order iterator over an expression tree, see [`Expr::post_order`].
pub struct PostOrder<'a> {
    work: Vec<Visit<'a>>,
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.work.pop()? {
                Visit::Yield(node) => return Some(node),
                Visit::Expand(node) => {
                    self.work.push(Visit::Yield(node));
                    match node {
                        Expr::Number { .. } => {},
                        Expr::Binary { left, right, .. } => {
                            self.work.push(Visit::Expand(right));
                            self.work.push(Visit::Expand(left));
                        },
                        Expr::Call { arguments, .. } => {
                            self.work.extend(arguments.iter().rev().map(Visit::Expand));
                        },
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_multiplies_by_minus_one() {
        let operand = Expr::Number { value:  3.0,
                                     offset: 1, };
        let negated = Expr::negation(operand.clone(), 0);

        assert_eq!(negated,
                   Expr::Binary { op:     BinaryOperator::Multiply,
                                  left:   Box::new(operand),
                                  right:  Box::new(Expr::Number { value:  -1.0,
                                                                  offset: 0, }),
                                  offset: 0, });
        assert_eq!(negated.offset(), 0);
    }

    #[test]
    fn post_order_visits_children_first() {
        let call = Expr::Call { name:      "POWER".to_string(),
                                arguments: vec![Expr::Number { value:  2.0,
                                                               offset: 6, },
                                                Expr::negation(Expr::Number { value:  3.0,
                                                                              offset: 9, },
                                                               8)],
                                offset:    0, };

        let offsets = call.post_order().map(Expr::offset).collect::<Vec<_>>();
        assert_eq!(offsets, vec![6, 9, 8, 8, 0]);
    }

    fn chain(terms: usize) -> Expr {
        let mut expr = Expr::Number { value:  1.0,
                                      offset: 0, };
        for i in 1..terms {
            expr = Expr::Binary { op:     BinaryOperator::Add,
                                  left:   Box::new(expr),
                                  right:  Box::new(Expr::Number { value:  1.0,
                                                                  offset: 2 * i, }),
                                  offset: 2 * i - 1, };
        }
        expr
    }

    #[test]
    fn clone_and_compare_deep_chains() {
        let expr = chain(300_000);
        let copy = expr.clone();

        assert!(copy == expr);
        assert_eq!(copy.post_order().count(), 599_999);
        assert!(chain(300_000) != chain(299_999));
    }

    #[test]
    fn equality_sees_shape_and_offsets() {
        let a = Expr::negation(Expr::Number { value:  2.0,
                                              offset: 1, },
                               0);
        let b = Expr::negation(Expr::Number { value:  2.0,
                                              offset: 2, },
                               0);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);

        let call = |arguments| Expr::Call { name: "F".to_string(),
                                            arguments,
                                            offset: 0 };
        assert_ne!(call(vec![]), call(vec![Expr::Number { value:  1.0,
                                                          offset: 2, }]));
    }

    #[test]
    fn fold_sees_children_in_source_order() {
        let expr = Expr::Binary { op:     BinaryOperator::Subtract,
                                  left:   Box::new(Expr::Number { value:  5.0,
                                                                  offset: 0, }),
                                  right:  Box::new(Expr::Number { value:  2.0,
                                                                  offset: 2, }),
                                  offset: 1, };

        let value = expr.fold(|node, operands: Vec<f64>| match node {
                            Expr::Number { value, .. } => *value,
                            Expr::Binary { op, .. } => op.apply(operands[0], operands[1]),
                            Expr::Call { .. } => f64::NAN,
                        });
        assert_eq!(value, 3.0);
    }

    #[test]
    fn operators_keep_operand_order() {
        assert_eq!(BinaryOperator::Subtract.apply(2.0, 5.0), -3.0);
        assert_eq!(BinaryOperator::Divide.apply(6.0, 3.0), 2.0);
        assert!(BinaryOperator::Divide.apply(0.0, 0.0).is_nan());
    }
}
