use std::{fmt, mem};

use crate::{ast::Expr, util::num::format_number};

/// A label-only parse tree node, used for diagnostics and visualisation.
///
/// Binary operators are labelled with their symbol, numbers with their fixed
/// decimal form and function calls with the canonical function name. The
/// evaluator never looks at this tree.
///
/// Like [`Expr`], the tree can be as deep as an operator chain is long, so
/// cloning, comparing and dropping it never recurse.
#[derive(Debug)]
pub struct TreeNode {
    /// Display label.
    pub label:    String,
    /// Character offset in the source expression.
    pub offset:   usize,
    /// Children in source order; empty for numbers.
    pub children: Vec<Self>,
}

impl TreeNode {
    /// Creates a leaf node.
    #[must_use]
    pub fn leaf(label: impl Into<String>, offset: usize) -> Self {
        Self { label: label.into(),
               offset,
               children: Vec::new() }
    }

    /// Number of nodes in the tree, including this one.
    #[must_use]
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(&node.children);
        }
        count
    }
}

impl From<&Expr> for TreeNode {
    fn from(expr: &Expr) -> Self {
        expr.fold(|node, children| match node {
                Expr::Number { value, offset } => Self::leaf(format_number(*value), *offset),
                Expr::Binary { op, offset, .. } => Self { label: op.symbol().to_string(),
                                                          offset: *offset,
                                                          children },
                Expr::Call { name, offset, .. } => Self { label: name.clone(),
                                                          offset: *offset,
                                                          children },
            })
    }
}

impl Clone for TreeNode {
    fn clone(&self) -> Self {
        let mut work = vec![(self, false)];
        let mut built: Vec<Self> = Vec::new();

        while let Some((node, expanded)) = work.pop() {
            if expanded {
                let children = built.split_off(built.len() - node.children.len());
                built.push(Self { label: node.label.clone(),
                                  offset: node.offset,
                                  children });
            } else {
                work.push((node, true));
                work.extend(node.children.iter().rev().map(|child| (child, false)));
            }
        }

        built.pop()
             .unwrap_or_else(|| unreachable!("the root is always built last"))
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.label != b.label || a.offset != b.offset || a.children.len() != b.children.len() {
                return false;
            }
            pending.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for TreeNode {}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl fmt::Display for TreeNode {
    /// Dumps the tree one node per line as `label (@ Position offset)`,
    /// indented by one space per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![(self, 0)];
        while let Some((node, depth)) = pending.pop() {
            writeln!(f,
                     "{:indent$}{} (@ Position {})",
                     "",
                     node.label,
                     node.offset,
                     indent = depth)?;
            pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOperator;

    fn sample() -> Expr {
        // -2 * POWER(3, 4)
        Expr::Binary { op:     BinaryOperator::Multiply,
                       left:   Box::new(Expr::negation(Expr::Number { value:  2.0,
                                                                      offset: 1, },
                                                       0)),
                       right:  Box::new(Expr::Call { name:      "POWER".to_string(),
                                                     arguments: vec![Expr::Number { value:  3.0,
                                                                                    offset: 11, },
                                                                     Expr::Number { value:  4.0,
                                                                                    offset: 14, }],
                                                     offset:    5, }),
                       offset: 3, }
    }

    #[test]
    fn labels_and_children_follow_the_expression() {
        let tree = TreeNode::from(&sample());

        assert_eq!(tree.label, "*");
        assert_eq!(tree.children.len(), 2);
        let negation = &tree.children[0];
        assert_eq!((negation.label.as_str(), negation.offset), ("*", 0));
        assert_eq!(negation.children[0], TreeNode::leaf("2", 1));
        assert_eq!(negation.children[1], TreeNode::leaf("-1", 0));
        let call = &tree.children[1];
        assert_eq!(call.label, "POWER");
        assert_eq!(call.children,
                   vec![TreeNode::leaf("3", 11), TreeNode::leaf("4", 14)]);
        assert_eq!(tree.size(), 8);
    }

    #[test]
    fn deep_trees_clone_compare_and_drop() {
        let mut expr = Expr::Number { value:  1.0,
                                      offset: 0, };
        for i in 1..200_000 {
            expr = Expr::Binary { op:     BinaryOperator::Add,
                                  left:   Box::new(expr),
                                  right:  Box::new(Expr::Number { value:  1.0,
                                                                  offset: 2 * i, }),
                                  offset: 2 * i - 1, };
        }

        let tree = TreeNode::from(&expr);
        assert_eq!(tree.size(), 399_999);

        let mut copy = tree.clone();
        assert!(copy == tree);
        copy.children[1].offset += 1;
        assert!(copy != tree);
    }

    #[test]
    fn dump_indents_one_space_per_level() {
        let dump = TreeNode::from(&sample()).to_string();

        assert_eq!(dump,
                   "* (@ Position 3)\n \
                    * (@ Position 0)\n  \
                    2 (@ Position 1)\n  \
                    -1 (@ Position 0)\n \
                    POWER (@ Position 5)\n  \
                    3 (@ Position 11)\n  \
                    4 (@ Position 14)\n");
    }
}
