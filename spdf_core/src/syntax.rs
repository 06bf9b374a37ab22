use std::collections::VecDeque;
use std::fmt;

use crate::Token;

/// Label of a syntax tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    NonTerminal(String),
    Token(Token),
}

/// Node of a syntax tree, owning its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    value: NodeValue,
    children: Vec<SyntaxNode>,
}

/// Predicate for [`SyntaxNode::find_nodes`]
pub type NodePredicate<'p> = &'p dyn Fn(&SyntaxNode) -> bool;

/// Selects tokens in [`SyntaxNode::find_tokens`]
pub enum TokenSelector<R> {
    /// Tokens of one category
    Category(String),
    /// Arbitrary function over the child tokens of one node, `None` when nothing is found
    Aggregate(Box<dyn Fn(&[&Token]) -> Option<R>>),
}

impl<R> fmt::Debug for TokenSelector<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            TokenSelector::Category(category) => f.debug_tuple("Category").field(category).finish(),
            TokenSelector::Aggregate(_) => f.write_str("Aggregate(..)"),
        }
    }
}

/// What a [`TokenSelector`] found at one node
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'t, R> {
    Tokens(Vec<&'t Token>),
    Value(R),
}

impl<'t, R> Selection<'t, R> {
    pub fn tokens(&self) -> Option<&[&'t Token]> {
        match self {
            Selection::Tokens(tokens) => Some(tokens.as_slice()),
            Selection::Value(_) => None,
        }
    }

    pub fn value(&self) -> Option<&R> {
        match self {
            Selection::Value(value) => Some(value),
            Selection::Tokens(_) => None,
        }
    }
}

impl SyntaxNode {
    pub fn leaf(token: Token) -> Self {
        SyntaxNode {
            value: NodeValue::Token(token),
            children: Vec::new(),
        }
    }

    pub fn interior(name: &str, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode {
            value: NodeValue::NonTerminal(name.to_owned()),
            children,
        }
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    /// Nonterminal name of an interior node
    pub fn name(&self) -> Option<&str> {
        match &self.value {
            NodeValue::NonTerminal(name) => Some(name),
            NodeValue::Token(_) => None,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match &self.value {
            NodeValue::Token(token) => Some(token),
            NodeValue::NonTerminal(_) => None,
        }
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Breadth-first search for descendants matching any of `predicates`
    ///
    /// Returns one list per predicate, in breadth-first order. The node itself is never part of
    /// the result.
    pub fn find_nodes(&self, predicates: &[NodePredicate]) -> Vec<Vec<&SyntaxNode>> {
        let mut results = vec![Vec::new(); predicates.len()];
        let mut queue: VecDeque<&SyntaxNode> = self.children.iter().collect();
        while let Some(node) = queue.pop_front() {
            for (predicate, result) in predicates.iter().zip(results.iter_mut()) {
                if predicate(node) {
                    result.push(node);
                }
            }
            queue.extend(node.children.iter());
        }
        results
    }

    /// Depth-first pre-order walk applying `selectors` to the child tokens of every node
    ///
    /// Returns one list per selector, holding each non-empty selection in visiting order.
    pub fn find_tokens<R>(&self, selectors: &[TokenSelector<R>]) -> Vec<Vec<Selection<'_, R>>> {
        let mut results: Vec<Vec<Selection<R>>> = selectors.iter().map(|_| Vec::new()).collect();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            let tokens: Vec<&Token> = node.children.iter().filter_map(|c| c.token()).collect();
            for (selector, result) in selectors.iter().zip(results.iter_mut()) {
                let selection = match selector {
                    TokenSelector::Category(category) => {
                        let selected: Vec<&Token> = tokens
                            .iter()
                            .cloned()
                            .filter(|t| t.category() == Some(category.as_str()))
                            .collect();
                        if selected.is_empty() {
                            None
                        } else {
                            Some(Selection::Tokens(selected))
                        }
                    }
                    TokenSelector::Aggregate(aggregate) => aggregate(&tokens).map(Selection::Value),
                };
                result.extend(selection);
            }
            stack.extend(node.children.iter().rev());
        }
        results
    }

    /// All leaf tokens in document order
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(token) = node.token() {
                tokens.push(token);
            }
            stack.extend(node.children.iter().rev());
        }
        tokens
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            for _ in 0..depth {
                write!(f, "\t")?;
            }
            match &node.value {
                NodeValue::NonTerminal(name) => writeln!(f, "{}", name)?,
                NodeValue::Token(token) => writeln!(f, "{}", token)?,
            }
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        Ok(())
    }
}
