use std::fmt;

use crate::{NonTerminal, Symbol, Terminal};

/// Production rule `lhs -> rhs`
///
/// An epsilon production carries the epsilon terminal as its single rhs symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub lhs: NonTerminal,
    pub rhs: Vec<Symbol>,
}

impl Rule {
    pub fn is_epsilon(&self, epsilon: &Terminal) -> bool {
        self.rhs.len() == 1 && self.rhs[0] == Symbol::Terminal(epsilon.clone())
    }

    /// Number of stack entries a reduction by this rule consumes
    pub fn reduce_len(&self, epsilon: &Terminal) -> usize {
        self.rhs
            .iter()
            .filter(|symbol| match symbol {
                Symbol::Terminal(t) => t != epsilon,
                Symbol::NonTerminal(_) => true,
            })
            .count()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} →", self.lhs)?;
        for symbol in self.rhs.iter() {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}
