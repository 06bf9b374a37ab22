use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::{Grammar, NonTerminal, Symbol, Terminal};

/// FIRST sets of all nonterminals
///
/// A set contains the epsilon terminal iff its nonterminal can derive the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstTable {
    sets: IndexMap<NonTerminal, IndexSet<Terminal>>,
    epsilon: Terminal,
}

impl FirstTable {
    /// Calculate the FIRST sets as a fixed point over all rules
    ///
    /// Consider the following example:
    /// ```ignore
    /// A -> B c
    /// B -> b
    /// B -> ε
    /// ```
    /// `FIRST(B) = {b, ε}` and, since `B` may vanish, `FIRST(A) = {b, c}`.
    pub fn build(grammar: &Grammar) -> Self {
        let mut table = FirstTable {
            sets: grammar
                .nonterminals()
                .iter()
                .map(|n| (n.clone(), IndexSet::new()))
                .collect(),
            epsilon: grammar.epsilon().clone(),
        };

        let mut rounds = 0;
        let mut changed = true;
        while changed {
            changed = false;
            rounds += 1;
            for rule in grammar.rules() {
                let additions = table.of_sequence(&rule.rhs);
                let set = table.sets.entry(rule.lhs.clone()).or_default();
                let before = set.len();
                set.extend(additions);
                changed |= set.len() > before;
            }
        }

        debug!(nonterminals = table.sets.len(), rounds, "built FIRST table");
        table
    }

    pub fn get(&self, nonterminal: &NonTerminal) -> Option<&IndexSet<Terminal>> {
        self.sets.get(nonterminal)
    }

    pub fn is_nullable(&self, nonterminal: &NonTerminal) -> bool {
        self.sets
            .get(nonterminal)
            .map_or(false, |set| set.contains(&self.epsilon))
    }

    /// FIRST set of a symbol string
    ///
    /// Symbols are folded in from the left while the previous ones are nullable. The result
    /// contains epsilon iff the whole string is nullable, which includes the empty string.
    pub fn of_sequence(&self, symbols: &[Symbol]) -> IndexSet<Terminal> {
        let mut result = IndexSet::new();
        for symbol in symbols {
            match symbol {
                Symbol::Terminal(t) => {
                    result.insert(t.clone());
                    return result;
                }
                Symbol::NonTerminal(n) => {
                    let first = match self.sets.get(n) {
                        Some(first) => first,
                        None => return result,
                    };
                    result.extend(first.iter().filter(|t| **t != self.epsilon).cloned());
                    if !first.contains(&self.epsilon) {
                        return result;
                    }
                }
            }
        }
        result.insert(self.epsilon.clone());
        result
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NonTerminal, &IndexSet<Terminal>)> {
        self.sets.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::GrammarOptions;

    fn first_of(rules: &[(&str, &str)]) -> (Grammar, FirstTable) {
        let grammar = Grammar::new(rules.iter().cloned(), &GrammarOptions::default()).unwrap();
        let first = FirstTable::build(&grammar);
        (grammar, first)
    }

    fn names(first: &FirstTable, nonterminal: &str) -> Vec<String> {
        let mut names: Vec<String> = first
            .get(&NonTerminal::new(nonterminal))
            .unwrap()
            .iter()
            .map(|t| t.name().to_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_left_recursion() {
        let (_, first) = first_of(&[("E", "E + B"), ("E", "B"), ("B", "0"), ("B", "1")]);
        assert_eq!(names(&first, "E"), vec!["0", "1"]);
        assert_eq!(names(&first, "E'"), vec!["0", "1"]);
        assert!(!first.is_nullable(&NonTerminal::new("E")));
    }

    #[test]
    fn test_epsilon_production() {
        let (_, first) = first_of(&[("S", "a S b"), ("S", "")]);
        assert_eq!(names(&first, "S"), vec!["a", "ε"]);
        assert!(first.is_nullable(&NonTerminal::new("S")));
        assert!(first.is_nullable(&NonTerminal::new("S'")));
    }

    #[test]
    fn test_nullable_prefix_is_skipped() {
        let (_, first) = first_of(&[
            ("A", "B C d"),
            ("B", "b"),
            ("B", ""),
            ("C", "c"),
            ("C", ""),
        ]);
        assert_eq!(names(&first, "A"), vec!["b", "c", "d"]);
        assert!(!first.is_nullable(&NonTerminal::new("A")));
    }

    #[test]
    fn test_all_nullable_rhs() {
        let (_, first) = first_of(&[("A", "B C"), ("B", "b"), ("B", ""), ("C", "c"), ("C", "")]);
        assert_eq!(names(&first, "A"), vec!["b", "c", "ε"]);
    }

    #[test]
    fn test_of_sequence() {
        let (grammar, first) = first_of(&[("S", "a S b"), ("S", "")]);
        let s = Symbol::NonTerminal(NonTerminal::new("S"));
        let b = Symbol::Terminal(Terminal::literal("b"));
        let seq = first.of_sequence(&[s.clone(), b]);
        assert!(seq.contains(&Terminal::literal("a")));
        assert!(seq.contains(&Terminal::literal("b")));
        assert!(!seq.contains(grammar.epsilon()));
        assert!(first.of_sequence(&[s]).contains(grammar.epsilon()));
        assert!(first.of_sequence(&[]).contains(grammar.epsilon()));
    }
}
