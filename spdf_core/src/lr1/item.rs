use std::collections::{BTreeMap, BTreeSet};

use crate::{Grammar, Symbol, Terminal, Transition};

/// Production rule with a dot position, the part of an item that decides its identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemCore {
    pub rule: usize,
    pub pos: usize,
}

/// Lookahead set of an item
// Using BTreeSet here, as it implements Hash
pub type Lookahead = BTreeSet<Terminal>;

/// Set of LR(1) items
///
/// Keyed by the item core, so two items that only differ in their lookahead can never coexist:
/// their lookaheads live in one merged set. Equality and hashing are independent of insertion
/// order.
pub type ItemSet = BTreeMap<ItemCore, Lookahead>;

/// LR(1) item of a finished automaton state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub rule_idx: usize,
    pub pos: usize,
    pub lookahead: Lookahead,
    /// Outgoing transition on the symbol after the dot, if there is one
    pub transition: Option<Transition>,
}

impl Item {
    pub fn core(&self) -> ItemCore {
        ItemCore {
            rule: self.rule_idx,
            pos: self.pos,
        }
    }

    pub fn next_symbol<'g>(&self, grammar: &'g Grammar) -> Option<&'g Symbol> {
        grammar.rule(self.rule_idx).rhs.get(self.pos)
    }

    pub fn is_pos_at_end(&self, grammar: &Grammar) -> bool {
        self.pos == grammar.rule(self.rule_idx).rhs.len()
    }

    /// Whether the item calls for a reduction, i.e. nothing but epsilon is left after the dot
    pub fn is_complete(&self, grammar: &Grammar) -> bool {
        match self.next_symbol(grammar) {
            None => true,
            Some(symbol) => grammar.is_epsilon(symbol),
        }
    }

    pub fn augmented_rule_string(&self, grammar: &Grammar) -> String {
        let rule = grammar.rule(self.rule_idx);
        let mut result = format!("{} →", rule.lhs);
        for p in 0..=rule.rhs.len() {
            if p == self.pos {
                result.push_str(" •");
            }
            if p < rule.rhs.len() {
                result.push_str(&format!(" {}", rule.rhs[p]));
            }
        }
        result
    }

    pub fn lookahead_string(&self) -> String {
        let lookahead_strings: Vec<String> =
            self.lookahead.iter().map(|la| format!("{}", la)).collect();
        lookahead_strings.join(", ")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::GrammarOptions;

    #[test]
    fn test_rendering() {
        let grammar =
            Grammar::new(vec![("S", "a S b"), ("S", "")], &GrammarOptions::default()).unwrap();
        let mut lookahead = Lookahead::new();
        lookahead.insert(Terminal::literal("b"));
        lookahead.insert(Terminal::literal("$"));
        let item = Item {
            rule_idx: 1,
            pos: 1,
            lookahead,
            transition: None,
        };
        assert_eq!(item.augmented_rule_string(&grammar), "S → a • S b");
        assert_eq!(item.lookahead_string(), "$, b");
        assert!(!item.is_complete(&grammar));

        let epsilon_item = Item {
            rule_idx: 2,
            pos: 0,
            lookahead: Lookahead::new(),
            transition: None,
        };
        assert!(epsilon_item.is_complete(&grammar));
        assert!(!epsilon_item.is_pos_at_end(&grammar));
    }
}
