use indexmap::IndexMap;

use crate::{Grammar, Item, ItemSet, Symbol};

/// Edge of the automaton, taken on `symbol`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub symbol: Symbol,
    pub target: usize,
}

/// State of the canonical LR(1) automaton
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    items: Vec<Item>,
    transitions: IndexMap<Symbol, usize>,
}

impl State {
    /// Attach the outgoing transitions to the items whose dot precedes their driving symbol
    pub(crate) fn new(grammar: &Grammar, item_set: ItemSet, transitions: IndexMap<Symbol, usize>) -> Self {
        let items = item_set
            .into_iter()
            .map(|(core, lookahead)| {
                let transition = grammar
                    .rule(core.rule)
                    .rhs
                    .get(core.pos)
                    .and_then(|symbol| {
                        transitions.get(symbol).map(|&target| Transition {
                            symbol: symbol.clone(),
                            target,
                        })
                    });
                Item {
                    rule_idx: core.rule,
                    pos: core.pos,
                    lookahead,
                    transition,
                }
            })
            .collect();
        State { items, transitions }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn transitions(&self) -> &IndexMap<Symbol, usize> {
        &self.transitions
    }

    pub fn transition(&self, symbol: &Symbol) -> Option<usize> {
        self.transitions.get(symbol).cloned()
    }

    /// Item set of the state, without transitions
    pub fn item_set(&self) -> ItemSet {
        self.items
            .iter()
            .map(|item| (item.core(), item.lookahead.clone()))
            .collect()
    }
}
