use std::collections::btree_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::iter;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::{FirstTable, FollowTable, Grammar, ItemCore, ItemSet, Lookahead, State, Symbol};

/// Canonical LR(1) automaton
///
/// State 0 is the closure of `[S' -> • S, $]`. States are numbered in the order they are
/// discovered by a breadth-first walk over the transitions.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<State>,
}

impl Automaton {
    pub fn build(grammar: &Grammar, first: &FirstTable, follow: &FollowTable) -> Self {
        let mut initial = ItemSet::new();
        initial.insert(
            ItemCore { rule: 0, pos: 0 },
            iter::once(grammar.end().clone()).collect(),
        );
        let state0 = closure(grammar, first, initial);

        let mut item_sets = vec![state0.clone()];
        let mut transitions: Vec<IndexMap<Symbol, usize>> = vec![IndexMap::new()];
        let mut known = HashMap::new();
        known.insert(state0, 0);

        let mut next_states = VecDeque::<usize>::new();
        next_states.push_back(0);

        while let Some(current_state) = next_states.pop_front() {
            for symbol in driving_symbols(grammar, follow, &item_sets[current_state]) {
                let next = goto(grammar, first, &item_sets[current_state], &symbol);
                if next.is_empty() {
                    continue;
                }
                // Reuse an existing state with the same items if possible
                let idx = match known.get(&next) {
                    Some(&idx) => idx,
                    None => {
                        let idx = item_sets.len();
                        trace!(state = idx, from = current_state, symbol = %symbol, "new state");
                        known.insert(next.clone(), idx);
                        item_sets.push(next);
                        transitions.push(IndexMap::new());
                        next_states.push_back(idx);
                        idx
                    }
                };
                transitions[current_state].insert(symbol, idx);
            }
        }

        let states: Vec<State> = item_sets
            .into_iter()
            .zip(transitions)
            .map(|(items, transitions)| State::new(grammar, items, transitions))
            .collect();
        debug!(states = states.len(), "built LR(1) automaton");
        Automaton { states }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, idx: usize) -> &State {
        &self.states[idx]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Symbols to compute successor states for
///
/// Items with a dot before epsilon contribute `FOLLOW` of their left-hand side instead, so that
/// the states reached by skipping the empty production are discovered too.
fn driving_symbols(grammar: &Grammar, follow: &FollowTable, items: &ItemSet) -> IndexSet<Symbol> {
    let mut symbols = IndexSet::new();
    for core in items.keys() {
        let rule = grammar.rule(core.rule);
        match rule.rhs.get(core.pos) {
            Some(symbol) if grammar.is_epsilon(symbol) => {
                if let Some(follow_lhs) = follow.get(&rule.lhs) {
                    symbols.extend(follow_lhs.iter().cloned().map(Symbol::Terminal));
                }
            }
            Some(symbol) => {
                symbols.insert(symbol.clone());
            }
            None => {}
        }
    }
    symbols
}

/// Move an item set into its closure
///
/// For every item `[A -> α • B β, L]` and every rule `B -> γ` the closure contains
/// `[B -> • γ, FIRST(β L)]`. Items with the same rule and dot share one merged lookahead set.
pub fn closure(grammar: &Grammar, first: &FirstTable, items: ItemSet) -> ItemSet {
    let mut closure = items;
    let mut unclosed: Vec<(ItemCore, Lookahead)> = closure
        .iter()
        .map(|(core, lookahead)| (*core, lookahead.clone()))
        .collect();

    while let Some((core, lookahead)) = unclosed.pop() {
        let rule = grammar.rule(core.rule);
        let nonterminal = match rule.rhs.get(core.pos) {
            Some(Symbol::NonTerminal(n)) => n,
            _ => continue,
        };
        let new_lookahead = closure_lookahead(grammar, first, &rule.rhs[core.pos + 1..], &lookahead);

        for (rule_idx, _) in grammar.rules_for(nonterminal) {
            let new_core = ItemCore {
                rule: rule_idx,
                pos: 0,
            };
            match closure.entry(new_core) {
                Entry::Vacant(entry) => {
                    entry.insert(new_lookahead.clone());
                    unclosed.push((new_core, new_lookahead.clone()));
                }
                Entry::Occupied(mut entry) => {
                    // Only lookaheads that were not already in the set still have to be closed
                    let diff: Lookahead = new_lookahead.difference(entry.get()).cloned().collect();
                    if !diff.is_empty() {
                        entry.get_mut().extend(diff.iter().cloned());
                        unclosed.push((new_core, diff));
                    }
                }
            }
        }
    }

    closure
}

fn closure_lookahead(
    grammar: &Grammar,
    first: &FirstTable,
    beta: &[Symbol],
    lookahead: &Lookahead,
) -> Lookahead {
    let mut first_beta = first.of_sequence(beta);
    let nullable = first_beta.swap_remove(grammar.epsilon());
    let mut result: Lookahead = first_beta.into_iter().collect();
    if nullable {
        result.extend(lookahead.iter().cloned());
    }
    result
}

/// Items reached from `items` by moving the dot over `symbol`, closed
///
/// Empty iff no item of `items` has `symbol` right after its dot.
pub fn goto(grammar: &Grammar, first: &FirstTable, items: &ItemSet, symbol: &Symbol) -> ItemSet {
    let kernel: ItemSet = items
        .iter()
        .filter(|(core, _)| grammar.rule(core.rule).rhs.get(core.pos) == Some(symbol))
        .map(|(core, lookahead)| {
            (
                ItemCore {
                    rule: core.rule,
                    pos: core.pos + 1,
                },
                lookahead.clone(),
            )
        })
        .collect();
    if kernel.is_empty() {
        return kernel;
    }
    closure(grammar, first, kernel)
}
