use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::{Automaton, ConflictKind, Grammar, GrammarError, NonTerminal, Symbol, Terminal};

/// Entry of the ACTION/GOTO table
///
/// An absent entry is a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Shift(usize),
    Goto(usize),
    Reduce(usize),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Action::Shift(state) => write!(f, "shift {}", state),
            Action::Goto(state) => write!(f, "goto {}", state),
            Action::Reduce(rule) => write!(f, "reduce {}", rule),
            Action::Accept => write!(f, "accept"),
        }
    }
}

/// Combined ACTION and GOTO table, one row per automaton state
#[derive(Debug, Clone)]
pub struct ActionTable {
    rows: Vec<IndexMap<Symbol, Action>>,
}

impl ActionTable {
    /// Fill the table from the automaton
    ///
    /// Items with an outgoing transition yield `Shift` (on terminals) or `Goto` (on
    /// nonterminals). Complete items yield `Reduce` for each of their lookaheads, except for the
    /// augmented start rule which yields `Accept` on the end marker. Two different entries for
    /// the same cell are rejected as a conflict.
    pub fn build(grammar: &Grammar, automaton: &Automaton) -> Result<Self, GrammarError> {
        let mut rows = Vec::with_capacity(automaton.len());
        for (state_idx, state) in automaton.states().iter().enumerate() {
            let mut row = IndexMap::new();
            for item in state.items() {
                if let Some(transition) = &item.transition {
                    let action = match transition.symbol {
                        Symbol::Terminal(_) => Action::Shift(transition.target),
                        Symbol::NonTerminal(_) => Action::Goto(transition.target),
                    };
                    insert(&mut row, state_idx, transition.symbol.clone(), action)?;
                }
                if item.is_complete(grammar) {
                    let rule = grammar.rule(item.rule_idx);
                    if rule.lhs == *grammar.augmented_start() {
                        insert(
                            &mut row,
                            state_idx,
                            Symbol::Terminal(grammar.end().clone()),
                            Action::Accept,
                        )?;
                    } else {
                        for lookahead in item.lookahead.iter() {
                            insert(
                                &mut row,
                                state_idx,
                                Symbol::Terminal(lookahead.clone()),
                                Action::Reduce(item.rule_idx),
                            )?;
                        }
                    }
                }
            }
            rows.push(row);
        }

        debug!(states = rows.len(), "built ACTION/GOTO table");
        Ok(ActionTable { rows })
    }

    pub fn get(&self, state: usize, symbol: &Symbol) -> Option<Action> {
        self.rows.get(state)?.get(symbol).cloned()
    }

    /// Successor state after reducing to `nonterminal`
    pub fn goto(&self, state: usize, nonterminal: &NonTerminal) -> Option<usize> {
        match self.get(state, &Symbol::NonTerminal(nonterminal.clone()))? {
            Action::Goto(target) => Some(target),
            _ => None,
        }
    }

    /// Find the terminal cell matching a token category
    ///
    /// A terminal with the same name wins. Otherwise the first regex terminal of the row that
    /// fully matches `category` is taken.
    pub fn lookup_terminal(&self, state: usize, category: &str) -> Option<(&Terminal, Action)> {
        let row = self.rows.get(state)?;
        let exact = Symbol::Terminal(Terminal::literal(category));
        if let Some((_, Symbol::Terminal(terminal), action)) = row.get_full(&exact) {
            return Some((terminal, *action));
        }
        row.iter().find_map(|(symbol, action)| match symbol {
            Symbol::Terminal(terminal) if terminal.is_regex() && terminal.matches(category) => {
                Some((terminal, *action))
            }
            _ => None,
        })
    }

    pub fn row(&self, state: usize) -> Option<&IndexMap<Symbol, Action>> {
        self.rows.get(state)
    }

    /// Number of states
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn insert(
    row: &mut IndexMap<Symbol, Action>,
    state: usize,
    symbol: Symbol,
    action: Action,
) -> Result<(), GrammarError> {
    match row.get(&symbol) {
        None => {
            row.insert(symbol, action);
            Ok(())
        }
        Some(existing) if *existing == action => Ok(()),
        Some(existing) => {
            let kind = match (existing, action) {
                (Action::Reduce(_), Action::Reduce(_))
                | (Action::Reduce(_), Action::Accept)
                | (Action::Accept, Action::Reduce(_)) => ConflictKind::ReduceReduce,
                _ => ConflictKind::ShiftReduce,
            };
            Err(GrammarError::Conflict {
                state,
                symbol,
                kind,
                existing: *existing,
                incoming: action,
            })
        }
    }
}
