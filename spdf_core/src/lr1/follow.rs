use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::{FirstTable, Grammar, NonTerminal, Symbol, Terminal};

/// FOLLOW sets of all nonterminals
///
/// Never contains the epsilon terminal. `FOLLOW(S')` is exactly the end marker.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowTable {
    sets: IndexMap<NonTerminal, IndexSet<Terminal>>,
}

impl FollowTable {
    pub fn build(grammar: &Grammar, first: &FirstTable) -> Self {
        let mut sets: IndexMap<NonTerminal, IndexSet<Terminal>> = grammar
            .nonterminals()
            .iter()
            .map(|n| (n.clone(), IndexSet::new()))
            .collect();
        sets.entry(grammar.augmented_start().clone())
            .or_default()
            .insert(grammar.end().clone());

        let epsilon = grammar.epsilon();
        let mut rounds = 0;
        let mut changed = true;
        while changed {
            changed = false;
            rounds += 1;
            for rule in grammar.rules() {
                for (pos, symbol) in rule.rhs.iter().enumerate() {
                    let b = match symbol {
                        Symbol::NonTerminal(b) => b,
                        Symbol::Terminal(_) => continue,
                    };

                    let mut additions = IndexSet::new();
                    let mut inherit = false;
                    match rule.rhs.get(pos + 1) {
                        Some(Symbol::Terminal(x)) if x != epsilon => {
                            additions.insert(x.clone());
                        }
                        Some(Symbol::NonTerminal(x)) => {
                            if let Some(first_x) = first.get(x) {
                                additions.extend(first_x.iter().filter(|t| *t != epsilon).cloned());
                            }
                            inherit = first.is_nullable(x);
                        }
                        // Rightmost, or followed by the epsilon marker
                        _ => inherit = true,
                    }
                    if inherit {
                        if let Some(follow_a) = sets.get(&rule.lhs) {
                            additions.extend(follow_a.iter().cloned());
                        }
                    }

                    let set = sets.entry(b.clone()).or_default();
                    let before = set.len();
                    set.extend(additions);
                    changed |= set.len() > before;
                }
            }
        }

        debug!(nonterminals = sets.len(), rounds, "built FOLLOW table");
        FollowTable { sets }
    }

    pub fn get(&self, nonterminal: &NonTerminal) -> Option<&IndexSet<Terminal>> {
        self.sets.get(nonterminal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NonTerminal, &IndexSet<Terminal>)> {
        self.sets.iter()
    }
}
