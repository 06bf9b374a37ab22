use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::lr1::notation;
use crate::{GrammarError, NonTerminal, Rule, Symbol, Terminal};

/// Marker for the empty right-hand side
pub const EPSILON: &str = "ε";

/// Options of the grammar compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarOptions {
    /// Start symbol, defaults to the left-hand side of the first rule
    pub start_symbol: Option<String>,
    /// Name of the terminal marking the end of the input
    pub end_marker: String,
    /// Character enclosing terminals that are regexes rather than literals
    pub regex_marker: char,
}

impl Default for GrammarOptions {
    fn default() -> Self {
        GrammarOptions {
            start_symbol: None,
            end_marker: "$".to_owned(),
            regex_marker: '"',
        }
    }
}

/// Compiled grammar
///
/// Rule 0 is always the augmented start rule `S' -> S`. The grammar never changes after it has
/// been built.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: NonTerminal,
    augmented_start: NonTerminal,
    end: Terminal,
    epsilon: Terminal,
    rules: Vec<Rule>,
    rules_by_lhs: IndexMap<NonTerminal, Vec<usize>>,
    terminals: IndexSet<Terminal>,
    nonterminals: IndexSet<NonTerminal>,
}

impl Grammar {
    /// Compile textual `(lhs, rhs)` rules
    ///
    /// A symbol is a nonterminal iff some rule has it as its left-hand side. Every other symbol is
    /// a terminal, matched literally unless it is enclosed in `options.regex_marker`.
    pub fn new<I, L, R>(rules: I, options: &GrammarOptions) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let raw_rules: Vec<(String, String)> = rules
            .into_iter()
            .map(|(lhs, rhs)| (lhs.as_ref().trim().to_owned(), rhs.as_ref().to_owned()))
            .collect();
        if raw_rules.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }
        if let Some(rule) = raw_rules.iter().position(|(lhs, _)| lhs.is_empty()) {
            return Err(GrammarError::EmptyLhs { rule });
        }

        let user_nonterminals: IndexSet<NonTerminal> = raw_rules
            .iter()
            .map(|(lhs, _)| NonTerminal::new(lhs))
            .collect();

        let start = match &options.start_symbol {
            Some(name) => NonTerminal::new(name),
            None => NonTerminal::new(&raw_rules[0].0),
        };
        if !user_nonterminals.contains(&start) {
            return Err(GrammarError::UnknownStartSymbol(start.name().to_owned()));
        }
        let augmented_start = NonTerminal::new(&format!("{}'", start));
        let epsilon = Terminal::literal(EPSILON);
        let end = Terminal::literal(&options.end_marker);

        let mut rules = vec![Rule {
            lhs: augmented_start.clone(),
            rhs: vec![Symbol::NonTerminal(start.clone())],
        }];
        let mut terminals = IndexSet::new();

        for (idx, (lhs, rhs)) in raw_rules.iter().enumerate() {
            let raw_symbols = notation::parse_rule_side(rhs, options.regex_marker)
                .map_err(|message| GrammarError::Notation { rule: idx, message })?;

            let mut symbols = Vec::new();
            for raw in raw_symbols {
                if !raw.is_regex && raw.name == EPSILON {
                    continue;
                }
                let candidate = NonTerminal::new(&raw.name);
                if !raw.is_regex && user_nonterminals.contains(&candidate) {
                    symbols.push(Symbol::NonTerminal(candidate));
                } else {
                    let terminal = if raw.is_regex {
                        Terminal::regex(&raw.name)?
                    } else {
                        Terminal::literal(&raw.name)
                    };
                    // The first declaration of a terminal decides its pattern
                    let (idx, _) = terminals.insert_full(terminal);
                    symbols.push(Symbol::Terminal(terminals[idx].clone()));
                }
            }
            if symbols.is_empty() {
                symbols.push(Symbol::Terminal(epsilon.clone()));
            }

            rules.push(Rule {
                lhs: NonTerminal::new(lhs),
                rhs: symbols,
            });
        }

        let augmented_name = augmented_start.name();
        if user_nonterminals.contains(&augmented_start)
            || terminals.iter().any(|t| t.name() == augmented_name)
        {
            return Err(GrammarError::AugmentedStartCollision(
                augmented_name.to_owned(),
            ));
        }
        if terminals.contains(&end) {
            return Err(GrammarError::EndMarkerCollision(end.name().to_owned()));
        }
        terminals.insert(end.clone());

        let mut nonterminals = IndexSet::new();
        nonterminals.insert(augmented_start.clone());
        nonterminals.extend(user_nonterminals);

        let mut rules_by_lhs: IndexMap<NonTerminal, Vec<usize>> = IndexMap::new();
        for (idx, rule) in rules.iter().enumerate() {
            rules_by_lhs.entry(rule.lhs.clone()).or_default().push(idx);
        }

        debug!(
            rules = rules.len(),
            terminals = terminals.len(),
            nonterminals = nonterminals.len(),
            "compiled grammar"
        );

        Ok(Grammar {
            start,
            augmented_start,
            end,
            epsilon,
            rules,
            rules_by_lhs,
            terminals,
            nonterminals,
        })
    }

    pub fn start(&self) -> &NonTerminal {
        &self.start
    }

    pub fn augmented_start(&self) -> &NonTerminal {
        &self.augmented_start
    }

    pub fn end(&self) -> &Terminal {
        &self.end
    }

    pub fn epsilon(&self) -> &Terminal {
        &self.epsilon
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, idx: usize) -> &Rule {
        &self.rules[idx]
    }

    /// Rules (with their indices) having `lhs` as left-hand side
    pub fn rules_for<'g>(
        &'g self,
        lhs: &NonTerminal,
    ) -> impl Iterator<Item = (usize, &'g Rule)> + 'g {
        self.rules_by_lhs
            .get(lhs)
            .map(|indices| indices.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&idx| (idx, &self.rules[idx]))
    }

    /// Terminal alphabet in order of first appearance, end marker last
    pub fn terminals(&self) -> &IndexSet<Terminal> {
        &self.terminals
    }

    /// Nonterminal alphabet, augmented start symbol first
    pub fn nonterminals(&self) -> &IndexSet<NonTerminal> {
        &self.nonterminals
    }

    pub fn is_epsilon(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Terminal(t) => *t == self.epsilon,
            Symbol::NonTerminal(_) => false,
        }
    }
}
