use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;

use crate::GrammarError;

/// Grammar terminal
///
/// A terminal is identified by its name only. The pattern decides which token categories (or raw
/// symbol strings) the terminal accepts and is always matched against the whole input.
#[derive(Debug, Clone)]
pub struct Terminal {
    name: String,
    pattern: Pattern,
}

#[derive(Debug, Clone)]
enum Pattern {
    Literal,
    Regex(Regex),
}

impl Terminal {
    /// Terminal matching exactly its own name
    pub fn literal(name: &str) -> Self {
        Terminal {
            name: name.to_owned(),
            pattern: Pattern::Literal,
        }
    }

    /// Terminal matching every string the regex `pattern` matches as a whole
    pub fn regex(name: &str) -> Result<Self, GrammarError> {
        let pattern = Regex::new(&format!(r"\A(?:{})\z", name)).map_err(|source| {
            GrammarError::InvalidPattern {
                name: name.to_owned(),
                source,
            }
        })?;
        Ok(Terminal {
            name: name.to_owned(),
            pattern: Pattern::Regex(pattern),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_regex(&self) -> bool {
        match self.pattern {
            Pattern::Literal => false,
            Pattern::Regex(_) => true,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match &self.pattern {
            Pattern::Literal => self.name == category,
            Pattern::Regex(regex) => regex.is_match(category),
        }
    }
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Terminal) -> bool {
        self.name == other.name
    }
}

impl Eq for Terminal {}

impl Hash for Terminal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Terminal {
    fn partial_cmp(&self, other: &Terminal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Terminal {
    fn cmp(&self, other: &Terminal) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminal(String);

impl NonTerminal {
    pub fn new(name: &str) -> Self {
        NonTerminal(name.to_owned())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(t) => t.name(),
            Symbol::NonTerminal(n) => n.name(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            Symbol::Terminal(_) => true,
            Symbol::NonTerminal(_) => false,
        }
    }

    pub fn is_nonterminal(&self) -> bool {
        !self.is_terminal()
    }
}

impl From<Terminal> for Symbol {
    fn from(terminal: Terminal) -> Self {
        Symbol::Terminal(terminal)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(nonterminal: NonTerminal) -> Self {
        Symbol::NonTerminal(nonterminal)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::NonTerminal(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_identity_ignores_pattern() {
        let literal = Terminal::literal("a+");
        let regex = Terminal::regex("a+").unwrap();
        assert_eq!(literal, regex);
        assert!(literal.matches("a+"));
        assert!(!literal.matches("aa"));
        assert!(regex.matches("aaa"));
        assert!(!regex.matches("a+"));
    }

    #[test]
    fn test_full_match_only() {
        let t = Terminal::regex(r"\d+").unwrap();
        assert!(t.matches("123"));
        assert!(!t.matches("123x"));
        assert!(!t.matches("x123"));
    }

    #[test]
    fn test_variant_is_part_of_identity() {
        let t: Symbol = Terminal::literal("A").into();
        let n: Symbol = NonTerminal::new("A").into();
        assert_ne!(t, n);
    }
}
