use std::fmt;

use thiserror::Error;

use crate::{Action, Symbol, Token};

/// Failure while compiling a grammar into parse tables
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("grammar has no rules")]
    EmptyGrammar,
    #[error("rule {rule} has an empty left-hand side")]
    EmptyLhs { rule: usize },
    #[error("rule {rule} cannot be read: {message}")]
    Notation { rule: usize, message: String },
    #[error("start symbol {0} is not the left-hand side of any rule")]
    UnknownStartSymbol(String),
    #[error("augmented start symbol {0} is already used by the grammar")]
    AugmentedStartCollision(String),
    #[error("end marker {0} is already used as a terminal")]
    EndMarkerCollision(String),
    #[error("invalid terminal pattern {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("{kind} conflict in state {state} on {symbol}: {existing} vs. {incoming}")]
    Conflict {
        state: usize,
        symbol: Symbol,
        kind: ConflictKind,
        existing: Action,
        incoming: Action,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            ConflictKind::ShiftReduce => write!(f, "shift-reduce"),
            ConflictKind::ReduceReduce => write!(f, "reduce-reduce"),
        }
    }
}

/// Failure while running the parsing engine over a token sequence
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected {token} in state {state}")]
    UnexpectedToken { state: usize, token: Token },
    #[error("input exhausted in state {state}")]
    InputOverrun { state: usize },
    #[error("goto entry reached on token input in state {state}")]
    UnexpectedGoto { state: usize },
    #[error("no goto entry for {nonterminal} in state {state}")]
    MissingGoto { state: usize, nonterminal: String },
    #[error("stack underflow reducing rule {rule} in state {state}")]
    StackUnderflow { state: usize, rule: usize },
    #[error("accepted in state {state} without a syntax tree")]
    EmptyAccept { state: usize },
}

impl ParseError {
    /// Errors that point at a malformed parse table rather than a malformed input
    pub fn is_internal(&self) -> bool {
        match self {
            ParseError::UnexpectedToken { .. } => false,
            ParseError::InputOverrun { .. }
            | ParseError::UnexpectedGoto { .. }
            | ParseError::MissingGoto { .. }
            | ParseError::StackUnderflow { .. }
            | ParseError::EmptyAccept { .. } => true,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("invalid pattern for category {category}: {source}")]
    InvalidPattern {
        category: String,
        #[source]
        source: regex::Error,
    },
    #[error("opaque category {0} is not declared")]
    UnknownOpaqueCategory(String),
}
