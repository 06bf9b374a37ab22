mod error;
mod lr1;
mod syntax;
mod token;
mod tokenizer;

pub use crate::error::{ConflictKind, GrammarError, ParseError, TokenizerError};
pub use crate::lr1::*;
pub use crate::syntax::{NodePredicate, NodeValue, Selection, SyntaxNode, TokenSelector};
pub use crate::token::Token;
pub use crate::tokenizer::{Category, Tokenizer};
