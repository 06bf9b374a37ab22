mod grammar;
pub use self::grammar::{Grammar, GrammarOptions, EPSILON};

mod notation;

mod rule;
pub use self::rule::Rule;

mod symbol;
pub use self::symbol::{NonTerminal, Symbol, Terminal};

mod first;
pub use self::first::FirstTable;

mod follow;
pub use self::follow::FollowTable;

mod item;
pub use self::item::{Item, ItemCore, ItemSet, Lookahead};

mod state;
pub use self::state::{State, Transition};

mod automaton;
pub use self::automaton::{closure, goto, Automaton};

mod action;
pub use self::action::{Action, ActionTable};

mod parser;
pub use self::parser::LR1Parser;
