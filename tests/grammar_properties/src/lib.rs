#![cfg(test)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use spdf::{closure, goto, GrammarOptions, LR1Parser, Symbol, Terminal};
use test_utils::{ab_parser, AB_RULES};

const EXPRESSION_RULES: &[(&str, &str)] = &[
    ("E", "E + T"),
    ("E", "T"),
    ("T", "T * F"),
    ("T", "F"),
    ("F", "( E )"),
    ("F", "OPT id"),
    ("OPT", "-"),
    ("OPT", ""),
];

fn names<'t, I: IntoIterator<Item = &'t Terminal>>(terminals: I) -> BTreeSet<String> {
    terminals.into_iter().map(|t| t.name().to_owned()).collect()
}

fn sets(parser: &LR1Parser) -> Vec<(String, BTreeSet<String>, BTreeSet<String>)> {
    let grammar = parser.grammar();
    let mut sets: Vec<_> = grammar
        .nonterminals()
        .iter()
        .map(|n| {
            (
                n.name().to_owned(),
                names(parser.first().get(n).into_iter().flatten()),
                names(parser.follow().get(n).into_iter().flatten()),
            )
        })
        .collect();
    sets.sort();
    sets
}

fn balanced(depth: usize) -> String {
    let mut symbols = vec!["a"; depth];
    symbols.extend(vec!["b"; depth]);
    symbols.join(" ")
}

fn expression_rules() -> impl Strategy<Value = Vec<(&'static str, &'static str)>> {
    // The first rule names the start symbol and stays in place
    Just(EXPRESSION_RULES[1..].to_vec())
        .prop_shuffle()
        .prop_map(|mut rules| {
            rules.insert(0, EXPRESSION_RULES[0]);
            rules
        })
}

#[test]
fn test_follow_of_augmented_start() {
    for rules in [AB_RULES, EXPRESSION_RULES].iter() {
        let parser = LR1Parser::new(rules.iter().cloned(), &GrammarOptions::default()).unwrap();
        let grammar = parser.grammar();
        let follow = parser.follow().get(grammar.augmented_start()).unwrap();
        assert_eq!(names(follow), names(vec![grammar.end()]));
    }
}

proptest! {
    #[test]
    fn first_and_follow_ignore_rule_order(rules in expression_rules()) {
        let reference = LR1Parser::new(EXPRESSION_RULES.iter().cloned(), &GrammarOptions::default()).unwrap();
        let shuffled = LR1Parser::new(rules, &GrammarOptions::default()).unwrap();
        prop_assert_eq!(sets(&reference), sets(&shuffled));
        prop_assert_eq!(reference.automaton().len(), shuffled.automaton().len());
    }

    #[test]
    fn balanced_input_accepted(depth in 0usize..40) {
        prop_assert!(ab_parser().accepts(&balanced(depth)));
    }

    #[test]
    fn corrupted_input_rejected(depth in 1usize..40, idx in any::<prop::sample::Index>()) {
        let input = balanced(depth);
        let mut symbols: Vec<&str> = input.split(' ').collect();
        let idx = idx.index(symbols.len());
        symbols[idx] = if symbols[idx] == "a" { "b" } else { "a" };
        prop_assert!(!ab_parser().accepts(&symbols.join(" ")));
    }

    #[test]
    fn closure_is_idempotent(state in 0usize..64) {
        let parser = LR1Parser::new(EXPRESSION_RULES.iter().cloned(), &GrammarOptions::default()).unwrap();
        let automaton = parser.automaton();
        let items = automaton.state(state % automaton.len()).item_set();
        let closed = closure(parser.grammar(), parser.first(), items.clone());
        prop_assert_eq!(closure(parser.grammar(), parser.first(), closed.clone()), closed.clone());
        prop_assert_eq!(closed, items);
    }

    #[test]
    fn goto_empty_iff_no_item_expects_symbol(state in 0usize..64, symbol in 0usize..16) {
        let parser = LR1Parser::new(EXPRESSION_RULES.iter().cloned(), &GrammarOptions::default()).unwrap();
        let grammar = parser.grammar();
        let automaton = parser.automaton();
        let items = automaton.state(state % automaton.len()).item_set();
        let alphabet: Vec<Symbol> = grammar
            .terminals()
            .iter()
            .cloned()
            .map(Symbol::Terminal)
            .chain(grammar.nonterminals().iter().cloned().map(Symbol::NonTerminal))
            .collect();
        let symbol = &alphabet[symbol % alphabet.len()];
        let expected = items
            .keys()
            .any(|core| grammar.rule(core.rule).rhs.get(core.pos) == Some(symbol));
        prop_assert_eq!(!goto(grammar, parser.first(), &items, symbol).is_empty(), expected);
    }
}
