use tracing::trace;

use crate::{
    Action, ActionTable, Automaton, FirstTable, FollowTable, Grammar, GrammarError,
    GrammarOptions, ParseError, Symbol, SyntaxNode, Token,
};

/// Table-driven LR(1) parser
///
/// All tables are built once by [`LR1Parser::new`] and never change afterwards, so one parser
/// can be shared between threads parsing independent inputs.
#[derive(Debug, Clone)]
pub struct LR1Parser {
    grammar: Grammar,
    first: FirstTable,
    follow: FollowTable,
    automaton: Automaton,
    actions: ActionTable,
}

#[derive(Debug)]
struct StackElem {
    state: usize,
    node: Option<SyntaxNode>,
}

impl LR1Parser {
    /// Compile `rules` and build the FIRST, FOLLOW, automaton and ACTION/GOTO tables
    pub fn new<I, L, R>(rules: I, options: &GrammarOptions) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        Self::from_grammar(Grammar::new(rules, options)?)
    }

    pub fn from_grammar(grammar: Grammar) -> Result<Self, GrammarError> {
        let first = FirstTable::build(&grammar);
        let follow = FollowTable::build(&grammar, &first);
        let automaton = Automaton::build(&grammar, &first, &follow);
        let actions = ActionTable::build(&grammar, &automaton)?;
        Ok(LR1Parser {
            grammar,
            first,
            follow,
            automaton,
            actions,
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn first(&self) -> &FirstTable {
        &self.first
    }

    pub fn follow(&self) -> &FollowTable {
        &self.follow
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// Parse a token sequence into a syntax tree
    ///
    /// An end token is appended unless the last token already carries the end marker.
    pub fn parse_tokens(&self, tokens: &[Token]) -> Result<SyntaxNode, ParseError> {
        let end_name = self.grammar.end().name();
        let end_token = match tokens.last() {
            Some(last) if last.category() == Some(end_name) => None,
            Some(last) => Some(Token::new(
                Some(end_name),
                end_name,
                last.end_line(),
                last.column + last.text.chars().count(),
            )),
            None => Some(Token::new(Some(end_name), end_name, 1, 1)),
        };
        // Never empty, the last element is always the end token
        let input: Vec<&Token> = tokens.iter().chain(end_token.iter()).collect();
        let mut pos = 0;

        let mut stack: Vec<StackElem> = vec![StackElem {
            state: 0,
            node: None,
        }];

        loop {
            let state = match stack.last() {
                Some(top) => top.state,
                None => return Err(ParseError::StackUnderflow { state: 0, rule: 0 }),
            };
            let token = *input
                .get(pos)
                .ok_or(ParseError::InputOverrun { state })?;
            // The end token only ever matches the end marker cell itself
            let at_end = pos + 1 == input.len();
            let action = if at_end {
                self.actions
                    .get(state, &Symbol::Terminal(self.grammar.end().clone()))
            } else {
                token
                    .category()
                    .and_then(|category| self.actions.lookup_terminal(state, category))
                    .map(|(_, action)| action)
            };

            match action {
                Some(Action::Shift(_)) if at_end => {
                    return Err(ParseError::UnexpectedToken {
                        state,
                        token: token.clone(),
                    })
                }
                Some(Action::Shift(target)) => {
                    trace!(state, target, token = %token, "shift");
                    stack.push(StackElem {
                        state: target,
                        node: Some(SyntaxNode::leaf(token.clone())),
                    });
                    pos += 1;
                }
                Some(Action::Reduce(rule_idx)) => {
                    let rule = self.grammar.rule(rule_idx);
                    let to_be_popped = rule.reduce_len(self.grammar.epsilon());
                    // The bottom element seeded with state 0 is never popped
                    if to_be_popped >= stack.len() {
                        return Err(ParseError::StackUnderflow {
                            state,
                            rule: rule_idx,
                        });
                    }
                    let children: Vec<SyntaxNode> = stack
                        .drain((stack.len() - to_be_popped)..)
                        .filter_map(|stack_elem| stack_elem.node)
                        .collect();

                    let top = stack.last().map_or(0, |stack_elem| stack_elem.state);
                    let target = self.actions.goto(top, &rule.lhs).ok_or_else(|| {
                        ParseError::MissingGoto {
                            state: top,
                            nonterminal: rule.lhs.name().to_owned(),
                        }
                    })?;
                    trace!(state, rule = %rule, target, "reduce");

                    stack.push(StackElem {
                        state: target,
                        node: Some(SyntaxNode::interior(rule.lhs.name(), children)),
                    });
                }
                Some(Action::Accept) => {
                    if let Some(&rest) = input.get(pos + 1) {
                        return Err(ParseError::UnexpectedToken {
                            state,
                            token: rest.clone(),
                        });
                    }
                    trace!(state, "accept");
                    // The stack holds the bottom element and the tree of the start symbol
                    return stack
                        .pop()
                        .and_then(|stack_elem| stack_elem.node)
                        .ok_or(ParseError::EmptyAccept { state });
                }
                Some(Action::Goto(_)) => return Err(ParseError::UnexpectedGoto { state }),
                None => {
                    return Err(ParseError::UnexpectedToken {
                        state,
                        token: token.clone(),
                    })
                }
            }
        }
    }

    /// Parse whitespace-separated raw symbols, each being its own category
    ///
    /// Columns count symbols rather than characters.
    pub fn parse_symbols(&self, input: &str) -> Result<SyntaxNode, ParseError> {
        let tokens: Vec<Token> = input
            .split_whitespace()
            .enumerate()
            .map(|(idx, symbol)| Token::new(Some(symbol), symbol, 1, idx + 1))
            .collect();
        self.parse_tokens(&tokens)
    }

    /// Whether the raw symbols of `input` form a sentence of the grammar
    pub fn accepts(&self, input: &str) -> bool {
        self.parse_symbols(input).is_ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use matches::assert_matches;

    fn ab_parser() -> LR1Parser {
        LR1Parser::new(vec![("S", "a S b"), ("S", "")], &GrammarOptions::default()).unwrap()
    }

    #[test]
    fn test_nested_tree() {
        let tree = ab_parser().parse_symbols("a a b b").unwrap();
        assert_eq!(tree.name(), Some("S"));
        assert_eq!(tree.children().len(), 3);
        let inner = &tree.children()[1];
        assert_eq!(inner.name(), Some("S"));
        let innermost = &inner.children()[1];
        assert_eq!(innermost.name(), Some("S"));
        assert!(innermost.children().is_empty());
        let texts: Vec<&str> = tree.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "a", "b", "b"]);
    }

    #[test]
    fn test_explicit_end_marker() {
        let parser = ab_parser();
        assert!(parser.accepts("a a b b $"));
        assert!(parser.accepts(""));
        assert!(parser.accepts("$"));
    }

    #[test]
    fn test_rejects_unbalanced_input() {
        let parser = ab_parser();
        assert_matches!(
            parser.parse_symbols("a b b"),
            Err(ParseError::UnexpectedToken { ref token, .. }) if token.text == "b" && token.column == 3
        );
        assert_matches!(
            parser.parse_symbols("a a b"),
            Err(ParseError::UnexpectedToken { ref token, .. }) if token.text == "$"
        );
        assert!(!parser.accepts("b"));
    }

    #[test]
    fn test_unclassified_token_rejected() {
        let parser = ab_parser();
        let tokens = vec![
            Token::new(Some("a"), "a", 1, 1),
            Token::new(None, "?", 1, 3),
            Token::new(Some("b"), "b", 1, 5),
        ];
        let err = parser.parse_tokens(&tokens).unwrap_err();
        assert!(!err.is_internal());
        assert_matches!(err, ParseError::UnexpectedToken { ref token, .. } if token.category.is_none());
    }

    #[test]
    fn test_end_token_never_matches_regex_terminal() {
        let parser =
            LR1Parser::new(vec![("S", r#""[a-z$]+""#)], &GrammarOptions::default()).unwrap();
        assert_matches!(
            parser.parse_symbols(""),
            Err(ParseError::UnexpectedToken { state: 0, ref token }) if token.text == "$"
        );
        assert!(parser.accepts("abc"));
        assert!(parser.accepts("abc $"));
        // A `$` category inside the input is an ordinary token
        let tree = parser.parse_symbols("a$ $").unwrap();
        assert_eq!(tree.tokens()[0].text, "a$");
    }

    #[test]
    fn test_end_token_position() {
        let parser = ab_parser();
        let tokens = vec![Token::new(Some("a"), "a", 2, 4)];
        assert_matches!(
            parser.parse_tokens(&tokens),
            Err(ParseError::UnexpectedToken { ref token, .. }) if (token.line, token.column) == (2, 5)
        );
    }

    #[test]
    fn test_regex_terminals() {
        let parser = LR1Parser::new(
            vec![
                ("ROW", r#"KEY "\d+" "[a-z]+""#),
                ("KEY", "key"),
            ],
            &GrammarOptions::default(),
        )
        .unwrap();
        let tokens = vec![
            Token::new(Some("key"), "key", 1, 1),
            Token::new(Some("123"), "123", 1, 5),
            Token::new(Some("abc"), "abc", 1, 9),
        ];
        let tree = parser.parse_tokens(&tokens).unwrap();
        assert_eq!(tree.name(), Some("ROW"));
        assert_eq!(tree.children()[0].name(), Some("KEY"));
        assert!(parser.parse_symbols("key abc 123").is_err());
    }

    #[test]
    fn test_left_recursion() {
        let parser = LR1Parser::new(
            vec![("E", "E + B"), ("E", "B"), ("B", "0"), ("B", "1")],
            &GrammarOptions::default(),
        )
        .unwrap();
        let tree = parser.parse_symbols("1 + 0 + 1").unwrap();
        assert_eq!(tree.children().len(), 3);
        assert_eq!(tree.children()[0].children().len(), 3);
        assert!(!parser.accepts("1 +"));
        assert!(!parser.accepts("+ 1"));
    }

    #[test]
    fn test_parser_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LR1Parser>();

        let parser = ab_parser();
        let inputs = ["a b", "a a b b", "a b b"];
        let results: Vec<bool> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|input| {
                    let parser = &parser;
                    scope.spawn(move || parser.accepts(input))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results, vec![true, true, false]);
    }
}
