use spdf::{GrammarOptions, LR1Parser, Token};

/// Balanced `a^n b^n`
pub const AB_RULES: &[(&str, &str)] = &[("S", "a S b"), ("S", "")];

pub fn ab_parser() -> LR1Parser {
    LR1Parser::new(AB_RULES.iter().cloned(), &GrammarOptions::default())
        .expect("the a^n b^n grammar is LR(1)")
}

/// One token per character of `input`, whitespace skipped
pub fn ab_tokens(input: &str) -> Vec<Token> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(idx, c)| {
            let text = c.to_string();
            Token::new(Some(&text), &text, 1, idx + 1)
        })
        .collect()
}
