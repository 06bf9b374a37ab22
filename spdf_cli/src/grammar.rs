use std::error::Error;
use std::fs;

use spdf::{GrammarOptions, LR1Parser};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum GrammarFileError {
    #[error("line {line}: expected a rule of the form `LHS -> rhs`")]
    MissingArrow { line: usize },
}

/// Read rules written one per line as `LHS -> rhs`
///
/// Blank lines and lines starting with `#` are skipped.
pub fn read_rules(text: &str) -> Result<Vec<(String, String)>, GrammarFileError> {
    let mut rules = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut sides = line.splitn(2, "->");
        match (sides.next(), sides.next()) {
            (Some(lhs), Some(rhs)) => rules.push((lhs.trim().to_owned(), rhs.trim().to_owned())),
            _ => return Err(GrammarFileError::MissingArrow { line: idx + 1 }),
        }
    }
    Ok(rules)
}

/// Parser for the grammar in `filename`, or for SPDF if there is none
pub fn load_parser(filename: Option<&str>) -> Result<LR1Parser, Box<dyn Error>> {
    let parser = match filename {
        Some(filename) => {
            let rules = read_rules(&fs::read_to_string(filename)?)?;
            LR1Parser::new(rules, &GrammarOptions::default())?
        }
        None => spdf::parser()?,
    };
    info!(
        rules = parser.grammar().rules().len(),
        states = parser.automaton().len(),
        "built parser"
    );
    Ok(parser)
}
