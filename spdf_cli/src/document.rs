use std::error::Error;
use std::fs;

use spdf::{Options, Validator};
use thiserror::Error;
use tracing::info;

use crate::grammar;

#[derive(Debug, Error)]
#[error("{invalid} of {total} documents are invalid")]
pub struct CheckFailed {
    invalid: usize,
    total: usize,
}

/// Read a document, replacing invalid UTF-8
fn read_document(filename: &str) -> Result<String, Box<dyn Error>> {
    let bytes = fs::read(filename)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn print_tokens(filename: &str) -> Result<(), Box<dyn Error>> {
    let text = read_document(filename)?;
    let tokenizer = spdf::tokenizer()?;
    for token in tokenizer.tokenize(&text) {
        println!("{}", token);
    }
    Ok(())
}

pub fn print_tree(filename: &str, grammar_filename: Option<&str>) -> Result<(), Box<dyn Error>> {
    let text = read_document(filename)?;
    let tokens = spdf::tokenizer()?.tokenize(&text);
    let parser = grammar::load_parser(grammar_filename)?;
    let tree = parser.parse_tokens(&tokens)?;
    print!("{}", tree);
    Ok(())
}

/// Validate every document, reporting each one, and fail if any of them is invalid
pub fn check(filenames: &[&str], options_filename: Option<&str>) -> Result<(), Box<dyn Error>> {
    let options = match options_filename {
        Some(filename) => Options::load(filename)?,
        None => Options::default(),
    };
    let validator = Validator::new()?;

    let mut invalid = 0;
    for filename in filenames {
        let text = match read_document(filename) {
            Ok(text) => text,
            Err(err) => {
                println!("[ERROR] {}: {}", filename, err);
                invalid += 1;
                continue;
            }
        };
        let report = validator.validate(&text, &options);
        if report.is_valid() {
            println!("[OK] {}", filename);
        } else {
            invalid += 1;
            println!("[ERROR] {}", filename);
            for diagnostic in report.diagnostics.iter() {
                println!("    + {}", diagnostic);
            }
        }
    }

    info!(documents = filenames.len(), invalid, "checked documents");
    if invalid > 0 {
        return Err(Box::new(CheckFailed {
            invalid,
            total: filenames.len(),
        }));
    }
    Ok(())
}
