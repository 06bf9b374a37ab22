use std::fmt;

use spdf_core::{LR1Parser, ParseError, SyntaxNode, Token, Tokenizer};
use tracing::{debug, warn};

use crate::{LanguageError, Options};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    MissingHeader,
    MissingEof,
    Unclassified,
    Syntax,
}

/// Problem found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Position of the offending token, if there is one
    pub position: Option<(usize, usize)>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.position {
            Some((line, column)) => write!(f, "{}:{}: {}", line, column, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Outcome of validating one document
#[derive(Debug, Clone)]
pub struct Report {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    /// Syntax tree, if the syntax check ran and succeeded
    pub tree: Option<SyntaxNode>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Tokenizer and parser of a language, built once for many documents
#[derive(Debug, Clone)]
pub struct Validator {
    tokenizer: Tokenizer,
    parser: LR1Parser,
}

impl Validator {
    /// Validator for SPDF
    pub fn new() -> Result<Self, LanguageError> {
        Ok(Validator {
            tokenizer: crate::tokenizer()?,
            parser: crate::parser()?,
        })
    }

    pub fn with_language(tokenizer: Tokenizer, parser: LR1Parser) -> Self {
        Validator { tokenizer, parser }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn parser(&self) -> &LR1Parser {
        &self.parser
    }

    pub fn validate(&self, text: &str, options: &Options) -> Report {
        let tokens = self.tokenizer.tokenize(text);
        let mut diagnostics = Vec::new();

        if options.unclassified {
            for token in tokens.iter().filter(|t| t.is_unclassified()) {
                warn!(line = token.line, column = token.column, text = %token.text, "unclassified token");
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::Unclassified,
                    position: Some((token.line, token.column)),
                    message: format!("cannot classify {:?}", token.text),
                });
            }
        }

        let (has_header, has_eof) = margins(&tokens);
        if options.header && !has_header {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::MissingHeader,
                position: None,
                message: "header not found".to_owned(),
            });
        }
        if options.eof && !has_eof {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::MissingEof,
                position: None,
                message: "EOF not found".to_owned(),
            });
        }

        let tree = if options.syntax {
            match self.parser.parse_tokens(&tokens) {
                Ok(tree) => Some(tree),
                Err(err) => {
                    diagnostics.push(syntax_diagnostic(&err));
                    None
                }
            }
        } else {
            None
        };

        debug!(
            tokens = tokens.len(),
            diagnostics = diagnostics.len(),
            "validated document"
        );
        Report {
            tokens,
            diagnostics,
            tree,
        }
    }
}

/// Validate an SPDF document
pub fn validate(text: &str, options: &Options) -> Result<Report, LanguageError> {
    Ok(Validator::new()?.validate(text, options))
}

fn syntax_diagnostic(err: &ParseError) -> Diagnostic {
    let position = match err {
        ParseError::UnexpectedToken { token, .. } => Some((token.line, token.column)),
        _ => None,
    };
    Diagnostic {
        kind: DiagnosticKind::Syntax,
        position,
        message: err.to_string(),
    }
}

/// Whether the header is alone on the first line and the EOF marker alone on the last one
fn margins(tokens: &[Token]) -> (bool, bool) {
    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return (false, false),
    };
    let on_first_line = tokens
        .iter()
        .take_while(|t| t.line == first.line)
        .count();
    let on_last_line = tokens
        .iter()
        .rev()
        .take_while(|t| t.end_line() == last.end_line())
        .count();
    (
        on_first_line == 1 && first.category() == Some("MARGIN__HEADER"),
        on_last_line == 1 && last.category() == Some("MARGIN__EOF"),
    )
}
