#![cfg(test)]

use lazy_static::lazy_static;
use matches::assert_matches;
use spdf::{LR1Parser, ParseError, Token, Tokenizer};
use test_utils::{ab_parser, ab_tokens, MINIMAL_DOCUMENT, STREAM_DOCUMENT};

lazy_static! {
    static ref SPDF_PARSER: LR1Parser = spdf::parser().unwrap();
    static ref SPDF_TOKENIZER: Tokenizer = spdf::tokenizer().unwrap();
}

#[test]
fn test_unknown_terminals() {
    let result = ab_parser().parse_tokens(&ab_tokens("b"));
    assert_matches!(
        result,
        Err(ParseError::UnexpectedToken { state: 0, ref token }) if token.text == "b"
    );
}

#[test]
fn test_unclassified_token() {
    let mut tokens = ab_tokens("ab");
    tokens.insert(1, Token::new(None, "a", 1, 2));
    let err = ab_parser().parse_tokens(&tokens).unwrap_err();
    assert!(!err.is_internal());
    assert_matches!(err, ParseError::UnexpectedToken { ref token, .. } if token.is_unclassified());
}

#[test]
fn test_spdf_documents_accepted() {
    for document in [MINIMAL_DOCUMENT, STREAM_DOCUMENT].iter() {
        let tokens = SPDF_TOKENIZER.tokenize(document);
        assert!(tokens.iter().all(|t| !t.is_unclassified()));
        let tree = SPDF_PARSER.parse_tokens(&tokens).unwrap();
        assert_eq!(tree.tokens().len(), tokens.len());
    }
}

#[test]
fn test_stream_content_is_opaque() {
    let tokens = SPDF_TOKENIZER.tokenize(STREAM_DOCUMENT);
    let eof_markers = tokens
        .iter()
        .filter(|t| t.category() == Some("MARGIN__EOF"))
        .count();
    assert_eq!(eof_markers, 1);
    let stream = tokens
        .iter()
        .position(|t| t.category() == Some("STREAM_BLOCK"))
        .unwrap();
    assert_eq!(tokens[stream + 1].category(), Some("KEYWORD__ENDOBJ"));
    assert_eq!(tokens[stream].line, 5);
    assert_eq!(tokens[stream + 1].line, tokens[stream].end_line() + 1);
}

#[test]
fn test_wrong_category_rejected() {
    // A reference where an object number is expected
    let document = MINIMAL_DOCUMENT.replace("2 0 obj", "2 0 R obj");
    let tokens = SPDF_TOKENIZER.tokenize(&document);
    assert_matches!(
        SPDF_PARSER.parse_tokens(&tokens),
        Err(ParseError::UnexpectedToken { ref token, .. })
            if token.category() == Some("REFERENCE") && token.line == 5
    );
}

#[test]
fn test_unclassified_document_token() {
    let document = MINIMAL_DOCUMENT.replace("/Catalog", "Catalog");
    let tokens = SPDF_TOKENIZER.tokenize(&document);
    let unclassified: Vec<&Token> = tokens.iter().filter(|t| t.is_unclassified()).collect();
    assert_eq!(unclassified.len(), 1);
    assert_eq!((unclassified[0].line, unclassified[0].column), (3, 10));
    assert_matches!(
        SPDF_PARSER.parse_tokens(&tokens),
        Err(ParseError::UnexpectedToken { ref token, .. }) if token.is_unclassified()
    );
}

#[test]
fn test_truncated_document() {
    let document = MINIMAL_DOCUMENT.replace("%%EOF\n", "");
    let tokens = SPDF_TOKENIZER.tokenize(&document);
    assert_matches!(
        SPDF_PARSER.parse_tokens(&tokens),
        Err(ParseError::UnexpectedToken { ref token, .. }) if token.text == "$"
    );
}
