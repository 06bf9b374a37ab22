use spdf_core::{GrammarError, GrammarOptions, LR1Parser, Tokenizer, TokenizerError};
use thiserror::Error;

/// Lexical categories of SPDF, highest priority first
pub const CATEGORIES: &[(&str, &str)] = &[
    ("MARGIN__HEADER", r"%SPDF-(\d+)\.(\d+)"),
    ("MARGIN__EOF", r"%%EOF"),
    ("STREAM_BLOCK", r"stream\s([\s\S]*?)\sendstream"),
    ("REFERENCE", r"(\d+)\s(\d+)\sR"),
    ("XREF_ELEMENT", r"(\d{10})\s(\d{5})\s[fn]"),
    ("COMMENT", r"%.*"),
    ("PUNCTUATOR__OPEN_ARRAY", r"\["),
    ("PUNCTUATOR__CLOSE_ARRAY", r"\]"),
    ("PUNCTUATOR__OPEN_CONTENT", r"<<"),
    ("PUNCTUATOR__CLOSE_CONTENT", r">>"),
    ("KEYWORD__OBJ", r"obj"),
    ("KEYWORD__ENDOBJ", r"endobj"),
    ("KEYWORD__TRAILER", r"trailer"),
    ("KEYWORD__XREF", r"xref"),
    ("KEYWORD__STARTXREF", r"startxref"),
    ("KEYWORD__BOOL", r"true|false"),
    ("KEYWORD__NULL", r"null"),
    ("LITERAL__FLOAT", r"[+-]?\d+\.\d+"),
    ("LITERAL__INTEGER", r"[+-]\d+"),
    ("LITERAL__UNSIGNED_INTEGER", r"\d+"),
    ("LITERAL__STRING", r"\([^)]*\)"),
    ("NAME", r"/[A-Z][a-zA-Z0-9]*"),
];

/// Category whose matches are taken verbatim, without scanning their content
pub const OPAQUE_CATEGORY: &str = "STREAM_BLOCK";

/// SPDF grammar, the first rule names the start symbol
///
/// Terminals are the category names of [`CATEGORIES`].
pub const GRAMMAR: &[(&str, &str)] = &[
    ("START", "MARGIN__HEADER EXPRS EXPR__XREF EXPR__TRAILER MARGIN__EOF"),
    // Expressions
    ("EXPRS", "EXPRS EXPR"),
    ("EXPRS", ""),
    ("EXPR", "EXPR__COMMENT"),
    ("EXPR", "EXPR__OBJ"),
    ("EXPR__COMMENT", "COMMENT"),
    (
        "EXPR__OBJ",
        "LITERAL__UNSIGNED_INTEGER LITERAL__UNSIGNED_INTEGER KEYWORD__OBJ STRUCT__CONTENT KEYWORD__ENDOBJ",
    ),
    (
        "EXPR__OBJ",
        "LITERAL__UNSIGNED_INTEGER LITERAL__UNSIGNED_INTEGER KEYWORD__OBJ STRUCT__CONTENT STREAM_BLOCK KEYWORD__ENDOBJ",
    ),
    (
        "EXPR__XREF",
        "KEYWORD__XREF LITERAL__UNSIGNED_INTEGER LITERAL__UNSIGNED_INTEGER STRUCT__XREF_ELEMENTS",
    ),
    (
        "EXPR__TRAILER",
        "KEYWORD__TRAILER STRUCT__CONTENT KEYWORD__STARTXREF LITERAL__UNSIGNED_INTEGER",
    ),
    // Structures
    (
        "STRUCT__CONTENT",
        "PUNCTUATOR__OPEN_CONTENT STRUCT__DICT_PAIRS PUNCTUATOR__CLOSE_CONTENT",
    ),
    ("STRUCT__DICT_PAIRS", "STRUCT__DICT_PAIRS STRUCT__DICT_PAIR"),
    ("STRUCT__DICT_PAIRS", ""),
    ("STRUCT__DICT_PAIR", "NAME VALUE__DICT"),
    (
        "STRUCT__ARRAY",
        "PUNCTUATOR__OPEN_ARRAY STRUCT__ARRAY_ELEMENTS PUNCTUATOR__CLOSE_ARRAY",
    ),
    ("STRUCT__ARRAY_ELEMENTS", "STRUCT__ARRAY_ELEMENTS STRUCT__ARRAY_ELEMENT"),
    ("STRUCT__ARRAY_ELEMENTS", ""),
    ("STRUCT__ARRAY_ELEMENT", "VALUE__ARRAY"),
    ("STRUCT__XREF_ELEMENTS", "STRUCT__XREF_ELEMENTS STRUCT__XREF_ELEMENT"),
    ("STRUCT__XREF_ELEMENTS", ""),
    ("STRUCT__XREF_ELEMENT", "XREF_ELEMENT"),
    // Values
    ("VALUE__DICT", "STRUCT__CONTENT"),
    ("VALUE__DICT", "STRUCT__ARRAY"),
    ("VALUE__DICT", "REFERENCE"),
    ("VALUE__DICT", "KEYWORD__BOOL"),
    ("VALUE__DICT", "KEYWORD__NULL"),
    ("VALUE__DICT", "LITERAL__FLOAT"),
    ("VALUE__DICT", "LITERAL__INTEGER"),
    ("VALUE__DICT", "LITERAL__UNSIGNED_INTEGER"),
    ("VALUE__DICT", "LITERAL__STRING"),
    ("VALUE__DICT", "NAME"),
    // Arrays do not nest
    ("VALUE__ARRAY", "STRUCT__CONTENT"),
    ("VALUE__ARRAY", "REFERENCE"),
    ("VALUE__ARRAY", "KEYWORD__BOOL"),
    ("VALUE__ARRAY", "KEYWORD__NULL"),
    ("VALUE__ARRAY", "LITERAL__FLOAT"),
    ("VALUE__ARRAY", "LITERAL__INTEGER"),
    ("VALUE__ARRAY", "LITERAL__UNSIGNED_INTEGER"),
    ("VALUE__ARRAY", "LITERAL__STRING"),
    ("VALUE__ARRAY", "NAME"),
];

/// Failure while building the SPDF language
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("invalid SPDF grammar: {0}")]
    Grammar(#[from] GrammarError),
    #[error("invalid SPDF categories: {0}")]
    Tokenizer(#[from] TokenizerError),
}

/// Tokenizer for the SPDF categories
pub fn tokenizer() -> Result<Tokenizer, TokenizerError> {
    Tokenizer::new(CATEGORIES.iter().cloned(), Some(OPAQUE_CATEGORY))
}

/// Parser for the SPDF grammar
pub fn parser() -> Result<LR1Parser, GrammarError> {
    LR1Parser::new(GRAMMAR.iter().cloned(), &GrammarOptions::default())
}
