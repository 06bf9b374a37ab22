mod language;
mod options;
mod validate;

pub use crate::language::{tokenizer, parser, LanguageError, CATEGORIES, GRAMMAR, OPAQUE_CATEGORY};
pub use crate::options::{Options, OptionsError};
pub use crate::validate::{validate, Diagnostic, DiagnosticKind, Report, Validator};

pub use spdf_core::*;
