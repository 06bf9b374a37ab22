use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Switches for the document checks of [`crate::validate`]
///
/// Read from flat `name=true|false` lines. Names and values are case insensitive, lines with
/// other values are ignored and checks that are not mentioned stay enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// The header must be the only token on the first line
    pub header: bool,
    /// The EOF marker must be the only token on the last line
    pub eof: bool,
    /// Every token must belong to a category
    pub unclassified: bool,
    /// The tokens must form a sentence of the grammar
    pub syntax: bool,
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("cannot read options file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl Default for Options {
    fn default() -> Self {
        Options {
            header: true,
            eof: true,
            unclassified: true,
            syntax: true,
        }
    }
}

impl Options {
    pub fn parse(text: &str) -> Self {
        let mut options = Options::default();
        for line in text.lines() {
            let mut parts = line.splitn(2, '=');
            let (name, value) = match (parts.next(), parts.next()) {
                (Some(name), Some(value)) => (name.trim().to_lowercase(), value.trim()),
                _ => continue,
            };
            let value = if value.eq_ignore_ascii_case("true") {
                true
            } else if value.eq_ignore_ascii_case("false") {
                false
            } else {
                continue;
            };
            match name.as_str() {
                "header" => options.header = value,
                "eof" => options.eof = value,
                "unclassified" => options.unclassified = value,
                "syntax" => options.syntax = value,
                _ => debug!(option = %name, "ignoring unknown option"),
            }
        }
        options
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Options::parse(&text))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_defaults_enabled() {
        assert_eq!(Options::parse(""), Options::default());
        assert!(Options::default().syntax);
    }

    #[test]
    fn test_parse_flags() {
        let options = Options::parse("Header=FALSE\r\nsyntax=false\neof=maybe\nunknown=true\nno separator\n");
        assert!(!options.header);
        assert!(!options.syntax);
        assert!(options.eof);
        assert!(options.unclassified);
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "unclassified=false").unwrap();
        let options = Options::load(file.path()).unwrap();
        assert!(!options.unclassified);

        assert_matches!(
            Options::load("/nonexistent/spdf.options"),
            Err(OptionsError::Io { .. })
        );
    }
}
