use regex::Regex;
use tracing::{debug, trace};

use crate::{Token, TokenizerError};

/// Lexical category: a name and the regex matching it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub pattern: String,
}

/// Splits document text into tokens of priority-ordered lexical categories
///
/// All categories are tried at once through a single anchored alternation, so on a tie the
/// first declared category wins. One category may be declared opaque: its occurrences are
/// located before scanning and each becomes a single token, no matter what it contains.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    categories: Vec<Category>,
    combined: Regex,
    /// Capture group index of each category in `combined`, `None` for the opaque category
    groups: Vec<Option<usize>>,
    /// Each category anchored on its own, for retrying past zero-length matches
    anchored: Vec<Regex>,
    opaque: Option<(usize, Regex)>,
}

impl Tokenizer {
    pub fn new<I, N, P>(categories: I, opaque: Option<&str>) -> Result<Self, TokenizerError>
    where
        I: IntoIterator<Item = (N, P)>,
        N: AsRef<str>,
        P: AsRef<str>,
    {
        let categories: Vec<Category> = categories
            .into_iter()
            .map(|(name, pattern)| Category {
                name: name.as_ref().to_owned(),
                pattern: pattern.as_ref().to_owned(),
            })
            .collect();

        let mut compiled = Vec::with_capacity(categories.len());
        let mut anchored = Vec::with_capacity(categories.len());
        for category in categories.iter() {
            let invalid = |source| TokenizerError::InvalidPattern {
                category: category.name.clone(),
                source,
            };
            compiled.push(Regex::new(&category.pattern).map_err(invalid)?);
            anchored.push(Regex::new(&format!(r"\A(?:{})", category.pattern)).map_err(invalid)?);
        }

        let opaque = match opaque {
            Some(name) => {
                let idx = categories
                    .iter()
                    .position(|category| category.name == name)
                    .ok_or_else(|| TokenizerError::UnknownOpaqueCategory(name.to_owned()))?;
                Some((idx, compiled[idx].clone()))
            }
            None => None,
        };

        let alternatives: Vec<String> = categories
            .iter()
            .enumerate()
            .filter(|(idx, _)| opaque.as_ref().map_or(true, |(o, _)| o != idx))
            .map(|(idx, category)| format!("(?P<{}>{})", group_name(idx), category.pattern))
            .collect();
        let combined_pattern = format!(r"\A(?:{})", alternatives.join("|"));
        let combined = Regex::new(&combined_pattern).map_err(|source| {
            TokenizerError::InvalidPattern {
                category: categories
                    .iter()
                    .map(|category| category.name.as_str())
                    .collect::<Vec<_>>()
                    .join("|"),
                source,
            }
        })?;

        let names: Vec<Option<&str>> = combined.capture_names().collect();
        let groups = (0..categories.len())
            .map(|idx| {
                let name = group_name(idx);
                names.iter().position(|n| *n == Some(name.as_str()))
            })
            .collect();

        debug!(categories = categories.len(), "built tokenizer");
        Ok(Tokenizer {
            categories,
            combined,
            groups,
            anchored,
            opaque,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Name of the opaque category, if there is one
    pub fn opaque(&self) -> Option<&str> {
        self.opaque
            .as_ref()
            .map(|(idx, _)| self.categories[*idx].name.as_str())
    }

    /// Tokenize `text`
    ///
    /// Never fails: text matching no category becomes an unclassified token reaching up to the
    /// next whitespace.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let blocks: Vec<(usize, usize)> = match &self.opaque {
            Some((_, regex)) => regex
                .find_iter(text)
                .filter(|m| m.end() > m.start())
                .map(|m| (m.start(), m.end()))
                .collect(),
            None => Vec::new(),
        };
        let opaque_name = self.opaque();

        let mut cursor = Cursor {
            text,
            pos: 0,
            line: 1,
            line_start: 0,
        };
        let mut tokens = Vec::new();
        let mut next_block = 0;

        while let Some(c) = text[cursor.pos..].chars().next() {
            if c.is_whitespace() {
                cursor.advance(c.len_utf8());
                continue;
            }

            while next_block < blocks.len() && blocks[next_block].0 < cursor.pos {
                next_block += 1;
            }
            let limit = match blocks.get(next_block) {
                Some(&(start, end)) if start == cursor.pos => {
                    tokens.push(cursor.emit(opaque_name, end - start));
                    next_block += 1;
                    continue;
                }
                Some(&(start, _)) => start,
                None => text.len(),
            };

            // No token may reach into the next opaque block
            let window = &text[cursor.pos..limit];
            let token = match self.match_category(window) {
                Some((idx, len)) => cursor.emit(Some(self.categories[idx].name.as_str()), len),
                None => {
                    let len = window
                        .find(char::is_whitespace)
                        .unwrap_or_else(|| window.len());
                    cursor.emit(None, len)
                }
            };
            tokens.push(token);
        }

        debug!(tokens = tokens.len(), lines = cursor.line, "tokenized");
        tokens
    }

    /// Category and length of the highest-priority non-empty match at the start of `window`
    fn match_category(&self, window: &str) -> Option<(usize, usize)> {
        let captures = self.combined.captures(window)?;
        let (idx, len) = self.groups.iter().enumerate().find_map(|(idx, group)| {
            let m = captures.get((*group)?)?;
            Some((idx, m.end()))
        })?;
        if len > 0 {
            return Some((idx, len));
        }
        // The alternation stopped at an empty match, later categories may still match
        self.groups
            .iter()
            .zip(self.anchored.iter())
            .enumerate()
            .skip(idx + 1)
            .filter(|(_, (group, _))| group.is_some())
            .find_map(|(idx, (_, regex))| {
                let len = regex.find(window)?.end();
                if len > 0 {
                    Some((idx, len))
                } else {
                    None
                }
            })
    }
}

fn group_name(idx: usize) -> String {
    format!("category_{}", idx)
}

/// Position in the text being tokenized
struct Cursor<'t> {
    text: &'t str,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'t> Cursor<'t> {
    fn advance(&mut self, len: usize) {
        let text = self.text;
        let end = self.pos + len;
        for (offset, _) in text[self.pos..end].match_indices('\n') {
            self.line += 1;
            self.line_start = self.pos + offset + 1;
        }
        self.pos = end;
    }

    fn emit(&mut self, category: Option<&str>, len: usize) -> Token {
        let column = self.text[self.line_start..self.pos].chars().count() + 1;
        let text = &self.text[self.pos..self.pos + len];
        let token = Token::new(category, text, self.line, column);
        trace!(token = %token, "token");
        self.advance(len);
        token
    }
}
