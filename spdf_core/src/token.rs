use std::fmt;

/// Lexical unit of a document
///
/// `category` is `None` for text that matched no lexical category. Lines and columns are
/// 1-based, columns count characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub category: Option<String>,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(category: Option<&str>, text: &str, line: usize, column: usize) -> Self {
        Token {
            category: category.map(|c| c.to_owned()),
            text: text.to_owned(),
            line,
            column,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.as_str())
    }

    pub fn is_unclassified(&self) -> bool {
        self.category.is_none()
    }

    /// Line the token ends on
    pub fn end_line(&self) -> usize {
        self.line + self.text.matches('\n').count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let text = if self.text.chars().count() > 40 {
            let prefix: String = self.text.chars().take(40).collect();
            format!("{}...", prefix)
        } else {
            self.text.clone()
        };
        match &self.category {
            Some(category) => write!(
                f,
                "{} {:?} at {}:{}",
                category, text, self.line, self.column
            ),
            None => write!(
                f,
                "unclassified {:?} at {}:{}",
                text, self.line, self.column
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let token = Token::new(Some("NAME"), "/Type", 3, 7);
        assert_eq!(format!("{}", token), "NAME \"/Type\" at 3:7");
        let token = Token::new(None, "@@", 1, 1);
        assert_eq!(format!("{}", token), "unclassified \"@@\" at 1:1");
    }

    #[test]
    fn test_end_line() {
        let token = Token::new(Some("STREAM_BLOCK"), "stream\nabc\nendstream", 4, 1);
        assert_eq!(token.end_line(), 6);
    }
}
