//! Rule notation
//!
//! The right-hand side of a textual rule is a whitespace separated list of symbol names. A name
//! enclosed in the regex marker (e.g. `"\d{10}"`) is a terminal matched by that regex instead of
//! by its literal name.

use combine::parser::char::{char, spaces};
use combine::{between, choice, eof, many, many1, satisfy};
use combine::{ParseError, Parser, Stream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSymbol {
    pub name: String,
    pub is_regex: bool,
}

/// Split a rule side into its raw symbols
pub(crate) fn parse_rule_side(text: &str, marker: char) -> Result<Vec<RawSymbol>, String> {
    rule_side(marker)
        .parse(text)
        .map(|(symbols, _rest)| symbols)
        .map_err(|err| format!("malformed symbol list {:?} ({:?})", text, err))
}

fn rule_side<I>(marker: char) -> impl Parser<Input = I, Output = Vec<RawSymbol>>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    (spaces(), many(symbol(marker).skip(spaces())), eof())
        .map(|(_, symbols, _): ((), Vec<RawSymbol>, ())| symbols)
}

fn symbol<I>(marker: char) -> impl Parser<Input = I, Output = RawSymbol>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    choice((regex_symbol(marker), plain_symbol(marker)))
}

fn regex_symbol<I>(marker: char) -> impl Parser<Input = I, Output = RawSymbol>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    between(
        char(marker),
        char(marker),
        many(satisfy(move |c: char| c != marker)),
    )
    .map(|name: String| RawSymbol {
        name,
        is_regex: true,
    })
}

fn plain_symbol<I>(marker: char) -> impl Parser<Input = I, Output = RawSymbol>
where
    I: Stream<Item = char>,
    I::Error: ParseError<I::Item, I::Range, I::Position>,
{
    many1(satisfy(move |c: char| !c.is_whitespace() && c != marker)).map(|name: String| {
        RawSymbol {
            name,
            is_regex: false,
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn plain(name: &str) -> RawSymbol {
        RawSymbol {
            name: name.to_owned(),
            is_regex: false,
        }
    }

    #[test]
    fn test_plain_symbols() {
        let symbols = parse_rule_side("  E  +\tB ", '"').unwrap();
        assert_eq!(symbols, vec![plain("E"), plain("+"), plain("B")]);
    }

    #[test]
    fn test_empty_side() {
        assert!(parse_rule_side("", '"').unwrap().is_empty());
        assert!(parse_rule_side("   ", '"').unwrap().is_empty());
    }

    #[test]
    fn test_regex_symbol_keeps_spaces() {
        let symbols = parse_rule_side(r#"A "\d{10} \d{5}" B"#, '"').unwrap();
        assert_eq!(symbols.len(), 3);
        assert_eq!(symbols[1].name, r"\d{10} \d{5}");
        assert!(symbols[1].is_regex);
    }

    #[test]
    fn test_unterminated_regex() {
        assert!(parse_rule_side(r#"A "\d+"#, '"').is_err());
    }
}
