use std::error::Error;
use std::fs::File;

use prettytable as pt;
use prettytable::cell;
use prettytable::row;
use spdf::{LR1Parser, Symbol};

use crate::grammar;

pub fn print_table(grammar_filename: Option<&str>) -> Result<(), Box<dyn Error>> {
    let parser = grammar::load_parser(grammar_filename)?;
    let pretty_table = generate_pretty_table(&parser);
    println!("{}", pretty_table);
    Ok(())
}

pub fn write_table_csv(
    grammar_filename: Option<&str>,
    csv_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let parser = grammar::load_parser(grammar_filename)?;
    let pretty_table = generate_pretty_table(&parser);
    let csv_file = File::create(csv_filename)?;
    pretty_table.to_csv(csv_file)?;
    Ok(())
}

fn generate_pretty_table(parser: &LR1Parser) -> pt::Table {
    let grammar = parser.grammar();
    let columns: Vec<Symbol> = grammar
        .terminals()
        .iter()
        .cloned()
        .map(Symbol::Terminal)
        .chain(
            grammar
                .nonterminals()
                .iter()
                .filter(|n| *n != grammar.augmented_start())
                .cloned()
                .map(Symbol::NonTerminal),
        )
        .collect();

    let mut table = pt::Table::new();

    let mut title_row = row!["#", "LR(1) items", "Lookahead"];
    for symbol in columns.iter() {
        title_row.add_cell(cell!(format!("{}", symbol)));
    }
    table.add_row(title_row);

    for (i, state) in parser.automaton().states().iter().enumerate() {
        let (items, lookaheads): (Vec<_>, Vec<_>) = state
            .items()
            .iter()
            .map(|item| (item.augmented_rule_string(grammar), item.lookahead_string()))
            .unzip();

        let mut row = row![i, items.join("\n"), lookaheads.join("\n")];
        for symbol in columns.iter() {
            row.add_cell(cell![parser
                .actions()
                .get(i, symbol)
                .map_or("".to_owned(), |a| format!("{}", a))]);
        }

        table.add_row(row);
    }

    table
}
