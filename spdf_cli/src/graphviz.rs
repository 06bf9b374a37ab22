use std::error::Error;
use std::fs;
use std::io::Write;

use spdf::LR1Parser;
use tempfile::NamedTempFile;

use crate::grammar;

pub fn write_graphviz_graph(
    grammar_filename: Option<&str>,
    output_filename: &str,
) -> Result<(), Box<dyn Error>> {
    let parser = grammar::load_parser(grammar_filename)?;
    let graphviz_string = render_graphviz_graph(&parser);
    fs::write(output_filename, graphviz_string)?;
    Ok(())
}

pub fn show_graphviz_graph(grammar_filename: Option<&str>) -> Result<(), Box<dyn Error>> {
    let parser = grammar::load_parser(grammar_filename)?;
    let graphviz_string = render_graphviz_graph(&parser);
    // We need the tempfile filename in order to open it with an associated application
    let mut temp_file = NamedTempFile::new()?;
    let mut path = temp_file.path().as_os_str().to_owned();
    path.push(".dot");
    write!(temp_file, "{}", graphviz_string)?;
    temp_file.persist(&path)?;
    open::that(&path)?;
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_graphviz_graph(parser: &LR1Parser) -> String {
    let grammar = parser.grammar();
    let mut lines = Vec::new();
    lines.push("digraph lr1_states {".to_owned());
    for (state_idx, state) in parser.automaton().states().iter().enumerate() {
        // Create graphviz box with table for the state
        let table_rows: Vec<String> = state
            .items()
            .iter()
            .map(|item| {
                let mut la_string = escape(&item.lookahead_string());
                if item.is_complete(grammar) {
                    // Use underline to mark a reduce action
                    la_string = format!("<U>{}</U>", la_string);
                }
                format!(
                    "      <TR><TD>{}</TD><TD>{}</TD></TR>",
                    escape(&item.augmented_rule_string(grammar)),
                    la_string
                )
            })
            .collect();
        let table_row_string = table_rows.join("\n");
        let table_head = format!(
            "      <TR><TD><B>State #{}</B></TD><TD><B>Lookahead</B></TD></TR>",
            state_idx
        );
        let line = format!(
            r#"  State{} [shape=plain label=<
    <TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
{}
{}
    </TABLE>
  >];"#,
            state_idx, table_head, table_row_string
        );
        lines.push(line);
        // Create state transitions
        for (symbol, other_state_idx) in state.transitions().iter() {
            lines.push(format!(
                r#"  State{} -> State{} [label="{}"];"#,
                state_idx,
                other_state_idx,
                symbol.name().replace('\\', "\\\\").replace('"', "\\\"")
            ))
        }
    }
    lines.push("}".to_owned());
    lines.join("\n")
}
