use std::error::Error;
use std::process;

use clap::{App, AppSettings, Arg, SubCommand};
use tracing_subscriber::EnvFilter;

mod document;
mod grammar;
mod graphviz;
mod table;

fn main() {
    if let Err(err) = cli() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn grammar_arg() -> Arg<'static, 'static> {
    Arg::with_name("grammar")
        .long("grammar")
        .takes_value(true)
        .help("Grammar file with one `LHS -> rhs` rule per line, instead of the SPDF grammar")
}

fn init_logging(verbosity: u64) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn cli() -> Result<(), Box<dyn Error>> {
    let matches = App::new("spdf_cli")
        .about("Tool for validating SPDF documents and inspecting LR(1) parsers")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Log more details, may be repeated"),
        )
        .subcommand(
            SubCommand::with_name("tokens")
                .arg(
                    Arg::with_name("file")
                        .help("SPDF document")
                        .required(true),
                )
                .about("Prints the tokens of a document"),
        )
        .subcommand(
            SubCommand::with_name("parse")
                .arg(
                    Arg::with_name("file")
                        .help("SPDF document")
                        .required(true),
                )
                .arg(grammar_arg())
                .about("Prints the syntax tree of a document"),
        )
        .subcommand(
            SubCommand::with_name("check")
                .arg(
                    Arg::with_name("files")
                        .help("SPDF documents")
                        .required(true)
                        .multiple(true),
                )
                .arg(
                    Arg::with_name("config")
                        .long("config")
                        .takes_value(true)
                        .help("Options file with `name=true|false` lines"),
                )
                .about("Validates documents and reports every problem found"),
        )
        .subcommand(
            SubCommand::with_name("table")
                .arg(grammar_arg())
                .arg(
                    Arg::with_name("csv")
                        .long("csv")
                        .takes_value(true)
                        .help("Write the parse table to a specified CSV file"),
                )
                .about("Prints the LR(1) parse table"),
        )
        .subcommand(
            SubCommand::with_name("graph")
                .arg(grammar_arg())
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .help("Write the generated graphviz graph to a file (*.dot)"),
                )
                .about("Outputs a graphviz graph showing the LR(1) states"),
        )
        .setting(AppSettings::ArgRequiredElseHelp)
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    if let Some(tokens_opts) = matches.subcommand_matches("tokens") {
        let filename = tokens_opts.value_of("file").unwrap_or_default();
        document::print_tokens(filename)?;
    }

    if let Some(parse_opts) = matches.subcommand_matches("parse") {
        let filename = parse_opts.value_of("file").unwrap_or_default();
        document::print_tree(filename, parse_opts.value_of("grammar"))?;
    }

    if let Some(check_opts) = matches.subcommand_matches("check") {
        let filenames: Vec<&str> = check_opts
            .values_of("files")
            .map(|values| values.collect())
            .unwrap_or_default();
        document::check(&filenames, check_opts.value_of("config"))?;
    }

    if let Some(table_opts) = matches.subcommand_matches("table") {
        let grammar_file: Option<&str> = table_opts.value_of("grammar");
        let csv_file: Option<&str> = table_opts.value_of("csv");

        if let Some(csv_filename) = csv_file {
            table::write_table_csv(grammar_file, csv_filename)?;
        } else {
            table::print_table(grammar_file)?;
        }
    }

    if let Some(graph_opts) = matches.subcommand_matches("graph") {
        let grammar_file: Option<&str> = graph_opts.value_of("grammar");
        let output_file: Option<&str> = graph_opts.value_of("output");

        if let Some(output_filename) = output_file {
            graphviz::write_graphviz_graph(grammar_file, output_filename)?;
        } else {
            graphviz::show_graphviz_graph(grammar_file)?;
        }
    }

    Ok(())
}
