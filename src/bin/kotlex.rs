use clap::{Arg, ArgAction, Command};
use color_eyre::eyre::{Result, WrapErr};
use kotlex::grammar::{identifier_nfa, number_nfa};
use kotlex::{construct_scanner, export, ErrorCategory, Scanner, Token, TokenCategory, FA};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn init_subscriber(log_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_filter)
        .wrap_err_with(|| format!("Error: Invalid log filter {log_filter:?}"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .wrap_err("Error: Failed to initialize the logger")?;

    Ok(())
}

/// Accepts any category name, or `ERROR` for every kind of lexical error
fn parse_skip_category(name: &str) -> Result<Vec<TokenCategory>, String> {
    if name.eq_ignore_ascii_case("error") {
        return Ok(ErrorCategory::ALL
            .into_iter()
            .map(TokenCategory::Error)
            .collect());
    }

    match TokenCategory::from_name(name) {
        Some(category) => Ok(vec![category]),
        None => Err(format!("{name} is not a token category")),
    }
}

fn read_source(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("Error: Failed to read the source file {}", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .wrap_err("Error: Failed to read the source from stdin")?;
            Ok(source)
        }
    }
}

fn render_automaton<T: FA>(fa: &T, dump_format: &str) -> Result<String> {
    if dump_format == "dot" {
        return Ok(export::to_dot(fa));
    }

    serde_json::to_string_pretty(&export::summarize(fa))
        .wrap_err("Error: Failed to serialize the automaton")
}

/// Check `input` against every automaton the scanner is built from
fn render_acceptance(scanner: &Scanner, input: &str) -> String {
    let results = [
        ("identifier-nfa", identifier_nfa().accepts(input)),
        ("identifier-dfa", scanner.get_identifier_dfa().accepts(input)),
        ("number-nfa", number_nfa().accepts(input)),
        ("number-dfa", scanner.get_number_dfa().accepts(input)),
    ];

    let mut report = String::new();

    for (automaton, accepted) in results {
        let verdict = if accepted { "accepted" } else { "rejected" };
        report.push_str(&format!("{:<15} {} {:?}\n", automaton, verdict, input));
    }

    report
}

fn render_tokens(tokens: &[Token], format: &str) -> Result<String> {
    if format == "json" {
        return serde_json::to_string_pretty(tokens).wrap_err("Error: Failed to serialize tokens");
    }

    let mut listing = String::new();

    for token in tokens {
        let position = format!("{}:{}", token.get_line(), token.get_column());
        listing.push_str(&format!(
            "{:<9} {:<28} {}\n",
            position,
            token.get_category(),
            token.get_lexeme()
        ));
    }

    Ok(listing)
}

fn skip_tokens(tokens: Vec<Token>, skip_set: &HashSet<TokenCategory>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| !skip_set.contains(&token.get_category()))
        .collect()
}

fn write_output(output: Option<&PathBuf>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            let mut out_file = File::create(path).wrap_err_with(|| {
                format!("Error: Failed to create the output file {}", path.display())
            })?;
            out_file
                .write_all(contents.as_bytes())
                .wrap_err("Error: Failed to write the output file")?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .wrap_err("Error: Failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let args = Command::new("kotlex")
                        .version("0.1.0")
                        .about("A lexical analyser for a small Kotlin subset, built on NFAs reduced to DFAs by subset construction")
                        .arg(
                            Arg::new("input")
                            .short('i')
                            .long("input")
                            .help("The program source file which should be scanned and tokenized. Reads stdin when omitted")
                            .value_name("INPUT SOURCE FILE")
                            .value_parser(clap::value_parser!(PathBuf))
                        )
                        .arg(
                            Arg::new("output")
                            .short('o')
                            .long("output")
                            .help("The output file to store the lexer's output. Writes to stdout when omitted")
                            .value_name("OUTPUT RESULT FILE")
                            .value_parser(clap::value_parser!(PathBuf))
                        )
                        .arg(
                            Arg::new("format")
                            .short('f')
                            .long("format")
                            .help("Format of the token listing")
                            .value_parser(["table", "json"])
                            .default_value("table")
                        )
                        .arg(
                            Arg::new("skip")
                            .short('s')
                            .long("skip")
                            .help("Syntactic categories which should be left out of the listing, ERROR skips every lexical error")
                            .value_name("CATEGORY")
                            .num_args(1..)
                            .action(ArgAction::Append)
                            .value_parser(parse_skip_category)
                        )
                        .arg(
                            Arg::new("dump")
                            .long("dump")
                            .help("Print one of the scanner's automata instead of scanning")
                            .value_parser(["identifier-nfa", "identifier-dfa", "number-nfa", "number-dfa"])
                            .num_args(1)
                        )
                        .arg(
                            Arg::new("test")
                            .long("test")
                            .help("Check whether a string is accepted by each of the scanner's automata instead of scanning")
                            .value_name("STRING")
                            .conflicts_with("dump")
                        )
                        .arg(
                            Arg::new("dump-format")
                            .long("dump-format")
                            .help("Format of the automaton dump")
                            .value_parser(["json", "dot"])
                            .default_value("json")
                        )
                        .arg(
                            Arg::new("deny-errors")
                            .long("deny-errors")
                            .help("Exit with a failure status when the source contains lexical errors")
                            .action(ArgAction::SetTrue)
                        )
                        .arg(
                            Arg::new("log-filter")
                            .long("log-filter")
                            .help("Log filter, using env_logger-like syntax")
                            .env("RUST_LOG")
                            .default_value("warn")
                        )
                        .get_matches();

    let log_filter = args
        .get_one::<String>("log-filter")
        .map(String::as_str)
        .unwrap_or("warn");
    init_subscriber(log_filter)?;

    let output = args.get_one::<PathBuf>("output");

    let scanner = construct_scanner();

    if let Some(dump) = args.get_one::<String>("dump") {
        let dump_format = args
            .get_one::<String>("dump-format")
            .map(String::as_str)
            .unwrap_or("json");

        debug!(automaton = %dump, format = dump_format, "dumping automaton");

        let rendered = match dump.as_str() {
            "identifier-nfa" => render_automaton(&identifier_nfa(), dump_format)?,
            "number-nfa" => render_automaton(&number_nfa(), dump_format)?,
            "number-dfa" => render_automaton(scanner.get_number_dfa(), dump_format)?,
            _ => render_automaton(scanner.get_identifier_dfa(), dump_format)?,
        };

        write_output(output, &format!("{rendered}\n"))?;
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(input) = args.get_one::<String>("test") {
        write_output(output, &render_acceptance(&scanner, input))?;
        return Ok(ExitCode::SUCCESS);
    }

    let source = read_source(args.get_one::<PathBuf>("input"))?;
    let tokens = scanner.analyze(&source);

    let skip_set: HashSet<TokenCategory> = args
        .get_many::<Vec<TokenCategory>>("skip")
        .into_iter()
        .flatten()
        .flatten()
        .copied()
        .collect();

    let error_count = tokens.iter().filter(|token| token.is_error()).count();

    let listing = skip_tokens(tokens, &skip_set);

    let format = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("table");
    write_output(output, &render_tokens(&listing, format)?)?;

    if error_count > 0 {
        warn!(errors = error_count, "source contains lexical errors");

        if args.get_flag("deny-errors") {
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
