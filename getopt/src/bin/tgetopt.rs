// Test runner: scans its trailing arguments against an option string and a
// long-option list given on the command line, printing one line per token.

use std::process::ExitCode;

use getopt::*;

const PROGRAM: &str = "tgetopt";

/// Enable with `RUST_LOG=getopt=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn runner_options() -> OptionTable {
    OptionTable::new()
        .mode(Mode::RequireOrder)
        .option(OptionEntry::new('q', "quiet").description("Do not print diagnostics."))
        .option(
            OptionEntry::new('p', "posix")
                .description("Stop at the first operand, as if POSIXLY_CORRECT were set."),
        )
        .option(OptionEntry::new('h', "help").description("Show this help."))
}

/// `name`, `name:` or `name::`, comma separated; `-` for none. Each option
/// reports the first letter of its name.
fn parse_long_specs(list: &str) -> Vec<OptionSpec> {
    if list == "-" {
        return Vec::new();
    }
    list.split(',')
        .filter_map(|item| {
            let name = item.trim_end_matches(':');
            let first = name.chars().next()?;
            let arg = match item.len() - name.len() {
                0 => ArgRequirement::None,
                1 => ArgRequirement::Required,
                _ => ArgRequirement::Optional,
            };
            Some(OptionSpec::new(name, arg, first))
        })
        .collect()
}

fn print_usage(table: &OptionTable, to_stderr: bool) {
    let usage = Usage::new(PROGRAM, table.entries()).summary("OPTSTRING LONGSPECS [ARG]...");
    if to_stderr {
        eprint!("{}", usage);
    } else {
        print!("{}", usage);
    }
}

fn describe(token: Token) -> String {
    match token.as_char() {
        Some(c) => c.to_string(),
        None => token.code().to_string(),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let table = runner_options();
    let compiled = match table.compile() {
        Ok(compiled) => compiled,
        Err(e) => {
            eprintln!("{}: {}", PROGRAM, e);
            return ExitCode::from(2);
        }
    };

    let mut args: Vec<String> = std::env::args().collect();
    let mut own = OptionScanner::new(ScannerConfig::default());
    let mut config = ScannerConfig::from_env();
    loop {
        let token = match own.scan_long(&mut args, &compiled.optstring, &compiled.long_opts) {
            Ok((token, _)) => token,
            Err(e) => {
                eprintln!("{}: {}", PROGRAM, e);
                return ExitCode::from(2);
            }
        };
        match token.as_char() {
            Some('q') => config.report_errors = false,
            Some('p') => config.posixly_correct = true,
            Some('h') => {
                print_usage(&table, false);
                return ExitCode::SUCCESS;
            }
            _ if token == Token::Done => break,
            _ => {
                print_usage(&table, true);
                return ExitCode::from(2);
            }
        }
    }

    let rest = &args[own.next_index()..];
    let [optstring, longspecs, operands @ ..] = rest else {
        print_usage(&table, true);
        return ExitCode::from(2);
    };
    let long_opts = parse_long_specs(longspecs);
    let mut argv: Vec<String> = std::iter::once(PROGRAM.to_string())
        .chain(operands.iter().cloned())
        .collect();

    let mut scanner = OptionScanner::new(config);
    loop {
        let (token, index) = match scanner.scan_long(&mut argv, optstring, &long_opts) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("{}: {}", PROGRAM, e);
                return ExitCode::from(2);
            }
        };
        let value = scanner
            .last_argument()
            .map(|v| format!("={}", v))
            .unwrap_or_default();
        match token {
            Token::Done => break,
            Token::Opt(_) => match index {
                Some(i) => println!("long {}{}", long_opts[i].name, value),
                None => println!("opt {}{}", describe(token), value),
            },
            Token::Unrecognized => match scanner.last_unrecognized() {
                Some(c) => println!("unrecognized {}", c),
                None => println!("unrecognized ?"),
            },
            Token::MissingArgument => match scanner.last_unrecognized() {
                Some(c) => println!("missing {}", c),
                None => println!("missing ?"),
            },
            Token::NonOption => println!("nonopt {}", scanner.last_argument().unwrap_or_default()),
        }
    }

    println!("done next={}", scanner.next_index());
    println!("argv: {}", argv[1..].join(" "));
    ExitCode::SUCCESS
}
