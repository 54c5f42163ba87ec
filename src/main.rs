//! CLI tool to inspect and check TQ documentation code samples.

use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: tq <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  check  Report samples containing error-flagged tokens");
        eprintln!("  dump   Print the classified token stream");
        eprintln!("  copy   Print the copy-to-clipboard text");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  tq check docs/samples/*.tq");
        eprintln!("  tq dump sample.tq");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        // fenced code blocks arrive with trailing whitespace trimmed
        let tokens = tq_highlight::tokenize(content.trim_end());

        match command {
            "check" => {
                let errors: Vec<_> = tokens.iter().filter(|t| t.error).collect();
                if errors.is_empty() {
                    eprintln!("{path}: ok ({} token(s))", tokens.len());
                } else {
                    let first = errors[0];
                    eprintln!(
                        "{path}: {} error token(s), first at {}..{}: {:?}",
                        errors.len(),
                        first.start,
                        first.end,
                        first.value
                    );
                    had_error = true;
                }
            }
            "dump" => {
                for token in &tokens {
                    let flag = if token.error { " !" } else { "" };
                    println!(
                        "{:>4}..{:<4} {:?} {:?}{flag}",
                        token.start, token.end, token.kind, token.value
                    );
                }
            }
            "copy" => {
                print!("{}", tq_highlight::copy_text(&tokens));
            }
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
