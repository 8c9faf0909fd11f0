use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::cli::commands::SessionLine;
use crate::cli::handlers::{self, Outcome};
use crate::model::config::AppConfig;
use crate::store::ItemStore;

use clap::Parser;

/// Run the interactive session: one command per line, applied to completion
/// before the next line is read. The store lives exactly as long as the
/// session; there is no persistence by design.
pub fn run(store: &mut ItemStore, config: &AppConfig, json: bool) -> Result<(), Box<dyn Error>> {
    println!(
        "[>] punchlist v{} - type 'help' for commands, 'quit' to leave",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("pl> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let tokens = split_line(&line?);
        if tokens.is_empty() {
            continue;
        }

        match SessionLine::try_parse_from(&tokens) {
            Ok(parsed) => match handlers::dispatch(store, config, parsed.command, json) {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Quit) => break,
                Err(e) => println!("error: {}", e),
            },
            Err(e) => {
                // clap renders its own usage/help text
                let _ = e.print();
            }
        }
    }
    Ok(())
}

/// Split a command line into tokens. Double quotes group words; an unclosed
/// quote runs to the end of the line.
pub fn split_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    tokens.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        tokens.push(current);
    }
    tokens
}
