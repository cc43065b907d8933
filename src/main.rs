//! EMU14500B - CLI Entry Point
//!
//! Commands:
//! - `emu14500b run <program>` - Run an assembly listing from a file
//! - `emu14500b exec "<source>"` - Run an inline `;`-joined listing
//! - `emu14500b repl` - Step instructions interactively from stdin

use clap::{Parser, Subcommand};
use emu14500b::{execute_line, runner, CpuState, Step};
use std::io::BufRead;

#[derive(Parser)]
#[command(name = "emu14500b")]
#[command(version = "0.1.0")]
#[command(about = "An emulator of a minimal one-accumulator, byte-wide processor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an assembly listing from a file until it halts
    Run {
        /// Path to the listing (instructions joined by `;` or newlines)
        program: String,
        /// Dump the final CPU state as JSON
        #[arg(long)]
        json: bool,
        /// Print each dispatched line and its outcome
        #[arg(short, long)]
        trace: bool,
    },
    /// Run an inline listing, e.g. "LDA 00; INC; HALT"
    Exec {
        /// The listing source
        source: String,
        /// Dump the final CPU state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Enter instructions interactively, one per line
    Repl,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { program, json, trace }) => {
            let source = match std::fs::read_to_string(&program) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("❌ Failed to read {}: {}", program, e);
                    std::process::exit(1);
                }
            };
            run_source(&source, json, trace);
        }
        Some(Commands::Exec { source, json }) => {
            run_source(&source, json, false);
        }
        Some(Commands::Repl) => {
            repl();
        }
        None => {
            println!("EMU14500B v0.1.0");
            println!("A one-accumulator, byte-wide processor emulator");
            println!();
            println!("Use --help for available commands");
        }
    }
}

fn run_source(source: &str, json: bool, trace: bool) {
    let mut state = CpuState::new();
    let report = runner::run(&mut state, source);

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(instr) => {
                if trace {
                    println!("{:03}: {}  {}", outcome.line, instr, state);
                }
            }
            Err(fault) => {
                eprintln!("❌ line {} ({}): {}", outcome.line, outcome.text, fault);
            }
        }
    }

    println!();
    if report.halted {
        println!("✓ Execution halted");
    } else {
        println!("✓ End of listing");
    }

    if json {
        match serde_json::to_string_pretty(&state) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("❌ Failed to serialize state: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", state);
    }
}

fn repl() {
    println!("EMU14500B interactive mode");
    println!("Enter instructions (e.g., LDA 01), HALT to stop:");

    let mut state = CpuState::new();
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("❌ Input error: {}", e);
                break;
            }
        };

        let Some((mnemonic, operand)) = runner::tokenize(&line) else {
            continue;
        };

        match execute_line(&mut state, mnemonic, operand) {
            Ok(Step::Halted) => {
                println!("Execution halted!");
                break;
            }
            Ok(Step::Continue) => {
                println!("{}", state);
            }
            Err(fault) => {
                eprintln!("❌ {}", fault);
            }
        }
    }

    println!("{}", state);
}
