#[macro_use]
mod logging;

mod cli;
mod error_handling;
mod generator;
mod grammar;
mod interrupt;
mod parser;
mod search;
mod session;

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use cli::Cli;
use interrupt::Interrupt;
use parser::CompileErrors;
use session::{Session, Verdict};

#[derive(Debug, Error)]
enum AppError {
    #[error("Could not load the grammar ({} errors)", .0.len())]
    Grammar(CompileErrors),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not install the Ctrl-C handler: {0}")]
    Handler(#[from] ctrlc::Error),
}

fn interrupted() -> ExitCode {
    println!("{}", interrupt::MESSAGE);
    ExitCode::from(interrupt::EXIT_CODE)
}

fn run(cli: &Cli) -> Result<ExitCode, AppError> {
    let interrupt = Interrupt::install()?;
    let grammar = parser::parse_file(&cli.file).map_err(AppError::Grammar)?;
    log_info!(
        "Loaded {} with {} terminals, {} nonterminals and {} rules",
        cli.file.display(),
        grammar.terminals().len(),
        grammar.nonterminals().len(),
        grammar.productions().count()
    );

    let session = Session {
        grammar: &grammar,
        limits: cli.limits(),
        show_rules: cli.rules,
        interrupt: Some(&*interrupt)
    };
    // Unlocked, so the Ctrl-C handler can still print
    let mut out = io::stdout();

    if let Some(amount) = cli.sample {
        session.sample(&mut rand::thread_rng(), amount, cli.sample_steps, &mut out)?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.words.is_empty() {
        return Ok(match session.interactive(&mut io::stdin().lock(), &mut out)? {
            ControlFlow::Continue(()) => ExitCode::SUCCESS,
            ControlFlow::Break(()) => interrupted(),
        });
    }

    let mut all_valid = true;
    for word in &cli.words {
        writeln!(out, "{}:", word)?;
        match session.check(word, &mut out)? {
            Verdict::Valid => {}
            Verdict::Interrupted => return Ok(interrupted()),
            Verdict::NotValid | Verdict::Undecided => all_valid = false,
        }
    }

    Ok(if all_valid { ExitCode::SUCCESS } else { ExitCode::from(2) })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::set_level(logging::Level::from_verbosity(cli.verbose));

    match run(&cli) {
        Ok(code) => code,
        Err(AppError::Grammar(errors)) => {
            error_handling::report(&errors);
            log_error!("{}", AppError::Grammar(errors));
            ExitCode::FAILURE
        }
        Err(error) => {
            log_error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
