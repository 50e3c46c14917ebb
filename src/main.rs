use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};
use smartcalc::Session;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Lines to process in order, instead of starting the interactive prompt
    #[arg(short, long = "eval", value_name = "LINE")]
    eval: Vec<String>,

    /// Text of the interactive prompt
    #[arg(long, default_value = "SmartCalc > ")]
    prompt: String,

    /// Log more details, can be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut session = Session::new();
    if cli.eval.is_empty() {
        match run_repl(&mut session, &cli.prompt) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {}", err);
                ExitCode::FAILURE
            }
        }
    } else {
        run_lines(&mut session, &cli.eval)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the outcome of one line, returning whether it succeeded
fn report(session: &mut Session, line: &str) -> bool {
    match session.process(line) {
        Ok(outcome) => {
            println!("{}", outcome);
            true
        }
        Err(err) => {
            println!("{}", err);
            false
        }
    }
}

fn run_lines(session: &mut Session, lines: &[String]) -> ExitCode {
    let mut failed = false;
    for line in lines {
        failed |= !report(session, line);
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_repl(session: &mut Session, prompt: &str) -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    info!("starting interactive session");
    loop {
        let readline = rl.readline(prompt);
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                report(session, &line);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => return Err(err),
        }
    }
    info!("session ended");
    Ok(())
}
