use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::exit;

use ansi_term::Colour;
use clap::Parser;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper, Result as RustyResult};

use comet_debugger::{parse_command, DebuggerCommand, ParsedCommand, Session, COMMAND_TABLE};
use comet_lib::{Console, ExecutionError};

/// COMET emulator and debugger
/// Loads an assembled CASL object file and offers step by step execution,
/// breakpoints, memory inspection and disassembly from an interactive
/// prompt.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct CommandLineArguments {
    /// Do not print the startup banner
    #[arg(short, long)]
    quiet: bool,

    /// Object file loaded before the first prompt
    image: Option<PathBuf>,
}

/// The console the emulated program talks through: IN prompts on stdout
/// and reads stdin, OUT prints to stdout.
struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        Ok(line)
    }

    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

struct CommandLineCompleter {}

impl Completer for CommandLineCompleter {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context,
    ) -> RustyResult<(usize, Vec<Self::Candidate>)> {
        let mut candidates: Vec<String> = vec![];

        for spec in COMMAND_TABLE {
            if spec.long.starts_with(line) {
                candidates.push(spec.long.to_owned());
            }
        }

        if candidates.is_empty() {
            Ok((pos, vec![]))
        } else {
            Ok((0, candidates))
        }
    }
}

impl Hinter for CommandLineCompleter {
    type Hint = String;
}

impl Highlighter for CommandLineCompleter {}

impl Validator for CommandLineCompleter {}

impl Helper for CommandLineCompleter {}

fn display_output(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn display_error(error: &anyhow::Error) {
    eprintln!("{}", Colour::Red.paint(format!("{}", error)));

    // a closed input stream cannot be recovered from the prompt
    if matches!(
        error.downcast_ref::<ExecutionError>(),
        Some(ExecutionError::Input(_))
    ) {
        exit(1);
    }
}

fn main() {
    let parameters = CommandLineArguments::parse();

    if !parameters.quiet {
        println!(
            "{}",
            Colour::Green.paint(format!(
                "COMET emulator/debugger version {}",
                env!("CARGO_PKG_VERSION")
            ))
        );
    }

    let mut session = Session::new(StdConsole);

    if let Some(image) = &parameters.image {
        let command = ParsedCommand {
            command: DebuggerCommand::File(image.clone()),
            lists_state: false,
        };
        match session.execute(&command) {
            Ok(lines) => display_output(lines),
            Err(error) => {
                eprintln!("{}", Colour::Red.paint(format!("{}", error)));
                exit(1);
            }
        }
    }

    let prompt = format!("{}", Colour::Fixed(148).bold().paint("comet> "));
    let mut rl: Editor<CommandLineCompleter> = match Editor::new() {
        Ok(editor) => editor,
        Err(error) => {
            eprintln!("could not initialize the terminal: {}", error);
            exit(1);
        }
    };
    rl.set_helper(Some(CommandLineCompleter {}));
    let mut last_line = String::new();

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                // an empty input repeats the previous command
                let line = if line.trim().is_empty() {
                    last_line.clone()
                } else {
                    rl.add_history_entry(line.as_str());
                    last_line = line.clone();
                    line
                };
                if line.trim().is_empty() {
                    continue;
                }

                let parsed = match parse_command(&line) {
                    Ok(parsed) => parsed,
                    Err(error) => {
                        display_error(&error);
                        continue;
                    }
                };
                if parsed.command == DebuggerCommand::Quit {
                    break;
                }

                match session.execute(&parsed) {
                    Ok(lines) => display_output(lines),
                    Err(error) => display_error(&error),
                }
            }
            Err(ReadlineError::Eof) => {
                println!("Quit!");
                break;
            }
            Err(ReadlineError::Interrupted) => {
                continue;
            }
            Err(error) => {
                eprintln!("Error: {:?}", error);
                break;
            }
        }
    }

    exit(if session.failed() { 1 } else { 0 });
}
