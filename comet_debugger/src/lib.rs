mod commands;
mod session;

pub use commands::{parse_command, parse_word, CommandSpec, DebuggerCommand, ParsedCommand, COMMAND_TABLE};
pub use session::Session;

pub type AppResult<T> = anyhow::Result<T>;
