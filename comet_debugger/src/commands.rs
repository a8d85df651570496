use std::path::PathBuf;

use anyhow::anyhow;

use crate::AppResult;

/*
 * The debugger command table. A token selects an entry when the short form
 * is a prefix of the token and the token is a prefix of the long form, so
 * both `r` and `run` work and anything in between does too. First match in
 * table order wins: `stack` sits before `step` so `st` resolves to it
 * while `s` still reaches `step`.
 */
pub struct CommandSpec {
    pub short: &'static str,
    pub long: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    // ↓ commands flagged here print the CPU state after executing
    pub lists_state: bool,
}

pub const COMMAND_TABLE: &[CommandSpec] = &[
    CommandSpec {
        short: "r",
        long: "run",
        usage: "run",
        summary: "execute until a breakpoint, an illegal instruction or EXIT",
        lists_state: true,
    },
    CommandSpec {
        short: "st",
        long: "stack",
        usage: "stack",
        summary: "dump 128 words starting at GR4",
        lists_state: false,
    },
    CommandSpec {
        short: "s",
        long: "step",
        usage: "step [COUNT]",
        summary: "execute COUNT instructions (default 1)",
        lists_state: true,
    },
    CommandSpec {
        short: "b",
        long: "break",
        usage: "break ADDRESS",
        summary: "set a breakpoint at ADDRESS",
        lists_state: false,
    },
    CommandSpec {
        short: "de",
        long: "del",
        usage: "del [INDEX]",
        summary: "delete breakpoint INDEX, or all breakpoints",
        lists_state: false,
    },
    CommandSpec {
        short: "i",
        long: "info",
        usage: "info",
        summary: "list breakpoints",
        lists_state: false,
    },
    CommandSpec {
        short: "p",
        long: "print",
        usage: "print",
        summary: "show PC, the general registers and FR",
        lists_state: false,
    },
    CommandSpec {
        short: "du",
        long: "dump",
        usage: "dump [ADDRESS]",
        summary: "dump 128 words starting at ADDRESS (default PC)",
        lists_state: false,
    },
    CommandSpec {
        short: "f",
        long: "file",
        usage: "file PATH",
        summary: "load a CASL object file",
        lists_state: true,
    },
    CommandSpec {
        short: "j",
        long: "jump",
        usage: "jump ADDRESS",
        summary: "set PC to ADDRESS",
        lists_state: true,
    },
    CommandSpec {
        short: "m",
        long: "memory",
        usage: "memory ADDRESS VALUE",
        summary: "write VALUE at ADDRESS",
        lists_state: false,
    },
    CommandSpec {
        short: "di",
        long: "disasm",
        usage: "disasm [ADDRESS]",
        summary: "disassemble 16 instructions starting at ADDRESS (default PC)",
        lists_state: false,
    },
    CommandSpec {
        short: "h",
        long: "help",
        usage: "help",
        summary: "print this command summary",
        lists_state: false,
    },
    CommandSpec {
        short: "q",
        long: "quit",
        usage: "quit",
        summary: "leave the debugger",
        lists_state: false,
    },
];

#[derive(Debug, PartialEq, Eq)]
pub enum DebuggerCommand {
    Run,
    Step(u16),
    Break(u16),
    Delete(Option<usize>),
    Info,
    Print,
    Dump(Option<u16>),
    Stack,
    File(PathBuf),
    Jump(u16),
    Memory(u16, u16),
    Disasm(Option<u16>),
    Help,
    Quit,
}

#[derive(Debug)]
pub struct ParsedCommand {
    pub command: DebuggerCommand,
    pub lists_state: bool,
}

/// Parse a numeric argument: decimal with an optional sign, or `#` prefixed
/// hexadecimal. Values are masked to 16 bits, so `-1` reads as `#ffff`.
pub fn parse_word(token: &str) -> AppResult<u16> {
    let value = if let Some(hexa) = token.strip_prefix('#') {
        i64::from_str_radix(hexa, 16)
            .map_err(|_| anyhow!("invalid hexadecimal value '{}'", token))?
    } else {
        token
            .parse::<i64>()
            .map_err(|_| anyhow!("invalid numeric value '{}'", token))?
    };

    Ok((value & 0xffff) as u16)
}

fn usage(spec: &CommandSpec) -> anyhow::Error {
    anyhow!("usage: {}", spec.usage)
}

pub fn parse_command(line: &str) -> AppResult<ParsedCommand> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or_else(|| anyhow!("empty command line"))?;
    let spec = COMMAND_TABLE
        .iter()
        .find(|spec| name.starts_with(spec.short) && spec.long.starts_with(name))
        .ok_or_else(|| anyhow!("unknown command '{}', try 'help'", name))?;
    let args: Vec<&str> = tokens.collect();

    let command = match spec.long {
        "run" => DebuggerCommand::Run,
        "stack" => DebuggerCommand::Stack,
        "step" => DebuggerCommand::Step(match args.first() {
            Some(token) => parse_word(token)?,
            None => 1,
        }),
        "break" => DebuggerCommand::Break(parse_word(args.first().ok_or_else(|| usage(spec))?)?),
        "del" => DebuggerCommand::Delete(match args.first() {
            Some(token) => Some(
                token
                    .parse::<usize>()
                    .map_err(|_| anyhow!("invalid breakpoint index '{}'", token))?,
            ),
            None => None,
        }),
        "info" => DebuggerCommand::Info,
        "print" => DebuggerCommand::Print,
        "dump" => DebuggerCommand::Dump(args.first().map(|token| parse_word(token)).transpose()?),
        "file" => DebuggerCommand::File(PathBuf::from(args.first().ok_or_else(|| usage(spec))?)),
        "jump" => DebuggerCommand::Jump(parse_word(args.first().ok_or_else(|| usage(spec))?)?),
        "memory" => match args.as_slice() {
            [address, value, ..] => DebuggerCommand::Memory(parse_word(address)?, parse_word(value)?),
            _ => return Err(usage(spec)),
        },
        "disasm" => DebuggerCommand::Disasm(args.first().map(|token| parse_word(token)).transpose()?),
        "help" => DebuggerCommand::Help,
        "quit" => DebuggerCommand::Quit,
        _ => unreachable!("command table entry without a parser"),
    };

    Ok(ParsedCommand {
        command,
        lists_state: spec.lists_state,
    })
}
