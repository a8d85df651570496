use std::path::Path;

use anyhow::anyhow;
use comet_lib::{
    disassemble, execute_step, parse_step, signed, Console, ExecutionError, Memory, ObjectFile,
    Registers,
};

use crate::commands::{DebuggerCommand, ParsedCommand, COMMAND_TABLE};
use crate::AppResult;

const DUMP_WORDS: u16 = 128;
const DUMP_COLUMNS: u16 = 8;
const DISASM_LINES: usize = 16;

/*
 * A debugger session: the machine (registers and memory), the breakpoint
 * list and the console the running program talks through. Breakpoints
 * belong to the session, the executor only ever sees them through the
 * post-step check in `run`.
 */
pub struct Session<C: Console> {
    registers: Registers,
    memory: Memory,
    breakpoints: Vec<u16>,
    console: C,
    // ↓ true when the last program run ended in EXIT or a fault
    failed: bool,
}

impl<C: Console> Session<C> {
    pub fn new(console: C) -> Self {
        Self {
            registers: Registers::new(0x0000),
            memory: Memory::new(),
            breakpoints: Vec::new(),
            console,
            failed: false,
        }
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Execute one parsed command and return its printable output. Errors
    /// are diagnostics for stderr; they never leave the session half
    /// mutated.
    pub fn execute(&mut self, parsed: &ParsedCommand) -> AppResult<Vec<String>> {
        let mut output = match &parsed.command {
            DebuggerCommand::Run => self.run()?,
            DebuggerCommand::Step(count) => self.step(*count)?,
            DebuggerCommand::Break(address) => self.add_breakpoint(*address),
            DebuggerCommand::Delete(index) => self.delete_breakpoints(*index)?,
            DebuggerCommand::Info => self.list_breakpoints(),
            DebuggerCommand::Print => self.print_state(),
            DebuggerCommand::Dump(address) => self.dump(address.unwrap_or(self.registers.pc)),
            DebuggerCommand::Stack => self.dump(self.registers.gr[4]),
            DebuggerCommand::File(path) => self.load(path)?,
            DebuggerCommand::Jump(address) => {
                self.registers.pc = *address;
                Vec::new()
            }
            DebuggerCommand::Memory(address, value) => {
                self.memory.write(*address, *value);
                Vec::new()
            }
            DebuggerCommand::Disasm(address) => disassemble(
                address.unwrap_or(self.registers.pc),
                DISASM_LINES,
                &self.memory,
            ),
            DebuggerCommand::Help => self.help(),
            DebuggerCommand::Quit => Vec::new(),
        };

        if parsed.lists_state {
            output.extend(self.print_state());
        }

        Ok(output)
    }

    fn run(&mut self) -> AppResult<Vec<String>> {
        let mut output = Vec::new();

        loop {
            match execute_step(&mut self.registers, &mut self.memory, &mut self.console) {
                Ok(_) => (),
                Err(ExecutionError::Exited) => {
                    self.failed = true;
                    output.push("Program terminated.".to_owned());
                    break;
                }
                Err(error) => {
                    self.failed = true;
                    return Err(anyhow!(error));
                }
            }

            if let Some(index) = self
                .breakpoints
                .iter()
                .position(|&address| address == self.registers.pc)
            {
                output.push(format!(
                    "Breakpoint {}, at #0x{:04x}",
                    index + 1,
                    self.registers.pc
                ));
                break;
            }
        }

        Ok(output)
    }

    fn step(&mut self, count: u16) -> AppResult<Vec<String>> {
        let mut output = Vec::new();

        for _ in 0..count {
            match execute_step(&mut self.registers, &mut self.memory, &mut self.console) {
                Ok(log_line) => output.push(log_line.to_string()),
                Err(ExecutionError::Exited) => {
                    self.failed = true;
                    output.push("Program terminated.".to_owned());
                    break;
                }
                Err(error) => {
                    self.failed = true;
                    return Err(anyhow!(error));
                }
            }
        }

        Ok(output)
    }

    fn add_breakpoint(&mut self, address: u16) -> Vec<String> {
        self.breakpoints.push(address);

        vec![format!(
            "Breakpoint {} at #0x{:04x}",
            self.breakpoints.len(),
            address
        )]
    }

    fn delete_breakpoints(&mut self, index: Option<usize>) -> AppResult<Vec<String>> {
        match index {
            Some(index) => {
                if index == 0 || index > self.breakpoints.len() {
                    return Err(anyhow!("no breakpoint {}", index));
                }
                let address = self.breakpoints.remove(index - 1);

                Ok(vec![format!(
                    "Deleted breakpoint {} at #0x{:04x}",
                    index, address
                )])
            }
            None => {
                let answer = self.console.read_line("Delete all breakpoints? (y or n) ")?;
                if matches!(answer.trim(), "y" | "Y") {
                    self.breakpoints.clear();
                    Ok(vec!["All breakpoints deleted.".to_owned()])
                } else {
                    Ok(Vec::new())
                }
            }
        }
    }

    fn list_breakpoints(&self) -> Vec<String> {
        if self.breakpoints.is_empty() {
            vec!["No breakpoints set.".to_owned()]
        } else {
            self.breakpoints
                .iter()
                .enumerate()
                .map(|(index, address)| format!("{}: #0x{:04x}", index + 1, address))
                .collect()
        }
    }

    fn print_state(&self) -> Vec<String> {
        let (line, _) = parse_step(self.registers.pc, &self.memory);
        let mut output = vec![format!("PC    {}", line)];
        for (index, value) in self.registers.gr.iter().enumerate() {
            output.push(format!("GR{} = #0x{:04x} ({: >6})", index, value, signed(*value)));
        }
        output.push(format!("FR  = {}", self.registers.fr));

        output
    }

    fn dump(&self, start: u16) -> Vec<String> {
        let mut output = Vec::with_capacity((DUMP_WORDS / DUMP_COLUMNS) as usize);

        for row in 0..DUMP_WORDS / DUMP_COLUMNS {
            let base = start.wrapping_add(row * DUMP_COLUMNS);
            let mut words = String::new();
            let mut gutter = String::new();
            for column in 0..DUMP_COLUMNS {
                let word = self.memory.read(base.wrapping_add(column));
                words.push_str(&format!(" {:04x}", word));
                gutter.push(printable(word));
            }
            output.push(format!("#0x{:04x}:{}  {}", base, words, gutter));
        }

        output
    }

    fn load(&mut self, path: &Path) -> AppResult<Vec<String>> {
        let object = ObjectFile::from_file(path).map_err(|e| anyhow!(e))?;
        self.memory = Memory::load(object.words());
        self.registers = Registers::new(0x0000);
        self.breakpoints.clear();
        self.failed = false;

        Ok(vec![format!(
            "Loaded {} words from '{}'.",
            object.words().len(),
            path.display()
        )])
    }

    fn help(&self) -> Vec<String> {
        let mut output = vec!["Available commands:".to_owned()];
        for spec in COMMAND_TABLE {
            output.push(format!("  {: <22} {}", spec.usage, spec.summary));
        }

        output
    }
}

// words holding a printable character (low byte, 0x20..0x7F) show as it
fn printable(word: u16) -> char {
    match word {
        0x20..=0x7e => word as u8 as char,
        _ => '.',
    }
}
