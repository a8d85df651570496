use std::io;

use crate::cpu_instruction::microcode::{ExecutionError, Result as MicrocodeResult};
use crate::cpu_instruction::LogLine;
use crate::memory::Memory;
use crate::registers::Registers;

pub const INPUT_MAX_LEN: usize = 80;
pub const IN_PROMPT: &str = "IN > ";
pub const OUT_PREFIX: &str = "OUT> ";

/*
 * Console
 * The system call handlers talk to the outside world through this trait so
 * the core stays runnable against a scripted console in tests. The
 * debugger binary provides the stdin/stdout implementation.
 */
pub trait Console {
    /// Print the prompt and read one line, without its line terminator.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
    /// Write one line followed by a newline.
    fn write_line(&mut self, line: &str);
}

/*
 * Calling convention for IN and OUT: on entry mem[GR4] holds the return
 * address pushed by CALL, mem[GR4+1] the address of the length word and
 * mem[GR4+2] the buffer address. The handler pops only the return address
 * slot; the caller owns and reclaims the two argument words. Programs in
 * the wild rely on this byte for byte.
 */

/// IN system call, trapped at PC 0xFFF0. Reads one line, truncates it to
/// 80 characters, stores its length and its bytes one per word.
pub fn sys_in(
    registers: &mut Registers,
    memory: &mut Memory,
    console: &mut dyn Console,
) -> MicrocodeResult<LogLine> {
    let length_addr = memory.read(registers.gr[4].wrapping_add(1));
    let buffer_addr = memory.read(registers.gr[4].wrapping_add(2));

    let line = console.read_line(IN_PROMPT)?;
    let bytes: Vec<u8> = line.bytes().take(INPUT_MAX_LEN).collect();
    memory.write(length_addr, bytes.len() as u16);
    for (offset, byte) in bytes.iter().enumerate() {
        memory.write(buffer_addr.wrapping_add(offset as u16), *byte as u16);
    }

    let address = registers.pc;
    registers.pc = registers.stack_pull(memory);

    Ok(LogLine::system_call(
        address,
        "IN",
        format!("({} bytes)[PC=0x{:04x}]", bytes.len(), registers.pc),
    ))
}

/// OUT system call, trapped at PC 0xFFF2. Emits the buffer as one line of
/// characters, each word contributing its low 8 bits.
pub fn sys_out(
    registers: &mut Registers,
    memory: &mut Memory,
    console: &mut dyn Console,
) -> MicrocodeResult<LogLine> {
    let length_addr = memory.read(registers.gr[4].wrapping_add(1));
    let buffer_addr = memory.read(registers.gr[4].wrapping_add(2));

    let length = memory.read(length_addr);
    let mut text = String::with_capacity(length as usize);
    for offset in 0..length {
        let word = memory.read(buffer_addr.wrapping_add(offset));
        text.push((word & 0x00ff) as u8 as char);
    }
    console.write_line(&format!("{}{}", OUT_PREFIX, text));

    let address = registers.pc;
    registers.pc = registers.stack_pull(memory);

    Ok(LogLine::system_call(
        address,
        "OUT",
        format!("({} bytes)[PC=0x{:04x}]", length, registers.pc),
    ))
}

/// EXIT system call, trapped at PC 0xFFF4. Ends the program, not the
/// process: the debugger catches the error and keeps its session.
pub fn sys_exit(_registers: &mut Registers) -> MicrocodeResult<LogLine> {
    Err(ExecutionError::Exited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::STACK_TOP;

    struct ScriptedConsole {
        inputs: Vec<String>,
        outputs: Vec<String>,
    }

    impl ScriptedConsole {
        fn new(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().rev().map(|s| s.to_string()).collect(),
                outputs: Vec::new(),
            }
        }
    }

    impl Console for ScriptedConsole {
        fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
            self.inputs
                .pop()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input stream closed"))
        }

        fn write_line(&mut self, line: &str) {
            self.outputs.push(line.to_owned());
        }
    }

    // mimic `CALL 0xFFFx` with the two argument words already pushed
    fn syscall_frame(
        trap_address: u16,
        length_addr: u16,
        buffer_addr: u16,
    ) -> (Registers, Memory) {
        let mut registers = Registers::new(0x0000);
        let mut memory = Memory::new();
        registers.stack_push(&mut memory, buffer_addr);
        registers.stack_push(&mut memory, length_addr);
        registers.stack_push(&mut memory, 0x0006); // return address
        registers.pc = trap_address;

        (registers, memory)
    }

    #[test]
    fn test_sys_in() {
        let (mut registers, mut memory) = syscall_frame(0xfff0, 0x0030, 0x0040);
        let mut console = ScriptedConsole::new(&["HELLO"]);

        let log_line = sys_in(&mut registers, &mut memory, &mut console).unwrap();

        assert_eq!("IN".to_owned(), log_line.mnemonic);
        assert_eq!(5, memory.read(0x0030));
        assert_eq!('H' as u16, memory.read(0x0040));
        assert_eq!('O' as u16, memory.read(0x0044));
        assert_eq!(0x0006, registers.pc);
        // only the return address slot is popped
        assert_eq!(STACK_TOP - 2, registers.gr[4]);
    }

    #[test]
    fn test_sys_in_truncates_to_80_characters() {
        let (mut registers, mut memory) = syscall_frame(0xfff0, 0x0030, 0x0040);
        let long_line = "x".repeat(100);
        let mut console = ScriptedConsole::new(&[&long_line]);

        sys_in(&mut registers, &mut memory, &mut console).unwrap();

        assert_eq!(80, memory.read(0x0030));
        assert_eq!('x' as u16, memory.read(0x0040 + 79));
        assert_eq!(0x0000, memory.read(0x0040 + 80));
    }

    #[test]
    fn test_sys_in_on_closed_stream() {
        let (mut registers, mut memory) = syscall_frame(0xfff0, 0x0030, 0x0040);
        let mut console = ScriptedConsole::new(&[]);

        let error = sys_in(&mut registers, &mut memory, &mut console).unwrap_err();
        assert!(matches!(error, ExecutionError::Input(_)));
        // nothing was committed
        assert_eq!(0xfff0, registers.pc);
        assert_eq!(0x0000, memory.read(0x0030));
    }

    #[test]
    fn test_sys_out() {
        let (mut registers, mut memory) = syscall_frame(0xfff2, 0x0030, 0x0040);
        memory.write(0x0030, 5);
        for (offset, byte) in "WORLD".bytes().enumerate() {
            memory.write(0x0040 + offset as u16, byte as u16);
        }
        let mut console = ScriptedConsole::new(&[]);

        sys_out(&mut registers, &mut memory, &mut console).unwrap();

        assert_eq!(vec!["OUT> WORLD".to_owned()], console.outputs);
        assert_eq!(0x0006, registers.pc);
        assert_eq!(STACK_TOP - 2, registers.gr[4]);
    }

    #[test]
    fn test_sys_out_masks_high_byte() {
        let (mut registers, mut memory) = syscall_frame(0xfff2, 0x0030, 0x0040);
        memory.write(0x0030, 1);
        memory.write(0x0040, 0xff41); // high byte ignored, low byte is 'A'
        let mut console = ScriptedConsole::new(&[]);

        sys_out(&mut registers, &mut memory, &mut console).unwrap();

        assert_eq!(vec!["OUT> A".to_owned()], console.outputs);
    }

    #[test]
    fn test_sys_exit() {
        let mut registers = Registers::new(0xfff4);
        let error = sys_exit(&mut registers).unwrap_err();
        assert!(matches!(error, ExecutionError::Exited));
    }
}
