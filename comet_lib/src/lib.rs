mod addressing_mode;
mod cpu_instruction;
mod memory;
mod object_file;
mod processing_unit;
mod registers;
mod system_call;
mod word;

pub use addressing_mode::{AddressingMode, AddressingModeResolution};
pub use cpu_instruction::microcode::{ExecutionError, Result as ExecutionResult};
pub use cpu_instruction::{CPUInstruction, LogLine};
pub use memory::{Memory, MEMMAX};
pub use object_file::{ObjectFile, ObjectFileError, HEADER_LEN, OBJECT_MAGIC};
pub use processing_unit::{
    disassemble, execute_step, parse_step, resolve_opcode, SYSCALL_EXIT_ADDR, SYSCALL_IN_ADDR,
    SYSCALL_OUT_ADDR,
};
pub use registers::{Registers, GR_COUNT, STACK_TOP};
pub use system_call::{Console, IN_PROMPT, INPUT_MAX_LEN, OUT_PREFIX};
pub use word::{flag, sat16, signed, unsigned, Flag};
