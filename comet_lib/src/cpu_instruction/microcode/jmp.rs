use super::*;

/// # JMP - Jump unconditional
pub fn jmp(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution = cpu_instruction.addressing_mode.solve(registers);
    let eadr = resolution
        .effective_address
        .expect("JMP must have an effective address, crashing the application");

    registers.pc = eadr;

    Ok(LogLine::new(
        cpu_instruction,
        format!("[PC=0x{:04x}]", registers.pc),
    ))
}
