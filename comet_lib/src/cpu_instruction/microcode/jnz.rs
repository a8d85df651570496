use super::*;

/// # JNZ - Jump on non zero
pub fn jnz(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution = cpu_instruction.addressing_mode.solve(registers);
    let eadr = resolution
        .effective_address
        .expect("JNZ must have an effective address, crashing the application");

    registers.pc = if registers.fr != Flag::Zero {
        eadr
    } else {
        registers.pc.wrapping_add(resolution.size)
    };

    Ok(LogLine::new(
        cpu_instruction,
        format!("[PC=0x{:04x}]", registers.pc),
    ))
}
