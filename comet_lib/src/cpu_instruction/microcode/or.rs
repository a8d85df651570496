use super::*;

/// # OR - Bitwise or
pub fn or(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let gr = register_index(cpu_instruction)?;
    let resolution = cpu_instruction.addressing_mode.solve(registers);
    let eadr = resolution
        .effective_address
        .expect("OR must have an effective address, crashing the application");

    let word = memory.read(eadr);
    let res = registers.gr[gr] | word;
    registers.gr[gr] = res;
    registers.set_flag_from(res);
    registers.pc = registers.pc.wrapping_add(resolution.size);

    Ok(LogLine::new(
        cpu_instruction,
        format!("(0x{:04x})[GR{}=0x{:04x}][FR={}]", word, gr, res, registers.fr),
    ))
}
