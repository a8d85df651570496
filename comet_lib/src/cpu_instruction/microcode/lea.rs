use super::*;

/// # LEA - Load effective address
///
/// Loads the effective address itself into GRg, which makes it the
/// immediate-load of the COMET instruction set. Unlike LD it updates FR
/// from the loaded value.
pub fn lea(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let gr = register_index(cpu_instruction)?;
    let resolution = cpu_instruction.addressing_mode.solve(registers);
    let eadr = resolution
        .effective_address
        .expect("LEA must have an effective address, crashing the application");

    registers.gr[gr] = eadr;
    registers.set_flag_from(eadr);
    registers.pc = registers.pc.wrapping_add(resolution.size);

    Ok(LogLine::new(
        cpu_instruction,
        format!("[GR{}=0x{:04x}][FR={}]", gr, eadr, registers.fr),
    ))
}
