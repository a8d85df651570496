use super::*;

/// # ADD - Add word
///
/// Adds the word at the effective address to GRg, wrapping modulo 2^16.
/// FR is set from the 16 bit result, so a wrapped sum can read as MINUS.
pub fn add(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let gr = register_index(cpu_instruction)?;
    let resolution = cpu_instruction.addressing_mode.solve(registers);
    let eadr = resolution
        .effective_address
        .expect("ADD must have an effective address, crashing the application");

    let word = memory.read(eadr);
    let res = registers.gr[gr].wrapping_add(word);
    registers.gr[gr] = res;
    registers.set_flag_from(res);
    registers.pc = registers.pc.wrapping_add(resolution.size);

    Ok(LogLine::new(
        cpu_instruction,
        format!("(0x{:04x})[GR{}=0x{:04x}][FR={}]", word, gr, res, registers.fr),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_add() {
        let cpu_instruction = CPUInstruction::new(
            0x0000,
            0x20,
            "ADD",
            AddressingMode::RegisterAddress(0, 0, 0x0100),
            add,
        );
        let (mut memory, mut registers) = get_stuff(0x0000, vec![0x2000, 0x0100]);
        registers.gr[0] = 0x0003;
        memory.write(0x0100, 0x0004);
        let log_line = cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x0007, registers.gr[0]);
        assert_eq!(Flag::Plus, registers.fr);
        assert_eq!(0x0002, registers.pc);
        assert_eq!(
            "#0x0000: (2000 0100)  ADD  GR0, #0100       (0x0004)[GR0=0x0007][FR=PLUS]",
            log_line.to_string()
        );
    }

    #[test]
    fn test_add_wraps_modulo_64k() {
        let cpu_instruction = CPUInstruction::new(
            0x0000,
            0x20,
            "ADD",
            AddressingMode::RegisterAddress(1, 0, 0x0100),
            add,
        );
        let (mut memory, mut registers) = get_stuff(0x0000, vec![0x2010, 0x0100]);
        registers.gr[1] = 0xffff;
        memory.write(0x0100, 0x0001);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x0000, registers.gr[1]);
        assert_eq!(Flag::Zero, registers.fr);
    }

    #[test]
    fn test_add_negative_result() {
        let cpu_instruction = CPUInstruction::new(
            0x0000,
            0x20,
            "ADD",
            AddressingMode::RegisterAddress(0, 0, 0x0100),
            add,
        );
        let (mut memory, mut registers) = get_stuff(0x0000, vec![0x2000, 0x0100]);
        registers.gr[0] = 0x7fff;
        memory.write(0x0100, 0x0001);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x8000, registers.gr[0]);
        assert_eq!(Flag::Minus, registers.fr);
    }
}
