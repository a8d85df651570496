use super::*;

/// # JZE - Jump on zero
pub fn jze(
    _memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution = cpu_instruction.addressing_mode.solve(registers);
    let eadr = resolution
        .effective_address
        .expect("JZE must have an effective address, crashing the application");

    registers.pc = if registers.fr == Flag::Zero {
        eadr
    } else {
        registers.pc.wrapping_add(resolution.size)
    };

    Ok(LogLine::new(
        cpu_instruction,
        format!("[PC=0x{:04x}]", registers.pc),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    fn branch(fr: Flag) -> u16 {
        let cpu_instruction =
            CPUInstruction::new(0x0000, 0x63, "JZE", AddressingMode::Address(0, 0x0040), jze);
        let (mut memory, mut registers) = get_stuff(0x0000, vec![0x6300, 0x0040]);
        registers.fr = fr;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();

        registers.pc
    }

    #[test]
    fn test_jze_taken_on_zero() {
        assert_eq!(0x0040, branch(Flag::Zero));
    }

    #[test]
    fn test_jze_not_taken_otherwise() {
        assert_eq!(0x0002, branch(Flag::Plus));
        assert_eq!(0x0002, branch(Flag::Minus));
    }
}
