use std::fmt;

use crate::memory::Memory;
use crate::word::{self, Flag};

/*
 * COMET registers
 * GR0..GR3 are general purpose. GR4 doubles as the stack pointer and, like
 * the others, may be selected as an index register; it points at the most
 * recently pushed word (full descending stack growing down from STACK_TOP).
 * PC holds the address of the next instruction to fetch, FR is tri-valued.
 */
pub const STACK_TOP: u16 = 0xff00;
pub const GR_COUNT: usize = 5;

pub struct Registers {
    pub gr: [u16; GR_COUNT],
    pub pc: u16,
    pub fr: Flag,
}

impl Registers {
    pub fn new(init_address: u16) -> Registers {
        Registers {
            gr: [0x0000, 0x0000, 0x0000, 0x0000, STACK_TOP],
            pc: init_address,
            fr: Flag::Zero,
        }
    }

    pub fn stack_push(&mut self, memory: &mut Memory, word: u16) {
        self.gr[4] = self.gr[4].wrapping_sub(1);
        memory.write(self.gr[4], word);
    }

    pub fn stack_pull(&mut self, memory: &Memory) -> u16 {
        let word = memory.read(self.gr[4]);
        self.gr[4] = self.gr[4].wrapping_add(1);

        word
    }

    pub fn set_flag_from(&mut self, word: u16) {
        self.fr = word::flag(word);
    }
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Registers [GR0:0x{:04x}, GR1:0x{:04x}, GR2:0x{:04x}, GR3:0x{:04x} | GR4:0x{:04x} PC:0x{:04x} | {}]",
            self.gr[0], self.gr[1], self.gr[2], self.gr[3], self.gr[4], self.pc, self.fr
        )
    }
}
