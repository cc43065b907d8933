//! CPU state for the EMU14500B.
//!
//! The machine is deliberately tiny:
//! - A: 8-bit accumulator (the only working register)
//! - PC: 8-bit program counter
//! - 16 bytes of memory, addressed by a 4-bit index (0x0-0xF)
//! - Two flags: carry and zero

use crate::cpu::decode::Fault;
use serde::{Deserialize, Serialize};

/// The number of addressable memory cells.
pub const MEMORY_SIZE: usize = 16;

/// The complete machine state.
///
/// One instance exists per run session, zero-initialized at the start and
/// mutated in place by successive instruction executions. The program counter
/// is advisory: instructions are supplied externally one at a time, so the
/// engine never fetches through it. It only tracks NOP advances and jump
/// targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuState {
    /// A: the accumulator. Wraps modulo 256 on INC/DEC/rotate.
    pub accumulator: u8,

    /// PC: the program counter. Written by NOP and the jump instructions.
    pub program_counter: u8,

    /// Main memory: 16 bytes, 4-bit address space.
    pub memory: [u8; MEMORY_SIZE],

    /// Set by RLC/RRC to the bit rotated across; consumed by JC.
    pub carry_flag: bool,

    /// Consumed by JZ. No instruction in the current set ever writes it.
    pub zero_flag: bool,
}

impl CpuState {
    /// Create a new machine state with everything zeroed.
    pub fn new() -> Self {
        Self {
            accumulator: 0,
            program_counter: 0,
            memory: [0; MEMORY_SIZE],
            carry_flag: false,
            zero_flag: false,
        }
    }

    /// Reset everything back to the power-on state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read a memory cell.
    ///
    /// Addresses outside 0x0-0xF are a fault, never a wraparound.
    pub fn read_mem(&self, addr: u8) -> Result<u8, Fault> {
        self.check_addr(addr)?;
        Ok(self.memory[addr as usize])
    }

    /// Write a memory cell, with the same address validation as `read_mem`.
    pub fn write_mem(&mut self, addr: u8, value: u8) -> Result<(), Fault> {
        self.check_addr(addr)?;
        self.memory[addr as usize] = value;
        Ok(())
    }

    fn check_addr(&self, addr: u8) -> Result<(), Fault> {
        if (addr as usize) < MEMORY_SIZE {
            Ok(())
        } else {
            Err(Fault::AddressOutOfRange { addr })
        }
    }

    /// Increment the program counter by 1, wrapping modulo 256.
    pub fn advance_pc(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(1);
    }

    /// Set the program counter to an absolute address.
    ///
    /// Jump targets take the full byte; only memory-addressed instructions
    /// enforce the 4-bit window.
    pub fn jump(&mut self, addr: u8) {
        self.program_counter = addr;
    }
}

impl Default for CpuState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CpuState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PC: {}, ACC: {:02X}, ZF: {}, CF: {}",
            self.program_counter, self.accumulator, self.zero_flag, self.carry_flag
        )
    }
}
