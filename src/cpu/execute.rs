//! Instruction execution for the EMU14500B.
//!
//! The engine is a pure state transition: `(CpuState, Instruction)` in, an
//! updated `CpuState` out, or a typed [`Fault`] that leaves the state
//! untouched. It holds no control-flow state of its own; HALT is reported to
//! the caller as [`Step::Halted`] and it is the caller's job to stop issuing
//! instructions.

use crate::cpu::decode::{Fault, Instruction};
use crate::cpu::state::CpuState;
use serde::{Deserialize, Serialize};

/// What the caller should do after a successful step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Keep dispatching instructions.
    Continue,
    /// HALT was executed; stop issuing further instructions.
    Halted,
}

/// Execute one decoded instruction against the machine state.
///
/// On a fault the state is left bit-for-bit unchanged: address validation
/// happens through [`CpuState::read_mem`]/[`CpuState::write_mem`] before any
/// register is written.
pub fn execute(state: &mut CpuState, instr: &Instruction) -> Result<Step, Fault> {
    match *instr {
        Instruction::Nop => {
            state.advance_pc();
        }

        Instruction::Lda { addr } | Instruction::Move { addr } => {
            state.accumulator = state.read_mem(addr)?;
        }

        Instruction::And { addr } => {
            let operand = state.read_mem(addr)?;
            state.accumulator &= operand;
        }

        Instruction::Ora { addr } => {
            let operand = state.read_mem(addr)?;
            state.accumulator |= operand;
        }

        Instruction::Xor { addr } => {
            let operand = state.read_mem(addr)?;
            state.accumulator ^= operand;
        }

        Instruction::Invert => {
            state.accumulator = !state.accumulator;
        }

        Instruction::Store { addr } => {
            state.write_mem(addr, state.accumulator)?;
        }

        Instruction::Jmp { addr } => {
            state.jump(addr);
        }

        Instruction::Jz { addr } => {
            if state.zero_flag {
                state.jump(addr);
            } else {
                state.advance_pc();
            }
        }

        Instruction::Jc { addr } => {
            if state.carry_flag {
                state.jump(addr);
            } else {
                state.advance_pc();
            }
        }

        // Circular 8-bit rotations: the carry flag captures the bit that
        // wraps from one end to the other. Not a 9-bit rotate-through-carry.
        Instruction::Rlc => {
            state.carry_flag = state.accumulator & 0x80 != 0;
            state.accumulator = state.accumulator.rotate_left(1);
        }

        Instruction::Rrc => {
            state.carry_flag = state.accumulator & 0x01 != 0;
            state.accumulator = state.accumulator.rotate_right(1);
        }

        // INC/DEC wrap modulo 256 and touch neither flag.
        Instruction::Inc => {
            state.accumulator = state.accumulator.wrapping_add(1);
        }

        Instruction::Dec => {
            state.accumulator = state.accumulator.wrapping_sub(1);
        }

        Instruction::Halt => {
            return Ok(Step::Halted);
        }
    }

    Ok(Step::Continue)
}

/// Parse-then-execute a single instruction given as raw text.
///
/// The single-step entry point for callers holding an undecoded
/// `(mnemonic, optional operand)` pair.
pub fn execute_line(
    state: &mut CpuState,
    mnemonic: &str,
    operand: Option<&str>,
) -> Result<Step, Fault> {
    let instr = Instruction::parse(mnemonic, operand)?;
    execute(state, &instr)
}
