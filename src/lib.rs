//! # EMU14500B
//!
//! An emulator of a minimal one-accumulator, byte-wide processor: a fixed
//! 16-mnemonic instruction set, 16 bytes of memory, an 8-bit accumulator
//! and program counter, and carry/zero flags.
//!
//! Programs are plain text, either stepped one instruction at a time
//! ([`cpu::execute_line`]) or run as a `;`/newline-delimited listing
//! ([`runner::run`]).

pub mod cpu;
pub mod runner;

// Re-export commonly used types
pub use cpu::{execute, execute_line, CpuState, Fault, Instruction, Step, MEMORY_SIZE};
pub use runner::{run, run_lines, Outcome, RunReport};
