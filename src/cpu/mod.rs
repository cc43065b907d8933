//! CPU emulation for the EMU14500B.
//!
//! This module implements the complete machine:
//! - 16 byte-wide memory cells
//! - an 8-bit accumulator and 8-bit program counter
//! - carry and zero flags
//! - a fixed 16-mnemonic instruction set

pub mod decode;
pub mod execute;
pub mod state;

pub use decode::{Fault, Instruction};
pub use execute::{execute, execute_line, Step};
pub use state::{CpuState, MEMORY_SIZE};
