//! Instruction decoding for the EMU14500B.
//!
//! Programs arrive as text, one instruction per line: a mnemonic followed by
//! an optional hexadecimal byte operand (`LDA 0F`, `RLC`, `JMP 0x1A`).
//! Mnemonics are case-insensitive. Decoding happens once, up front; execution
//! dispatches on the resulting enum, never on strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A decoded instruction.
///
/// The set is closed: one variant per mnemonic (LDA and MOVE share their
/// effect but keep separate mnemonics). Instructions that reference memory or
/// a jump target carry their address operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// No operation; advances the program counter only.
    Nop,

    /// Load accumulator: A := M[addr]
    Lda { addr: u8 },

    /// Move memory to accumulator: A := M[addr] (same effect as LDA, kept as
    /// its own mnemonic)
    Move { addr: u8 },

    /// AND with accumulator: A := A & M[addr]
    And { addr: u8 },

    /// OR with accumulator: A := A | M[addr]
    Ora { addr: u8 },

    /// XOR with accumulator: A := A ^ M[addr]
    Xor { addr: u8 },

    /// Invert accumulator: A := !A
    Invert,

    /// Store accumulator: M[addr] := A
    Store { addr: u8 },

    /// Unconditional jump: PC := addr
    Jmp { addr: u8 },

    /// Jump if zero flag set, else PC += 1
    Jz { addr: u8 },

    /// Jump if carry flag set, else PC += 1
    Jc { addr: u8 },

    /// Rotate accumulator left; carry := old bit 7
    Rlc,

    /// Rotate accumulator right; carry := old bit 0
    Rrc,

    /// Increment accumulator, wrapping modulo 256
    Inc,

    /// Decrement accumulator, wrapping modulo 256
    Dec,

    /// Halt: stop dispatching further instructions
    Halt,
}

impl Instruction {
    /// Parse a mnemonic and optional operand into an instruction.
    ///
    /// An operand supplied where none is required is ignored; a required
    /// operand that is missing or not a valid hex byte is a
    /// [`Fault::MalformedOperand`].
    pub fn parse(mnemonic: &str, operand: Option<&str>) -> Result<Self, Fault> {
        let upper = mnemonic.to_uppercase();

        let instr = match upper.as_str() {
            "NOP" => Instruction::Nop,
            "LDA" => Instruction::Lda {
                addr: parse_operand(&upper, operand)?,
            },
            "MOVE" => Instruction::Move {
                addr: parse_operand(&upper, operand)?,
            },
            "AND" => Instruction::And {
                addr: parse_operand(&upper, operand)?,
            },
            "OR" | "ORA" => Instruction::Ora {
                addr: parse_operand(&upper, operand)?,
            },
            "XOR" => Instruction::Xor {
                addr: parse_operand(&upper, operand)?,
            },
            "INVERT" => Instruction::Invert,
            "STORE" => Instruction::Store {
                addr: parse_operand(&upper, operand)?,
            },
            "JMP" => Instruction::Jmp {
                addr: parse_operand(&upper, operand)?,
            },
            "JZ" => Instruction::Jz {
                addr: parse_operand(&upper, operand)?,
            },
            "JC" => Instruction::Jc {
                addr: parse_operand(&upper, operand)?,
            },
            "RLC" => Instruction::Rlc,
            "RRC" => Instruction::Rrc,
            "INC" => Instruction::Inc,
            "DEC" => Instruction::Dec,
            "HALT" => Instruction::Halt,
            _ => {
                return Err(Fault::UnknownInstruction {
                    mnemonic: mnemonic.to_string(),
                })
            }
        };

        Ok(instr)
    }

    /// The canonical mnemonic for this instruction.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Nop => "NOP",
            Instruction::Lda { .. } => "LDA",
            Instruction::Move { .. } => "MOVE",
            Instruction::And { .. } => "AND",
            Instruction::Ora { .. } => "ORA",
            Instruction::Xor { .. } => "XOR",
            Instruction::Invert => "INVERT",
            Instruction::Store { .. } => "STORE",
            Instruction::Jmp { .. } => "JMP",
            Instruction::Jz { .. } => "JZ",
            Instruction::Jc { .. } => "JC",
            Instruction::Rlc => "RLC",
            Instruction::Rrc => "RRC",
            Instruction::Inc => "INC",
            Instruction::Dec => "DEC",
            Instruction::Halt => "HALT",
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Lda { addr }
            | Instruction::Move { addr }
            | Instruction::And { addr }
            | Instruction::Ora { addr }
            | Instruction::Xor { addr }
            | Instruction::Store { addr }
            | Instruction::Jmp { addr }
            | Instruction::Jz { addr }
            | Instruction::Jc { addr } => write!(f, "{} {:02X}", self.mnemonic(), addr),
            _ => write!(f, "{}", self.mnemonic()),
        }
    }
}

/// Parse a required hexadecimal byte operand.
///
/// Bare hex (`1F`) is the canonical form; a leading `0x` is accepted.
fn parse_operand(mnemonic: &str, operand: Option<&str>) -> Result<u8, Fault> {
    let raw = operand.ok_or_else(|| Fault::MalformedOperand {
        mnemonic: mnemonic.to_string(),
        operand: None,
    })?;

    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);

    u8::from_str_radix(digits, 16).map_err(|_| Fault::MalformedOperand {
        mnemonic: mnemonic.to_string(),
        operand: Some(raw.to_string()),
    })
}

/// Typed, non-fatal failures from instruction decode or execution.
///
/// A fault never mutates [`CpuState`](crate::cpu::CpuState); the caller may
/// report it and continue with the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Fault {
    #[error("unknown instruction: {mnemonic}")]
    UnknownInstruction { mnemonic: String },

    #[error("malformed operand for {mnemonic}: {}", .operand.as_deref().unwrap_or("<missing>"))]
    MalformedOperand {
        mnemonic: String,
        operand: Option<String>,
    },

    #[error("address {addr:#04X} out of range (0x0-0xF)")]
    AddressOutOfRange { addr: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_operand_instructions() {
        assert_eq!(Instruction::parse("NOP", None).unwrap(), Instruction::Nop);
        assert_eq!(Instruction::parse("RLC", None).unwrap(), Instruction::Rlc);
        assert_eq!(Instruction::parse("HALT", None).unwrap(), Instruction::Halt);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            Instruction::parse("lda", Some("0a")).unwrap(),
            Instruction::Lda { addr: 0x0A }
        );
        assert_eq!(Instruction::parse("Halt", None).unwrap(), Instruction::Halt);
    }

    #[test]
    fn test_parse_hex_operand() {
        assert_eq!(
            Instruction::parse("STORE", Some("0F")).unwrap(),
            Instruction::Store { addr: 0x0F }
        );
        // Jump targets take the full byte
        assert_eq!(
            Instruction::parse("JMP", Some("FF")).unwrap(),
            Instruction::Jmp { addr: 0xFF }
        );
    }

    #[test]
    fn test_parse_accepts_0x_prefix() {
        assert_eq!(
            Instruction::parse("LDA", Some("0x01")).unwrap(),
            Instruction::Lda { addr: 0x01 }
        );
    }

    #[test]
    fn test_or_and_ora_are_the_same_operation() {
        let a = Instruction::parse("OR", Some("03")).unwrap();
        let b = Instruction::parse("ORA", Some("03")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Instruction::Ora { addr: 0x03 });
    }

    #[test]
    fn test_missing_required_operand() {
        let err = Instruction::parse("LDA", None).unwrap_err();
        assert!(matches!(err, Fault::MalformedOperand { operand: None, .. }));
    }

    #[test]
    fn test_non_hex_operand() {
        let err = Instruction::parse("AND", Some("FOO")).unwrap_err();
        assert!(matches!(
            err,
            Fault::MalformedOperand {
                operand: Some(ref op),
                ..
            } if op == "FOO"
        ));
    }

    #[test]
    fn test_extra_operand_is_ignored() {
        assert_eq!(
            Instruction::parse("INC", Some("05")).unwrap(),
            Instruction::Inc
        );
    }

    #[test]
    fn test_unknown_mnemonic() {
        let err = Instruction::parse("FROB", Some("01")).unwrap_err();
        assert!(matches!(
            err,
            Fault::UnknownInstruction { ref mnemonic } if mnemonic == "FROB"
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Instruction::Lda { addr: 0x0A }), "LDA 0A");
        assert_eq!(format!("{}", Instruction::Halt), "HALT");
    }
}
