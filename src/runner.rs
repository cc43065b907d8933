//! Program runner: batch execution of instruction listings.
//!
//! A listing is one or more instructions joined by `;`, newlines, or both:
//!
//! ```text
//! LDA 00; INC; STORE 01
//! RLC
//! HALT
//! ```
//!
//! The runner splits the source, tokenizes each line into a mnemonic and an
//! optional operand, and dispatches to the engine strictly in order. HALT
//! stops the run; faults are recorded per line and the run continues.

use crate::cpu::{execute, CpuState, Fault, Instruction, Step};
use serde::{Deserialize, Serialize};

/// The result of dispatching one non-blank line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// 1-based position among the dispatched lines.
    pub line: usize,
    /// The raw line text, trimmed.
    pub text: String,
    /// The executed instruction, or the fault it produced.
    pub result: Result<Instruction, Fault>,
}

/// Ordered per-line outcomes of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
    /// True when the run ended on HALT rather than by exhausting the input.
    pub halted: bool,
}

impl RunReport {
    /// The faults recorded during the run, in order.
    pub fn faults(&self) -> impl Iterator<Item = (&Outcome, &Fault)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|f| (o, f)))
    }
}

/// Split an assembly listing into instruction lines.
///
/// Delimiters are `;` and line breaks; empty segments are dropped.
pub fn split_source(source: &str) -> Vec<&str> {
    source
        .split(|c| c == ';' || c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a line into a mnemonic and optional operand.
///
/// Tokens beyond the second are ignored. Returns `None` for a blank line.
pub fn tokenize(line: &str) -> Option<(&str, Option<&str>)> {
    let mut parts = line.split_whitespace();
    let mnemonic = parts.next()?;
    Some((mnemonic, parts.next()))
}

/// Run an assembly listing against the machine state.
pub fn run(state: &mut CpuState, source: &str) -> RunReport {
    run_lines(state, split_source(source))
}

/// Run pre-split instruction lines against the machine state.
///
/// Blank lines are skipped without invoking the engine. On HALT the run stops
/// immediately; on a fault the line's outcome records it and the run
/// continues with the next line.
pub fn run_lines<'a, I>(state: &mut CpuState, lines: I) -> RunReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut outcomes = Vec::new();
    let mut halted = false;

    for raw in lines {
        let Some((mnemonic, operand)) = tokenize(raw) else {
            continue;
        };

        let line = outcomes.len() + 1;
        let result = Instruction::parse(mnemonic, operand).and_then(|instr| {
            let step = execute(state, &instr)?;
            if step == Step::Halted {
                halted = true;
            }
            Ok(instr)
        });

        outcomes.push(Outcome {
            line,
            text: raw.trim().to_string(),
            result,
        });

        if halted {
            break;
        }
    }

    RunReport { outcomes, halted }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_source_on_semicolons_and_newlines() {
        let lines = split_source("LDA 00; INC\nSTORE 01\r\n; HALT");
        assert_eq!(lines, vec!["LDA 00", "INC", "STORE 01", "HALT"]);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("LDA 0F"), Some(("LDA", Some("0F"))));
        assert_eq!(tokenize("  HALT  "), Some(("HALT", None)));
        assert_eq!(tokenize("LDA 0F trailing"), Some(("LDA", Some("0F"))));
        assert_eq!(tokenize("   "), None);
    }

    #[test]
    fn test_run_simple_program() {
        let mut state = CpuState::new();
        let report = run(&mut state, "INC; INC; STORE 03; HALT");

        assert!(report.halted);
        assert_eq!(report.outcomes.len(), 4);
        assert!(report.outcomes.iter().all(|o| o.result.is_ok()));
        assert_eq!(state.accumulator, 2);
        assert_eq!(state.read_mem(0x3).unwrap(), 2);
    }

    #[test]
    fn test_halt_stops_mid_listing() {
        let mut state = CpuState::new();
        let report = run(&mut state, "INC; HALT; INC; INC");

        assert!(report.halted);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(state.accumulator, 1);
    }

    #[test]
    fn test_faults_are_non_fatal() {
        let mut state = CpuState::new();
        state.write_mem(0x0, 0xAA).unwrap();

        let report = run_lines(&mut state, ["LDA 00", "AND FOO", "HALT"]);

        assert!(report.halted);
        assert_eq!(report.outcomes.len(), 3);
        assert!(report.outcomes[0].result.is_ok());
        assert!(matches!(
            report.outcomes[1].result,
            Err(Fault::MalformedOperand { .. })
        ));
        assert_eq!(report.outcomes[2].result, Ok(Instruction::Halt));
        // The accumulator keeps whatever LDA 00 produced
        assert_eq!(state.accumulator, 0xAA);
    }

    #[test]
    fn test_unknown_instruction_reported_and_run_continues() {
        let mut state = CpuState::new();
        let report = run(&mut state, "FROB; INC");

        assert!(!report.halted);
        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(
            report.outcomes[0].result,
            Err(Fault::UnknownInstruction { .. })
        ));
        assert_eq!(state.accumulator, 1);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let mut state = CpuState::new();
        let report = run(&mut state, "\n\n  ;  ; INC ;; \n HALT");

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].text, "INC");
        assert_eq!(report.outcomes[1].text, "HALT");
    }

    #[test]
    fn test_exhausted_input_is_not_halted() {
        let mut state = CpuState::new();
        let report = run(&mut state, "INC; INC");
        assert!(!report.halted);
        assert_eq!(state.accumulator, 2);
    }

    #[test]
    fn test_faults_accessor() {
        let mut state = CpuState::new();
        let report = run(&mut state, "FROB; INC; STORE 1F");

        let faults: Vec<_> = report.faults().collect();
        assert_eq!(faults.len(), 2);
        assert_eq!(faults[0].0.line, 1);
        assert_eq!(faults[1].0.line, 3);
        assert_eq!(
            *faults[1].1,
            Fault::AddressOutOfRange { addr: 0x1F }
        );
    }
}
