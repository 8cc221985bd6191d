//! Per-run machine state.

use crate::tape::Tape;
use bfevo_ir::{BracketMap, Opcode, Program};

/// Result of running one program on one tape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Tape contents after halting
    pub tape: Vec<i8>,
    /// Instructions executed, jumps and no-ops included
    pub steps_used: usize,
    /// The step budget stopped the program before it ran off the end
    pub exhausted: bool,
}

/// A program loaded onto a tape, ready to run
pub struct Machine {
    code: Vec<Opcode>,
    brackets: BracketMap,
    tape: Tape,
    data_ptr: usize,
    instr_ptr: usize,
    steps_used: usize,
}

impl Machine {
    /// Load `program` onto `tape`. A zero-length tape has no cell to point
    /// at, so such a machine halts immediately without executing anything.
    pub fn new(program: &Program, tape: Tape) -> Self {
        Self {
            code: program.opcodes().collect(),
            brackets: BracketMap::build(program),
            tape,
            data_ptr: 0,
            instr_ptr: 0,
            steps_used: 0,
        }
    }

    pub fn halted(&self) -> bool {
        self.tape.is_empty() || self.instr_ptr >= self.code.len()
    }

    /// Execute one instruction. Returns false once the program has halted.
    pub fn step(&mut self) -> bool {
        if self.tape.is_empty() {
            return false;
        }
        let Some(&opcode) = self.code.get(self.instr_ptr) else {
            return false;
        };

        match opcode {
            Opcode::Right => self.data_ptr = self.tape.right(self.data_ptr),
            Opcode::Left => self.data_ptr = self.tape.left(self.data_ptr),
            Opcode::Inc => self.tape.add(self.data_ptr, 1),
            Opcode::Dec => self.tape.add(self.data_ptr, -1),
            Opcode::JumpIfZero => {
                if self.tape.get(self.data_ptr) == 0 {
                    if let Some(target) = self.brackets.partner(self.instr_ptr) {
                        self.instr_ptr = target;
                    }
                }
            }
            Opcode::JumpUnlessZero => {
                if self.tape.get(self.data_ptr) != 0 {
                    if let Some(target) = self.brackets.partner(self.instr_ptr) {
                        self.instr_ptr = target;
                    }
                }
            }
            Opcode::Output | Opcode::Input | Opcode::Nop => {}
        }

        self.instr_ptr += 1;
        self.steps_used += 1;
        true
    }

    /// Run until the program ends or `max_steps` instructions have executed
    pub fn run(mut self, max_steps: usize) -> Execution {
        while self.steps_used < max_steps && self.step() {}

        Execution {
            exhausted: !self.halted(),
            steps_used: self.steps_used,
            tape: self.tape.into_cells(),
        }
    }

    pub fn data_ptr(&self) -> usize {
        self.data_ptr
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_by_step() {
        let program = Program::from("+>+");
        let mut machine = Machine::new(&program, Tape::new(2, &[]));

        assert!(machine.step());
        assert_eq!(machine.tape().cells(), &[1, 0]);
        assert!(machine.step());
        assert_eq!(machine.data_ptr(), 1);
        assert!(machine.step());
        assert_eq!(machine.tape().cells(), &[1, 1]);
        assert!(machine.halted());
        assert!(!machine.step());
    }

    #[test]
    fn test_run_reports_exhaustion() {
        let program = Program::from("+[]");
        let execution = Machine::new(&program, Tape::new(1, &[])).run(50);
        assert!(execution.exhausted);
        assert_eq!(execution.steps_used, 50);

        let program = Program::from("++");
        let execution = Machine::new(&program, Tape::new(1, &[])).run(50);
        assert!(!execution.exhausted);
        assert_eq!(execution.steps_used, 2);
        assert_eq!(execution.tape, vec![2]);
    }

    #[test]
    fn test_zero_length_tape_does_not_run() {
        let program = Program::from("><+-[]");
        let mut machine = Machine::new(&program, Tape::new(0, &[]));
        assert!(machine.halted());
        assert!(!machine.step());

        let execution = Machine::new(&program, Tape::new(0, &[])).run(100);
        assert!(!execution.exhausted);
        assert_eq!(execution.steps_used, 0);
        assert!(execution.tape.is_empty());
    }
}
