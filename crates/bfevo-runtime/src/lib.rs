//! Bounded tape machine for executing candidate programs.
//!
//! This module provides the execution environment for programs, including:
//! - A cyclic tape of wrapping signed bytes
//! - Step-budgeted execution, the only guard against non-terminating loops
//! - Bracket jumps that degrade to no-ops when unmatched
//!
//! Nothing here can fail: malformed programs, overflowing cells and pointer
//! movement past either end are all defined behavior.

pub mod machine;
pub mod tape;

pub use machine::{Execution, Machine};
pub use tape::{wrap_cell, Tape};

use bfevo_ir::Program;
use tracing::trace;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct VmConfig {
    /// Maximum instructions per run
    pub max_steps: usize,
    /// Number of tape cells
    pub tape_size: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            tape_size: 8,
        }
    }
}

/// The tape machine
#[derive(Debug, Clone)]
pub struct Vm {
    config: VmConfig,
}

impl Vm {
    pub fn new(config: VmConfig) -> Self {
        Self { config }
    }

    /// Run `program` on a fresh tape built from `initial`.
    ///
    /// A zero-sized tape has nothing to address, so the program is not run.
    pub fn run(&self, program: &Program, initial: &[i32]) -> Execution {
        let tape = Tape::new(self.config.tape_size, initial);
        let execution = Machine::new(program, tape).run(self.config.max_steps);
        trace!(
            steps_used = execution.steps_used,
            exhausted = execution.exhausted,
            "Program halted"
        );
        execution
    }
}

/// Execute `program` for up to `steps` instructions on a tape of `tape_size`
/// cells and return the final tape.
pub fn execute(program: &Program, steps: usize, tape_size: usize, initial: &[i32]) -> Vec<i8> {
    Vm::new(VmConfig {
        max_steps: steps,
        tape_size,
    })
    .run(program, initial)
    .tape
}
