//! Scoring programs against task instances.

use bfevo_core::Task;
use bfevo_ir::Program;
use bfevo_runtime::{Vm, VmConfig};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Aggregate result of running one program over a batch of instances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Sum of per-instance task fitness
    pub score: f64,
    /// Instances answered exactly
    pub exact_matches: usize,
    pub instances: usize,
}

/// Runs programs through the machine and scores them with a task
pub struct Evaluator<'a> {
    task: &'a dyn Task,
    vm: Vm,
}

impl<'a> Evaluator<'a> {
    pub fn new(task: &'a dyn Task, steps: usize) -> Self {
        Self {
            task,
            vm: Vm::new(VmConfig {
                max_steps: steps,
                tape_size: task.size(),
            }),
        }
    }

    /// Draw `instances` initial tapes from the task
    pub fn generate_inputs(&self, instances: usize, rng: &mut ChaCha8Rng) -> Vec<Vec<i32>> {
        (0..instances).map(|_| self.task.generate_input(rng)).collect()
    }

    /// Score `program` on exactly the given inputs
    pub fn evaluate(&self, program: &Program, inputs: &[Vec<i32>]) -> Evaluation {
        let mut evaluation = Evaluation {
            score: 0.0,
            exact_matches: 0,
            instances: inputs.len(),
        };

        for initial in inputs {
            let final_tape = self.vm.run(program, initial).tape;
            let fitness = self.task.fitness(initial, &final_tape);
            evaluation.score += fitness;
            if self.task.is_correct(initial, &final_tape) {
                evaluation.exact_matches += 1;
            }
        }

        evaluation
    }

    /// Score `program` on `instances` freshly generated inputs
    pub fn evaluate_fresh(
        &self,
        program: &Program,
        instances: usize,
        rng: &mut ChaCha8Rng,
    ) -> Evaluation {
        let inputs = self.generate_inputs(instances, rng);
        self.evaluate(program, &inputs)
    }
}

/// Score `program` on `task`.
///
/// With `inputs` the program is scored on exactly those tapes, which keeps a
/// generation on one shared benchmark. Without them `instances` tapes are
/// generated from `rng`.
pub fn evaluate(
    program: &Program,
    task: &dyn Task,
    steps: usize,
    instances: usize,
    inputs: Option<&[Vec<i32>]>,
    rng: &mut ChaCha8Rng,
) -> f64 {
    let evaluator = Evaluator::new(task, steps);
    match inputs {
        Some(inputs) => evaluator.evaluate(program, inputs).score,
        None => evaluator.evaluate_fresh(program, instances, rng).score,
    }
}
