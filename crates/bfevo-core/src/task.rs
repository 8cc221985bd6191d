//! Evaluation tasks: input generation and scoring over tape pairs.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Largest value a result cell can hold.
const CELL_MAX: i32 = i8::MAX as i32;

/// A scoring task a program is evolved against.
///
/// `fitness` follows the convention that `0.0` is a perfect answer and lower
/// values are worse. No upper bound is assumed by the search.
pub trait Task: Send + Sync {
    /// Short name used in logs and on the command line
    fn name(&self) -> &'static str;

    /// Number of tape cells an instance uses
    fn size(&self) -> usize;

    /// Produce one initial tape of exactly `size()` cells
    fn generate_input(&self, rng: &mut ChaCha8Rng) -> Vec<i32>;

    /// Score the final tape against the tape the program started from
    fn fitness(&self, initial: &[i32], final_tape: &[i8]) -> f64;

    /// Whether the final tape is an exact answer
    fn is_correct(&self, initial: &[i32], final_tape: &[i8]) -> bool {
        self.fitness(initial, final_tape) == 0.0
    }
}

/// Sum the first `arity` cells into cell 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SumTask {
    arity: usize,
    size: usize,
    min_value: i32,
    max_value: i32,
}

impl SumTask {
    /// Operand range clamped to non-negative values whose sum fits a cell
    fn operand_range(&self) -> (i32, i32) {
        let lo = self.min_value.max(0);
        let hi = self.max_value.min(CELL_MAX / self.arity as i32);
        (lo, hi.max(lo))
    }

    fn generate_input(&self, rng: &mut ChaCha8Rng) -> Vec<i32> {
        let (lo, hi) = self.operand_range();
        let mut tape: Vec<i32> = (0..self.arity).map(|_| rng.gen_range(lo..=hi)).collect();
        tape.resize(self.size, 0);
        tape
    }

    fn fitness(&self, initial: &[i32], final_tape: &[i8]) -> f64 {
        let expected: i32 = (0..self.arity)
            .map(|i| initial.get(i).copied().unwrap_or(0))
            .sum();
        let actual = final_tape.first().copied().unwrap_or(0) as i32;
        -((expected - actual).abs() as f64)
    }
}

/// Two-operand addition: `tape[0] + tape[1]` must end up in `tape[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditionTask {
    inner: SumTask,
}

impl AdditionTask {
    pub fn new(size: usize, min_value: i32, max_value: i32) -> Self {
        Self {
            inner: SumTask {
                arity: 2,
                size,
                min_value,
                max_value,
            },
        }
    }
}

impl Default for AdditionTask {
    fn default() -> Self {
        Self::new(8, -64, 63)
    }
}

impl Task for AdditionTask {
    fn name(&self) -> &'static str {
        "addition"
    }

    fn size(&self) -> usize {
        self.inner.size
    }

    fn generate_input(&self, rng: &mut ChaCha8Rng) -> Vec<i32> {
        self.inner.generate_input(rng)
    }

    fn fitness(&self, initial: &[i32], final_tape: &[i8]) -> f64 {
        self.inner.fitness(initial, final_tape)
    }
}

/// Three-operand addition: `tape[0] + tape[1] + tape[2]` into `tape[0]`.
///
/// Bounds are expected to keep the sum within a signed byte; the defaults do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripleAdditionTask {
    inner: SumTask,
}

impl TripleAdditionTask {
    pub fn new(size: usize, min_value: i32, max_value: i32) -> Self {
        Self {
            inner: SumTask {
                arity: 3,
                size,
                min_value,
                max_value,
            },
        }
    }
}

impl Default for TripleAdditionTask {
    fn default() -> Self {
        Self::new(8, 0, 42)
    }
}

impl Task for TripleAdditionTask {
    fn name(&self) -> &'static str {
        "triple"
    }

    fn size(&self) -> usize {
        self.inner.size
    }

    fn generate_input(&self, rng: &mut ChaCha8Rng) -> Vec<i32> {
        self.inner.generate_input(rng)
    }

    fn fitness(&self, initial: &[i32], final_tape: &[i8]) -> f64 {
        self.inner.fitness(initial, final_tape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_addition_fitness() {
        let task = AdditionTask::default();
        let initial = [5, 6, 0, 0, 0, 0, 0, 0];
        assert_eq!(task.fitness(&initial, &[11, 0, 0, 0, 0, 0, 0, 0]), 0.0);
        assert_eq!(task.fitness(&initial, &[10, 0, 0, 0, 0, 0, 0, 0]), -1.0);
        assert!(task.is_correct(&initial, &[11, 0, 0, 0, 0, 0, 0, 0]));
        assert!(!task.is_correct(&initial, &[12, 0, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_triple_addition_fitness() {
        let task = TripleAdditionTask::default();
        let initial = [5, 6, 7, 0, 0, 0, 0, 0];
        assert_eq!(task.fitness(&initial, &[18, 0, 0, 0, 0, 0, 0, 0]), 0.0);
        assert_eq!(task.fitness(&initial, &[17, 0, 0, 0, 0, 0, 0, 0]), -1.0);
    }

    #[test]
    fn test_addition_input_bounds() {
        let task = AdditionTask::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            let tape = task.generate_input(&mut rng);
            assert_eq!(tape.len(), 8);
            assert!(tape[0] >= 0 && tape[1] >= 0);
            assert!(tape[0] + tape[1] <= 127);
            assert!(tape[2..].iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn test_triple_addition_bounds() {
        let task = TripleAdditionTask::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for _ in 0..100 {
            let tape = task.generate_input(&mut rng);
            let (a, b, c) = (tape[0], tape[1], tape[2]);
            assert!(a >= 0 && b >= 0 && c >= 0);
            assert!(a + b + c <= 127);
        }
    }

    #[test]
    fn test_input_generation_is_reproducible() {
        let task = AdditionTask::default();
        let mut rng1 = ChaCha8Rng::seed_from_u64(7);
        let mut rng2 = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..10 {
            assert_eq!(task.generate_input(&mut rng1), task.generate_input(&mut rng2));
        }
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let task = AdditionTask::new(4, -20, -5);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let tape = task.generate_input(&mut rng);
        assert_eq!(tape, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_small_tape_is_truncated() {
        let task = TripleAdditionTask::new(1, 0, 42);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let tape = task.generate_input(&mut rng);
        assert_eq!(tape.len(), 1);
        // Missing operands count as zero
        assert_eq!(task.fitness(&tape, &[tape[0] as i8]), 0.0);
    }
}
