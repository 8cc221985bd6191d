//! Mutation and crossover operators for programs.

use crate::instruction::random_symbol;
use crate::program::Program;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct MutationConfig {
    /// Probability of an edit at each position, and of the trailing append
    pub mutation_rate: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self { mutation_rate: 0.1 }
    }
}

/// Edit applied at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Substitute,
    Delete,
    Insert,
}

impl Edit {
    fn random(rng: &mut ChaCha8Rng) -> Self {
        match rng.gen_range(0..3) {
            0 => Edit::Substitute,
            1 => Edit::Delete,
            _ => Edit::Insert,
        }
    }
}

pub struct Mutator {
    config: MutationConfig,
}

impl Mutator {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }

    /// Return a mutated copy of `program`.
    ///
    /// The scan walks the code as it is being edited. A deletion leaves the
    /// cursor in place so the byte that slides into it is considered next; an
    /// insertion moves the cursor past both the new and the original byte.
    /// Length is never capped.
    pub fn mutate(&self, program: &Program, rng: &mut ChaCha8Rng) -> Program {
        let rate = self.config.mutation_rate;
        let mut code = program.as_bytes().to_vec();

        let mut i = 0;
        while i < code.len() {
            if rng.gen::<f64>() < rate {
                match Edit::random(rng) {
                    Edit::Substitute => code[i] = random_symbol(rng),
                    Edit::Delete => {
                        code.remove(i);
                        continue;
                    }
                    Edit::Insert => {
                        code.insert(i, random_symbol(rng));
                        i += 1;
                    }
                }
            }
            i += 1;
        }

        if rng.gen::<f64>() < rate {
            code.push(random_symbol(rng));
        }

        Program::from_bytes(code)
    }

    /// Cross two parents at independent random cut points.
    ///
    /// Each cut point ranges over `0..=len`, so the child may be all of one
    /// parent, all of the other, or empty.
    pub fn crossover(&self, parent1: &Program, parent2: &Program, rng: &mut ChaCha8Rng) -> Program {
        if parent1.is_empty() && parent2.is_empty() {
            return Program::new();
        }

        let cut1 = rng.gen_range(0..=parent1.len());
        let cut2 = rng.gen_range(0..=parent2.len());
        splice(parent1, parent2, cut1, cut2)
    }
}

/// `parent1[..cut1]` followed by `parent2[cut2..]`. Cuts are clamped to the parent lengths.
pub fn splice(parent1: &Program, parent2: &Program, cut1: usize, cut2: usize) -> Program {
    let head = &parent1.as_bytes()[..cut1.min(parent1.len())];
    let tail = &parent2.as_bytes()[cut2.min(parent2.len())..];

    let mut code = Vec::with_capacity(head.len() + tail.len());
    code.extend_from_slice(head);
    code.extend_from_slice(tail);
    Program::from_bytes(code)
}
