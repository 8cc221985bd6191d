//! Evolutionary search over tape programs.
//!
//! Each generation is scored on one shared batch of task instances, ranked,
//! and rebuilt from elites plus offspring bred by fitness-proportional
//! selection, crossover and mutation.

pub mod evaluator;
pub mod selection;
pub mod evolver;

pub use evaluator::{evaluate, Evaluation, Evaluator};
pub use selection::select;
pub use evolver::{EvolutionOutcome, Evolver, GenerationStats};
