//! Generational evolution engine.

use crate::evaluator::{Evaluation, Evaluator};
use crate::selection::select;
use bfevo_core::{EvolutionConfig, Task};
use bfevo_ir::{MutationConfig, Mutator, Program};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Summary of one evaluated generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// 1-based generation number
    pub generation: usize,
    pub population_size: usize,
    pub best_score: f64,
    pub average_score: f64,
    /// Exact answers of the best program on this generation's instances
    pub exact_matches: usize,
    /// Best score seen in any generation so far
    pub best_ever_score: f64,
}

/// Result of a full run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    /// Best program of the final population, scored on a fresh batch
    pub best_program: Program,
    /// Score of `best_program` on that fresh batch
    pub best_score: f64,
    pub exact_matches: usize,
    pub instances: usize,
    /// Best program seen during the generational loop
    pub best_ever_program: Program,
    pub best_ever_score: f64,
    pub final_population_size: usize,
    pub history: Vec<GenerationStats>,
}

/// State left behind by the generational loop
struct Generations {
    population: Vec<Program>,
    best_ever_program: Program,
    best_ever_score: f64,
    history: Vec<GenerationStats>,
}

pub struct Evolver {
    config: EvolutionConfig,
    mutator: Mutator,
}

impl Evolver {
    pub fn new(config: EvolutionConfig) -> Self {
        let mutator = Mutator::new(MutationConfig {
            mutation_rate: config.mutation_rate,
        });
        Self { config, mutator }
    }

    /// Run every generation against `task`, then score the last population
    /// on one fresh batch and return its best member.
    ///
    /// The returned program and score come from that final round, which is
    /// not necessarily the best-ever pair also reported in the outcome.
    #[instrument(skip_all, fields(task = task.name(), generations = self.config.generations))]
    pub fn evolve(&self, task: &dyn Task, rng: &mut ChaCha8Rng) -> EvolutionOutcome {
        let evaluator = Evaluator::new(task, self.config.steps);
        let run = self.run_generations(&evaluator, rng);

        let inputs = evaluator.generate_inputs(self.config.instances, rng);
        let (best_program, best_eval) = best_of(&run.population, &evaluator, &inputs);

        info!(
            score = best_eval.score,
            exact = best_eval.exact_matches,
            length = best_program.len(),
            "Final evaluation complete"
        );

        EvolutionOutcome {
            best_program,
            best_score: best_eval.score,
            exact_matches: best_eval.exact_matches,
            instances: best_eval.instances,
            best_ever_program: run.best_ever_program,
            best_ever_score: run.best_ever_score,
            final_population_size: run.population.len(),
            history: run.history,
        }
    }

    /// The generational loop: evaluate, record, breed
    fn run_generations(&self, evaluator: &Evaluator<'_>, rng: &mut ChaCha8Rng) -> Generations {
        let config = &self.config;

        info!(
            "Evolving {} programs for {} generations",
            config.population_size, config.generations
        );

        let mut population = self.initial_population(rng);
        let mut best_ever_program = Program::new();
        let mut best_ever_score = f64::NEG_INFINITY;
        let mut history = Vec::with_capacity(config.generations);

        for generation in 1..=config.generations {
            let inputs = evaluator.generate_inputs(config.instances, rng);
            let (ranked, evaluations) = rank(population, evaluator, &inputs);

            if let (Some(top), Some(top_eval)) = (ranked.first(), evaluations.first()) {
                if top_eval.score > best_ever_score {
                    best_ever_program = top.clone();
                    best_ever_score = top_eval.score;
                }
            }

            let scores: Vec<f64> = evaluations.iter().map(|e| e.score).collect();
            let stats = GenerationStats {
                generation,
                population_size: ranked.len(),
                best_score: scores.first().copied().unwrap_or(f64::NEG_INFINITY),
                average_score: mean(&scores),
                exact_matches: evaluations.first().map_or(0, |e| e.exact_matches),
                best_ever_score,
            };

            info!(
                generation,
                best = stats.best_score,
                average = stats.average_score,
                exact = stats.exact_matches,
                "Gen {}/{}: best={} avg={:.2}",
                generation,
                config.generations,
                stats.best_score,
                stats.average_score
            );
            if let Some(top) = ranked.first() {
                debug!("  Best program: {:?}", top.to_string());
            }
            history.push(stats);

            population = self.breed(&ranked, &scores, rng);
        }

        Generations {
            population,
            best_ever_program,
            best_ever_score,
            history,
        }
    }

    /// Empty programs, or random ones when an initial length is configured
    fn initial_population(&self, rng: &mut ChaCha8Rng) -> Vec<Program> {
        let config = &self.config;
        if config.init_length == 0 {
            return vec![Program::new(); config.population_size];
        }

        (0..config.population_size)
            .map(|_| Program::random(config.init_length, rng))
            .collect()
    }

    /// Elites first, then offspring until the population is full again.
    /// `ranked` must be sorted best first.
    fn breed(&self, ranked: &[Program], scores: &[f64], rng: &mut ChaCha8Rng) -> Vec<Program> {
        let config = &self.config;
        let empty = Program::new();

        let mut next: Vec<Program> = ranked.iter().take(config.elite_count).cloned().collect();

        while next.len() < config.population_size {
            let child = if rng.gen::<f64>() < config.crossover_rate {
                let parent1 = select(ranked, scores, rng).unwrap_or(&empty);
                let parent2 = select(ranked, scores, rng).unwrap_or(&empty);
                self.mutator.crossover(parent1, parent2, rng)
            } else {
                select(ranked, scores, rng).unwrap_or(&empty).clone()
            };
            next.push(self.mutator.mutate(&child, rng));
        }

        next
    }
}

/// Score every program on `inputs` and sort best first
fn rank(
    population: Vec<Program>,
    evaluator: &Evaluator<'_>,
    inputs: &[Vec<i32>],
) -> (Vec<Program>, Vec<Evaluation>) {
    let mut scored: Vec<(Program, Evaluation)> = population
        .into_iter()
        .map(|program| {
            let evaluation = evaluator.evaluate(&program, inputs);
            (program, evaluation)
        })
        .collect();

    scored.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
    scored.into_iter().unzip()
}

/// First program with the highest score on `inputs`
fn best_of(
    population: &[Program],
    evaluator: &Evaluator<'_>,
    inputs: &[Vec<i32>],
) -> (Program, Evaluation) {
    let mut best: Option<(&Program, Evaluation)> = None;

    for program in population {
        let evaluation = evaluator.evaluate(program, inputs);
        if best.map_or(true, |(_, b)| evaluation.score > b.score) {
            best = Some((program, evaluation));
        }
    }

    match best {
        Some((program, evaluation)) => (program.clone(), evaluation),
        None => (
            Program::new(),
            Evaluation {
                score: f64::NEG_INFINITY,
                exact_matches: 0,
                instances: inputs.len(),
            },
        ),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
