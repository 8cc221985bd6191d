//! Command line front end for evolving tape programs.

mod telemetry;

use anyhow::{Context, Result};
use bfevo_core::{EvolutionConfig, TaskKind};
use bfevo_search::Evolver;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TaskArg {
    Addition,
    Triple,
}

impl From<TaskArg> for TaskKind {
    fn from(arg: TaskArg) -> Self {
        match arg {
            TaskArg::Addition => TaskKind::Addition,
            TaskArg::Triple => TaskKind::Triple,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bfevo", about = "Evolve tape programs that compute arithmetic")]
#[command(version)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of individuals in the population
    #[arg(long)]
    population_size: Option<usize>,

    /// Number of elite programs kept each generation
    #[arg(long)]
    elite_count: Option<usize>,

    /// Number of generations to evolve
    #[arg(long)]
    generations: Option<usize>,

    /// Probability of mutation at each position
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Probability of creating offspring via crossover
    #[arg(long)]
    crossover_rate: Option<f64>,

    /// Number of evaluation instances per generation
    #[arg(long)]
    instances: Option<usize>,

    /// Initial random program length (0 starts from empty programs)
    #[arg(long)]
    init_length: Option<usize>,

    /// Evaluation task
    #[arg(long, value_enum)]
    task: Option<TaskArg>,

    /// Tape size
    #[arg(long)]
    size: Option<usize>,

    /// Minimum random input value
    #[arg(long, allow_hyphen_values = true)]
    min_value: Option<i32>,

    /// Maximum random input value
    #[arg(long, allow_hyphen_values = true)]
    max_value: Option<i32>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum instructions executed per evaluation
    #[arg(long)]
    steps: Option<usize>,

    /// Write the full outcome as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Increase verbosity; can be given multiple times
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolve_config(&self) -> Result<EvolutionConfig> {
        let mut config = match &self.config {
            Some(path) => EvolutionConfig::from_json_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => EvolutionConfig::default(),
        };

        if let Some(task) = self.task {
            config.task.kind = task.into();
        }
        if let Some(population_size) = self.population_size {
            config.population_size = population_size;
        }
        if let Some(elite_count) = self.elite_count {
            config.elite_count = elite_count;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(mutation_rate) = self.mutation_rate {
            config.mutation_rate = mutation_rate;
        }
        if let Some(crossover_rate) = self.crossover_rate {
            config.crossover_rate = crossover_rate;
        }
        if let Some(instances) = self.instances {
            config.instances = instances;
        }
        if let Some(init_length) = self.init_length {
            config.init_length = init_length;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(size) = self.size {
            config.task.size = size;
        }
        if let Some(min_value) = self.min_value {
            config.task.min_value = min_value;
        }
        if let Some(max_value) = self.max_value {
            config.task.max_value = max_value;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.verbose)?;

    let config = cli.resolve_config()?;
    config.validate()?;
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let task = config.task.build();
    info!(
        "Task {} on {} cells, inputs in [{}, {}]",
        task.name(),
        task.size(),
        config.task.min_value,
        config.task.max_value
    );

    let evolver = Evolver::new(config);
    let outcome = evolver.evolve(task.as_ref(), &mut rng);

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&outcome)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote outcome to {}", path.display());
    }

    println!("{}", outcome.best_program);
    println!("Score: {:.2}", outcome.best_score);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["bfevo"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config, EvolutionConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "bfevo",
            "--population-size",
            "30",
            "--generations",
            "4",
            "--min-value",
            "-10",
            "--seed",
            "9",
            "-vv",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.generations, 4);
        assert_eq!(config.task.min_value, -10);
        assert_eq!(config.seed, Some(9));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_triple_task_selection() {
        let cli = Cli::parse_from(["bfevo", "--task", "triple", "--size", "6"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.task.kind, TaskKind::Triple);

        let task = config.task.build();
        assert_eq!(task.name(), "triple");
        assert_eq!(task.size(), 6);
    }

    #[test]
    fn test_config_file_is_overridden_by_flags() {
        let path = std::env::temp_dir().join(format!("bfevo-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "generations": 3, "steps": 50 }"#).unwrap();

        let cli = Cli::parse_from([
            "bfevo",
            "--config",
            path.to_str().unwrap(),
            "--steps",
            "75",
        ]);
        let config = cli.resolve_config().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.generations, 3);
        assert_eq!(config.steps, 75);
    }
}
