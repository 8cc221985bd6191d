//! Configuration types for an evolution run.

use crate::task::{AdditionTask, Task, TripleAdditionTask};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Which arithmetic task to evolve against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Sum of two cells
    Addition,
    /// Sum of three cells
    Triple,
}

/// Task selection and its input bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub kind: TaskKind,
    /// Number of tape cells
    pub size: usize,
    /// Lower bound for generated operands (clamped to 0)
    pub min_value: i32,
    /// Upper bound for generated operands (clamped so the sum fits a cell)
    pub max_value: i32,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            kind: TaskKind::Addition,
            size: 8,
            min_value: -64,
            max_value: 63,
        }
    }
}

impl TaskConfig {
    pub fn build(&self) -> Box<dyn Task> {
        match self.kind {
            TaskKind::Addition => {
                Box::new(AdditionTask::new(self.size, self.min_value, self.max_value))
            }
            TaskKind::Triple => Box::new(TripleAdditionTask::new(
                self.size,
                self.min_value,
                self.max_value,
            )),
        }
    }
}

/// Parameters of one evolution run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of programs in every generation
    pub population_size: usize,
    /// Top programs copied unchanged into the next generation
    pub elite_count: usize,
    /// Number of breeding rounds
    pub generations: usize,
    /// Per-position mutation probability (0.0 to 1.0)
    pub mutation_rate: f64,
    /// Probability an offspring is bred by crossover (0.0 to 1.0)
    pub crossover_rate: f64,
    /// Task instances per generation
    pub instances: usize,
    /// Instruction budget per instance
    pub steps: usize,
    /// Length of random programs in the first generation; 0 starts from empty programs
    pub init_length: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    pub task: TaskConfig,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            elite_count: 5,
            generations: 50,
            mutation_rate: 0.1,
            crossover_rate: 0.5,
            instances: 10,
            steps: 1000,
            init_length: 0,
            seed: None,
            task: TaskConfig::default(),
        }
    }
}

impl EvolutionConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject values the search cannot run with at all.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::Validation("population_size must be positive".to_string()));
        }

        if self.task.size == 0 {
            return Err(Error::Validation("task size must be positive".to_string()));
        }

        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }

        Ok(())
    }

    /// Out-of-contract values that still run, degenerately. They are reported, not changed.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.elite_count > self.population_size {
            warnings.push(format!(
                "elite_count {} exceeds population_size {}; no offspring will be bred",
                self.elite_count, self.population_size
            ));
        }

        if self.instances == 0 {
            warnings.push("instances is 0; every program scores 0".to_string());
        }

        if self.steps == 0 {
            warnings.push("steps is 0; no program executes any instruction".to_string());
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.elite_count, 5);
        assert_eq!(config.generations, 50);
        assert_eq!(config.steps, 1000);
        assert_eq!(config.init_length, 0);
        assert!(config.seed.is_none());

        assert_eq!(config.task.kind, TaskKind::Addition);
        assert_eq!(config.task.size, 8);
        assert!(config.validate().is_ok());
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "generations": 7, "task": { "kind": "triple", "max_value": 40 } }"#;
        let config: EvolutionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.generations, 7);
        assert_eq!(config.population_size, 100);
        assert_eq!(config.task.kind, TaskKind::Triple);
        assert_eq!(config.task.max_value, 40);
        assert_eq!(config.task.size, 8);
    }

    #[test]
    fn test_config_serialization() {
        let config = EvolutionConfig {
            seed: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EvolutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EvolutionConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        let config = EvolutionConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = EvolutionConfig::default();
        config.task.size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_contract_values_are_reported() {
        let config = EvolutionConfig {
            population_size: 3,
            elite_count: 5,
            instances: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.warnings().len(), 2);
    }

    #[test]
    fn test_build_task() {
        let mut config = TaskConfig::default();
        assert_eq!(config.build().name(), "addition");

        config.kind = TaskKind::Triple;
        config.size = 5;
        let task = config.build();
        assert_eq!(task.name(), "triple");
        assert_eq!(task.size(), 5);
    }

    #[test]
    fn test_missing_config_file() {
        let result = EvolutionConfig::from_json_file("/nonexistent/bfevo.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
