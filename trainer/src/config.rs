use std::{env, path::PathBuf, str::FromStr};

use comms::{DEFAULT_DATASET_PATH, DEFAULT_MODEL_PATH};

use crate::{Result, TrainErr};

const DEFAULT_TEST_SIZE: f64 = 0.2;
const DEFAULT_SEED: u64 = 42;

/// Immutable settings of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    /// Fraction of the rows held out for evaluation, in the `(0, 1)` range.
    pub test_size: f64,
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

impl TrainerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Recognizes `DATASET_PATH`, `MODEL_PATH`, `TEST_SIZE` and `SEED`, each one falling back
    /// to its default when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration out of an arbitrary variable lookup.
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, or `None` if it's unset.
    ///
    /// # Returns
    /// The configuration or `TrainErr::InvalidConfig` naming the first unusable variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let test_size = parse_var(&lookup, "TEST_SIZE")?.unwrap_or(defaults.test_size);
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(TrainErr::InvalidConfig {
                var: "TEST_SIZE",
                value: test_size.to_string(),
                reason: "must be between 0 and 1, exclusive".into(),
            });
        }

        Ok(Self {
            dataset_path: lookup("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),
            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            test_size,
            seed: parse_var(&lookup, "SEED")?.unwrap_or(defaults.seed),
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| TrainErr::InvalidConfig {
            var,
            reason: e.to_string(),
            value,
        })
}
