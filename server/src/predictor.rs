use std::path::Path;

use comms::{FEATURES, PredictRequest};
use machine_learning::{MlErr, Pipeline};

use crate::{Result, ServeErr};

/// A fitted pipeline checked to accept exactly the features the form collects.
#[derive(Debug, Clone)]
pub struct Predictor {
    pipeline: Pipeline,
}

impl Predictor {
    /// Wraps `pipeline` after checking its feature set.
    ///
    /// The order of the fitted features doesn't matter since prediction aligns them by name,
    /// but the set must be the same.
    ///
    /// # Errors
    /// Returns `ServeErr::SchemaMismatch` if the pipeline was fitted on other features.
    pub fn new(pipeline: Pipeline) -> Result<Self> {
        let mut got: Vec<String> = pipeline.features().to_vec();
        let mut expected: Vec<String> = FEATURES.iter().map(|f| f.to_string()).collect();
        got.sort();
        expected.sort();

        if got != expected {
            return Err(ServeErr::SchemaMismatch {
                expected: FEATURES.iter().map(|f| f.to_string()).collect(),
                got: pipeline.features().to_vec(),
            });
        }

        Ok(Self { pipeline })
    }

    /// Loads the artifact at `path` and checks it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(Pipeline::load(path)?)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Predicts the sale price of a single house.
    pub fn predict(&self, request: &PredictRequest) -> std::result::Result<f64, MlErr> {
        self.pipeline.predict_one(&request.features())
    }
}
