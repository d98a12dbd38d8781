//! Contracts shared by the trainer and the prediction server.
//!
//! Both sides agree on the dataset columns, the default file locations and the JSON bodies
//! of the prediction API through this crate, so neither depends on the other.

pub mod specs;

pub use specs::housing::{DEFAULT_DATASET_PATH, DEFAULT_MODEL_PATH, FEATURES, TARGET};
pub use specs::predict::{PredictRequest, PredictResponse};
