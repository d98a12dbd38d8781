pub mod config;
pub mod error;

use std::io::Write;

use comms::{FEATURES, TARGET};
use log::info;
use machine_learning::{Frame, Metric, Pipeline, R2, Rmse, load_csv, train_test_split};

pub use config::TrainerConfig;
pub use error::{Result, TrainErr};

/// Scores of a fitted pipeline on the held out partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub rmse: f64,
    pub r2: f64,
}

/// The outcome of fitting and evaluating a pipeline.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub pipeline: Pipeline,
    pub evaluation: Evaluation,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Loads the dataset, splits it, fits the pipeline and scores it, without saving anything.
///
/// # Arguments
/// * `config` - Where to read the dataset from and how to split it.
///
/// # Returns
/// The report of the run.
///
/// # Errors
/// Returns `TrainErr::Ml` if the dataset can't be loaded, a column is missing or the fit fails.
pub fn train(config: &TrainerConfig) -> Result<TrainReport> {
    info!("loading dataset from {}", config.dataset_path.display());
    let mut columns = FEATURES.to_vec();
    columns.push(TARGET);
    let frame = load_csv(&config.dataset_path, columns.as_slice())?;

    fit_and_evaluate(&frame, config.test_size, config.seed)
}

/// Runs the whole training process: trains, writes the metric lines into `out`, saves the
/// pipeline and then reports where it was saved.
///
/// The metrics are written before saving, a failed save still leaves them in `out`.
///
/// # Errors
/// Returns `TrainErr::Ml` if training or saving fails and `TrainErr::Io` if `out` can't be
/// written.
pub fn run<W: Write>(config: &TrainerConfig, out: &mut W) -> Result<TrainReport> {
    let report = train(config)?;

    for line in report.evaluation.summary() {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    report.pipeline.save(&config.model_path)?;
    writeln!(out, "Model saved as {}", config.model_path.display())?;

    Ok(report)
}

/// Splits `frame`, fits the pipeline on the train partition and scores it on the test one.
///
/// `frame` must hold the feature columns and the target column, any other column is ignored.
pub fn fit_and_evaluate(frame: &Frame, test_size: f64, seed: u64) -> Result<TrainReport> {
    let (train, test) = train_test_split(frame, test_size, seed)?;

    let pipeline = Pipeline::fit(&train, &FEATURES, TARGET)?;
    let evaluation = evaluate(&pipeline, &test)?;
    info!(
        "evaluated on {} row(s): rmse {:.2}, r2 {:.4}",
        test.nrows(),
        evaluation.rmse,
        evaluation.r2
    );

    Ok(TrainReport {
        pipeline,
        evaluation,
        train_rows: train.nrows(),
        test_rows: test.nrows(),
    })
}

/// Scores `pipeline` on the rows of `frame` against its target column.
pub fn evaluate(pipeline: &Pipeline, frame: &Frame) -> Result<Evaluation> {
    let y_pred = pipeline.predict(frame)?;
    let y_true = frame.column(pipeline.target())?;

    Ok(Evaluation {
        rmse: Rmse.score(y_true, y_pred.view())?,
        r2: R2.score(y_true, y_pred.view())?,
    })
}

impl Evaluation {
    /// The metric lines printed at the end of a run.
    pub fn summary(&self) -> [String; 2] {
        [
            format!("{}: {:.2}", Rmse.name(), self.rmse),
            format!("{}: {:.2}", R2.name(), self.r2),
        ]
    }
}
