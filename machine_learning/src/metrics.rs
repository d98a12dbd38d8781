use ndarray::ArrayView1;

use crate::{MlErr, Result};

/// A score computed between the true targets and the predicted ones.
pub trait Metric {
    fn score(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64>;
    fn name(&self) -> &'static str;
}

/// Root mean squared error: `sqrt(mean((pred - true)²))`.
///
/// Lower is better.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rmse;

impl Metric for Rmse {
    fn score(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
        check_sizes(y_true, y_pred)?;

        let mse = y_true
            .iter()
            .zip(&y_pred)
            .map(|(t, p)| (p - t).powi(2))
            .sum::<f64>()
            / y_true.len() as f64;

        Ok(mse.sqrt())
    }

    fn name(&self) -> &'static str {
        "RMSE"
    }
}

/// Coefficient of determination: `1 - SS_res / SS_tot`.
///
/// Higher is better, `1.0` being a perfect fit. When the true targets are constant the score
/// is `1.0` for a perfect fit and `0.0` otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct R2;

impl Metric for R2 {
    fn score(&self, y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
        check_sizes(y_true, y_pred)?;

        let mean = y_true.mean().ok_or(MlErr::EmptyDataset)?;
        let ss_res: f64 = y_true
            .iter()
            .zip(&y_pred)
            .map(|(t, p)| (t - p).powi(2))
            .sum();
        let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

        if ss_tot == 0.0 {
            return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
        }

        Ok(1.0 - ss_res / ss_tot)
    }

    fn name(&self) -> &'static str {
        "R² Score"
    }
}

fn check_sizes(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(MlErr::SizeMismatch {
            a: "predictions",
            b: "targets",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }

    if y_true.is_empty() {
        return Err(MlErr::EmptyDataset);
    }

    Ok(())
}
