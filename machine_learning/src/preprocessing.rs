use ndarray::{Array2, ArrayView2, Axis};

use crate::{Frame, MlErr, Result};

/// Standardizes features by removing the mean and scaling to unit variance.
///
/// The statistics are the population mean and standard deviation of each column of the data
/// given to `fit`. A column with zero variance keeps a scale of `1.0`, so it's only centered.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Learns the per column mean and standard deviation of `x`.
    ///
    /// # Arguments
    /// * `x` - A `(samples, features)` matrix.
    ///
    /// # Returns
    /// The fitted scaler or `MlErr::EmptyDataset` if `x` has no rows.
    pub fn fit(x: ArrayView2<f64>) -> Result<Self> {
        let mean = x.mean_axis(Axis(0)).ok_or(MlErr::EmptyDataset)?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 || !s.is_finite() { 1.0 } else { s });

        Ok(Self {
            mean: mean.to_vec(),
            scale: scale.to_vec(),
        })
    }

    /// Rebuilds a fitted scaler out of its learned statistics.
    pub fn from_parts(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.len() != scale.len() {
            return Err(MlErr::SizeMismatch {
                a: "scaler mean",
                b: "scaler scale",
                got: mean.len(),
                expected: scale.len(),
            });
        }

        if scale.iter().any(|&s| s == 0.0 || !s.is_finite()) {
            return Err(MlErr::CorruptArtifact(
                "scaler scale must be finite and non-zero".into(),
            ));
        }

        Ok(Self { mean, scale })
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Applies `(x - mean) / scale` column wise.
    ///
    /// # Arguments
    /// * `x` - A `(samples, features)` matrix with as many columns as the fitted data.
    ///
    /// # Returns
    /// The scaled matrix.
    pub fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.mean.len() {
            return Err(MlErr::SizeMismatch {
                a: "input columns",
                b: "fitted features",
                got: x.ncols(),
                expected: self.mean.len(),
            });
        }

        let mut out = x.to_owned();
        for (mut col, (&mean, &scale)) in out
            .axis_iter_mut(Axis(1))
            .zip(self.mean.iter().zip(&self.scale))
        {
            col.mapv_inplace(|v| (v - mean) / scale);
        }

        Ok(out)
    }
}

/// Applies a `StandardScaler` to a set of named columns of a `Frame`.
///
/// Columns are looked up by name on every call, so the frames given to `transform` may hold
/// the features in any order or carry extra columns. The output always follows the order of
/// the fitted feature list.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTransformer {
    features: Vec<String>,
    scaler: StandardScaler,
}

impl ColumnTransformer {
    /// Fits the scaler on the `features` columns of `frame`.
    pub fn fit<S: AsRef<str>>(frame: &Frame, features: &[S]) -> Result<Self> {
        let selected = frame.select(features)?;
        let scaler = StandardScaler::fit(selected.values())?;

        Ok(Self {
            features: selected.columns().to_vec(),
            scaler,
        })
    }

    /// Rebuilds a fitted transformer out of its feature list and scaler.
    pub fn from_parts(features: Vec<String>, scaler: StandardScaler) -> Result<Self> {
        if features.len() != scaler.mean().len() {
            return Err(MlErr::SizeMismatch {
                a: "feature names",
                b: "scaler statistics",
                got: features.len(),
                expected: scaler.mean().len(),
            });
        }

        Ok(Self { features, scaler })
    }

    /// The names of the transformed columns, in output order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Selects the fitted feature columns out of `frame` by name and scales them.
    pub fn transform(&self, frame: &Frame) -> Result<Array2<f64>> {
        let selected = frame.select(self.features.as_slice())?;
        self.scaler.transform(selected.values())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn scaler_learns_population_statistics() {
        let x = array![[1., 10.], [2., 20.], [3., 30.], [4., 40.]];
        let scaler = StandardScaler::fit(x.view()).unwrap();

        assert_eq!(scaler.mean(), [2.5, 25.0]);
        assert_close(scaler.scale()[0], 1.25_f64.sqrt());
        assert_close(scaler.scale()[1], 125.0_f64.sqrt());
    }

    #[test]
    fn scaled_training_data_has_zero_mean_and_unit_variance() {
        let x = array![[1500., 3.], [2100., 4.], [900., 2.], [1800., 3.], [1250., 2.]];
        let scaler = StandardScaler::fit(x.view()).unwrap();
        let z = scaler.transform(x.view()).unwrap();

        for col in z.axis_iter(Axis(1)) {
            assert_close(col.mean().unwrap(), 0.0);
            assert_close(col.std(0.0), 1.0);
        }
    }

    #[test]
    fn zero_variance_column_is_only_centered() {
        let x = array![[1., 5.], [2., 5.], [3., 5.]];
        let scaler = StandardScaler::fit(x.view()).unwrap();
        assert_eq!(scaler.scale()[1], 1.0);

        let z = scaler.transform(x.view()).unwrap();
        assert!(z.column(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn scaler_rejects_empty_input() {
        let x = Array2::<f64>::zeros((0, 3));
        assert!(matches!(
            StandardScaler::fit(x.view()),
            Err(MlErr::EmptyDataset)
        ));
    }

    #[test]
    fn transform_checks_width() {
        let scaler = StandardScaler::fit(array![[1., 2.], [3., 4.]].view()).unwrap();
        assert!(matches!(
            scaler.transform(array![[1., 2., 3.]].view()),
            Err(MlErr::SizeMismatch { .. })
        ));
    }

    #[test]
    fn column_transformer_aligns_by_name() {
        let train = Frame::new(
            vec!["a", "b", "target"],
            array![[1., 100., 0.], [3., 300., 0.], [5., 500., 0.]],
        )
        .unwrap();
        let transformer = ColumnTransformer::fit(&train, &["a", "b"]).unwrap();

        let ordered = Frame::single_row(&[("a", 3.0), ("b", 500.0)]).unwrap();
        let swapped = Frame::single_row(&[("b", 500.0), ("a", 3.0)]).unwrap();

        assert_eq!(
            transformer.transform(&ordered).unwrap(),
            transformer.transform(&swapped).unwrap()
        );
        assert_eq!(transformer.features(), ["a", "b"]);
    }

    #[test]
    fn column_transformer_reports_missing_feature() {
        let train = Frame::new(vec!["a"], array![[1.], [2.]]).unwrap();
        assert!(matches!(
            ColumnTransformer::fit(&train, &["a", "b"]),
            Err(MlErr::MissingColumn { .. })
        ));
    }
}
