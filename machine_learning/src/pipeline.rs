use log::info;
use ndarray::Array1;

use crate::{ColumnTransformer, Frame, LinearRegression, MlErr, Result};

/// A fitted column transformer followed by a fitted linear regressor.
///
/// Both stages are always fitted together, in order, on the same feature list.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    preprocessor: ColumnTransformer,
    regressor: LinearRegression,
    target: String,
}

impl Pipeline {
    /// Fits the scaler on the `features` columns of `frame` and the regressor on the scaled
    /// features against the `target` column.
    ///
    /// # Arguments
    /// * `frame` - The training rows.
    /// * `features` - The names of the input columns, in model order.
    /// * `target` - The name of the column to predict.
    ///
    /// # Returns
    /// The fitted pipeline.
    pub fn fit<S: AsRef<str>>(frame: &Frame, features: &[S], target: &str) -> Result<Self> {
        let preprocessor = ColumnTransformer::fit(frame, features)?;
        let x = preprocessor.transform(frame)?;
        let y = frame.column(target)?;
        let regressor = LinearRegression::fit(x.view(), y)?;

        info!(
            "fitted pipeline on {} row(s), intercept {:.4}",
            frame.nrows(),
            regressor.intercept()
        );

        Ok(Self {
            preprocessor,
            regressor,
            target: target.to_string(),
        })
    }

    /// Rebuilds a fitted pipeline out of its stages.
    pub fn from_parts(
        preprocessor: ColumnTransformer,
        regressor: LinearRegression,
        target: String,
    ) -> Result<Self> {
        if preprocessor.features().len() != regressor.coefficients().len() {
            return Err(MlErr::SizeMismatch {
                a: "regressor coefficients",
                b: "transformed features",
                got: regressor.coefficients().len(),
                expected: preprocessor.features().len(),
            });
        }

        Ok(Self {
            preprocessor,
            regressor,
            target,
        })
    }

    /// The input columns, in model order.
    pub fn features(&self) -> &[String] {
        self.preprocessor.features()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn preprocessor(&self) -> &ColumnTransformer {
        &self.preprocessor
    }

    pub fn regressor(&self) -> &LinearRegression {
        &self.regressor
    }

    /// Predicts every row of `frame`.
    ///
    /// The feature columns are picked by name, so their position inside `frame` is irrelevant.
    pub fn predict(&self, frame: &Frame) -> Result<Array1<f64>> {
        let x = self.preprocessor.transform(frame)?;
        self.regressor.predict(x.view())
    }

    /// Predicts a single sample given as `(feature, value)` pairs in any order.
    pub fn predict_one<S: AsRef<str>>(&self, pairs: &[(S, f64)]) -> Result<f64> {
        let row = Frame::single_row(pairs)?;
        let pred = self.predict(&row)?;
        pred.get(0).copied().ok_or(MlErr::EmptyDataset)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn training_frame() -> Frame {
        // price = 100 * area + 5000 * beds + 20000
        let rows = array![
            [1000., 2., 130000.],
            [1500., 3., 185000.],
            [1200., 2., 150000.],
            [2000., 4., 240000.],
            [800., 1., 105000.],
            [1700., 3., 205000.],
        ];
        Frame::new(vec!["area", "beds", "price"], rows).unwrap()
    }

    #[test]
    fn pipeline_fits_exact_relation() {
        let pipeline = Pipeline::fit(&training_frame(), &["area", "beds"], "price").unwrap();
        let pred = pipeline.predict_one(&[("area", 1100.0), ("beds", 2.0)]).unwrap();
        assert!((pred - 140000.0).abs() < 1e-6, "{pred}");
    }

    #[test]
    fn prediction_ignores_column_order() {
        let pipeline = Pipeline::fit(&training_frame(), &["area", "beds"], "price").unwrap();
        let a = pipeline.predict_one(&[("area", 1333.0), ("beds", 3.0)]).unwrap();
        let b = pipeline.predict_one(&[("beds", 3.0), ("area", 1333.0)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn prediction_requires_every_feature() {
        let pipeline = Pipeline::fit(&training_frame(), &["area", "beds"], "price").unwrap();
        assert!(matches!(
            pipeline.predict_one(&[("area", 1333.0)]),
            Err(MlErr::MissingColumn { name }) if name == "beds"
        ));
    }

    #[test]
    fn fit_reports_missing_target() {
        assert!(matches!(
            Pipeline::fit(&training_frame(), &["area"], "SalePrice"),
            Err(MlErr::MissingColumn { .. })
        ));
    }
}
