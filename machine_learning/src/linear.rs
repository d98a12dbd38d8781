use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result};

/// Ordinary least squares linear regression with an intercept.
///
/// Fitting centers the features and the target, takes the minimum norm least squares solution
/// of `(XᵀX) w = Xᵀy` and recovers the intercept from the means. Linearly dependent features
/// are fitted rather than rejected: the dependent direction gets no weight.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegression {
    /// Fits the regressor.
    ///
    /// # Arguments
    /// * `x` - A `(samples, features)` matrix.
    /// * `y` - The target of each sample.
    ///
    /// # Returns
    /// The fitted regressor, or an error if the shapes disagree or there are no samples.
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                a: "feature rows",
                b: "targets",
                got: x.nrows(),
                expected: y.len(),
            });
        }

        let x_mean = x.mean_axis(Axis(0)).ok_or(MlErr::EmptyDataset)?;
        let y_mean = y.mean().ok_or(MlErr::EmptyDataset)?;

        let xc = &x - &x_mean;
        let yc = &y - y_mean;

        let gram = xc.t().dot(&xc);
        let moment = xc.t().dot(&yc);
        let coefficients = solve(gram, moment);
        let intercept = y_mean - x_mean.dot(&coefficients);

        Ok(Self {
            coefficients: coefficients.to_vec(),
            intercept,
        })
    }

    /// Rebuilds a fitted regressor out of its weights.
    pub fn from_parts(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(MlErr::CorruptArtifact(
                "regressor weights must be finite".into(),
            ));
        }

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    /// The weight of each feature.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Computes `x · w + b` for each row of `x`.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.coefficients.len() {
            return Err(MlErr::SizeMismatch {
                a: "input columns",
                b: "coefficients",
                got: x.ncols(),
                expected: self.coefficients.len(),
            });
        }

        let w = ArrayView1::from(self.coefficients.as_slice());
        Ok(x.dot(&w) + self.intercept)
    }
}

/// Eigenvalues below this fraction of the largest one are treated as zero.
const RCOND: f64 = 1e-12;

/// Upper bound for the Jacobi sweeps, a handful is enough for a few features.
const MAX_SWEEPS: usize = 64;

/// Finds the minimum norm least squares solution of `gram · w = moment`.
///
/// `gram` is the symmetric positive semi-definite `XᵀX`. Through its eigendecomposition
/// `V Λ Vᵀ` the solution is `V Λ⁺ Vᵀ moment`, where directions with a (numerically) zero
/// eigenvalue get no weight. A constant or duplicated feature then gets a zero or shared
/// coefficient instead of making the fit fail.
fn solve(gram: Array2<f64>, moment: Array1<f64>) -> Array1<f64> {
    let n = moment.len();
    if n == 0 {
        return moment;
    }

    let (eigenvalues, eigenvectors) = symmetric_eigen(gram);
    let max = eigenvalues.iter().fold(0.0_f64, |acc, l| acc.max(l.abs()));
    let tolerance = max * RCOND;

    let projected = eigenvectors.t().dot(&moment);
    let scaled: Array1<f64> = eigenvalues
        .iter()
        .zip(&projected)
        .map(|(&l, &p)| if l > tolerance { p / l } else { 0.0 })
        .collect();

    eigenvectors.dot(&scaled)
}

/// Cyclic Jacobi eigendecomposition of the symmetric matrix `a`.
///
/// # Returns
/// The eigenvalues and a matrix whose columns are the matching orthonormal eigenvectors.
fn symmetric_eigen(mut a: Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);
    let norm = a.iter().map(|x| x * x).sum::<f64>();

    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| a[[i, j]] * a[[i, j]])
            .sum();

        if off <= f64::EPSILON * f64::EPSILON * norm {
            break;
        }

        for p in 0..n {
            for q in p + 1..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }

                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    (a.diag().to_owned(), v)
}
