//! Ordinary least squares linear regression
//!
//! The model maps an enriched bar's feature vector (every column except
//! `Close`) to the next period's close. Fitting solves the normal
//! equations with a Cholesky decomposition; the trained model is a plain
//! serializable artifact that later stages consume read-only.

use crate::error::{PipelineError, Result};
use log::{debug, info};
use ndarray::{concatenate, s, Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Ordinary least squares regression configuration
#[derive(Debug, Clone)]
pub struct LinearRegression {
    fit_intercept: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LinearRegression {
    /// Create a new model configuration
    pub fn new(fit_intercept: bool) -> Self {
        Self { fit_intercept }
    }

    /// Fit the model on a feature matrix and target vector.
    ///
    /// Solves the normal equations `(X'X) beta = X'y` with a small ridge
    /// term on the diagonal for numerical conditioning.
    pub fn fit(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        feature_names: Vec<String>,
    ) -> Result<TrainedLinearModel> {
        if x.nrows() != y.len() {
            return Err(PipelineError::ModelError(format!(
                "Feature matrix has {} rows but target has {}",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 {
            return Err(PipelineError::ModelError(
                "Cannot fit on an empty training set".to_string(),
            ));
        }
        if feature_names.len() != x.ncols() {
            return Err(PipelineError::ModelError(format!(
                "{} feature names for {} columns",
                feature_names.len(),
                x.ncols()
            )));
        }

        let x_design = if self.fit_intercept {
            let ones = Array2::ones((x.nrows(), 1));
            concatenate(Axis(1), &[ones.view(), x.view()])
                .map_err(|e| PipelineError::ModelError(e.to_string()))?
        } else {
            x.clone()
        };

        let xt = x_design.t();
        let mut xtx = xt.dot(&x_design);
        let xty = xt.dot(y);

        // Ridge term for conditioning
        for i in 0..xtx.nrows() {
            xtx[[i, i]] += 1e-10;
        }

        let beta = cholesky_solve(&xtx, &xty)?;
        debug!("Solved normal equations for {} coefficients", beta.len());

        let (intercept, coefficients) = if self.fit_intercept {
            (beta[0], beta.slice(s![1..]).to_vec())
        } else {
            (0.0, beta.to_vec())
        };

        Ok(TrainedLinearModel {
            coefficients,
            intercept,
            feature_names,
        })
    }
}

/// A fitted linear model, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedLinearModel {
    /// Weight per feature, in feature-name order
    pub coefficients: Vec<f64>,
    /// Bias term
    pub intercept: f64,
    /// Names of the features the model was fitted on
    pub feature_names: Vec<String>,
}

impl TrainedLinearModel {
    /// Predict a single target value from one feature vector
    pub fn predict_row(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(PipelineError::ModelError(format!(
                "Expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features.iter())
            .map(|(c, f)| c * f)
            .sum();
        Ok(dot + self.intercept)
    }

    /// Predict a target value per row of a feature matrix
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.coefficients.len() {
            return Err(PipelineError::ModelError(format!(
                "Expected {} features, got {}",
                self.coefficients.len(),
                x.ncols()
            )));
        }

        let coefficients = Array1::from_vec(self.coefficients.clone());
        Ok(x.dot(&coefficients) + self.intercept)
    }

    /// Serialize the model as JSON, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        info!("Model saved to {:?}", path.as_ref());
        Ok(())
    }

    /// Load a previously serialized model
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let model = serde_json::from_reader(BufReader::new(file))?;
        Ok(model)
    }
}

/// Solve `A x = b` for symmetric positive-definite `A` via Cholesky
/// decomposition with forward/backward substitution.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    // A = L * L^T
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 {
                    return Err(PipelineError::ModelError(
                        "Feature matrix is singular; cannot solve normal equations".to_string(),
                    ));
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // L * z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * z[j];
        }
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    // L^T * x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (z[i] - sum) / l[[i, i]];
    }

    Ok(x)
}
