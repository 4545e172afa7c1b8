//! Least-squares polynomial fits of a value against distance.
//!
//! The abscissa is centred and scaled to `[-1, 1]` before the Vandermonde
//! system is built, then solved through an SVD so rank-deficient inputs
//! (for example, all edges at one distance) still yield the minimum-norm fit.

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SurrogateError};

/// Singular values below this are treated as zero by the solver.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A fitted polynomial `p(x) = Σ c_k ((x - shift) / scale)^k`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Polynomial {
    coefficients: Vec<f64>,
    shift: f64,
    scale: f64,
}

impl Polynomial {
    /// Fits a polynomial of degree `order` to the points `(x[k], y[k])`.
    pub(crate) fn fit(x: &[f64], y: &[f64], order: usize) -> Result<Self> {
        let required = order + 1;
        if x.len() < required {
            return Err(SurrogateError::InsufficientEdges {
                edges: x.len(),
                required,
            });
        }
        debug_assert_eq!(x.len(), y.len());

        let shift = x.iter().sum::<f64>() / x.len() as f64;
        let spread = x
            .iter()
            .map(|value| (value - shift).abs())
            .fold(0.0_f64, f64::max);
        let scale = if spread > 0.0 { spread } else { 1.0 };

        let vandermonde = DMatrix::from_fn(x.len(), required, |row, power| {
            let t = (x[row] - shift) / scale;
            t.powi(power as i32)
        });
        let rhs = DVector::from_column_slice(y);
        let solution = vandermonde
            .svd(true, true)
            .solve(&rhs, SINGULAR_EPSILON)
            .map_err(|reason| SurrogateError::DegenerateFit { order, reason })?;
        if solution.iter().any(|value| !value.is_finite()) {
            return Err(SurrogateError::DegenerateFit {
                order,
                reason: "least-squares solution is not finite",
            });
        }

        Ok(Self {
            coefficients: solution.iter().copied().collect(),
            shift,
            scale,
        })
    }

    /// Evaluates the polynomial with Horner's scheme.
    pub(crate) fn eval(&self, x: f64) -> f64 {
        let t = (x - self.shift) / self.scale;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, coefficient| acc * t + coefficient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn recovers_exact_cubic(#[case] order: usize) {
        let truth = |x: f64| match order {
            1 => 0.5 - 2.0 * x,
            2 => 1.0 + 0.25 * x - 0.1 * x * x,
            _ => -3.0 + x - 0.2 * x * x + 0.01 * x * x * x,
        };
        let x: Vec<f64> = (0..12).map(|k| f64::from(k) * 2.5).collect();
        let y: Vec<f64> = x.iter().map(|&value| truth(value)).collect();
        let fit = Polynomial::fit(&x, &y, order).expect("fit must succeed");
        for &value in &[0.0, 7.3, 21.0, 27.5] {
            assert!(
                (fit.eval(value) - truth(value)).abs() < 1e-8,
                "order {order} mismatch at {value}"
            );
        }
    }

    #[test]
    fn constant_abscissa_fits_mean() {
        let x = [4.0, 4.0, 4.0, 4.0];
        let y = [1.0, 2.0, 3.0, 6.0];
        let fit = Polynomial::fit(&x, &y, 2).expect("rank-deficient fit still solves");
        assert!((fit.eval(4.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn too_few_points_is_an_error() {
        let err = Polynomial::fit(&[1.0, 2.0], &[1.0, 2.0], 3).expect_err("needs 4 points");
        assert_eq!(
            err,
            SurrogateError::InsufficientEdges {
                edges: 2,
                required: 4,
            }
        );
    }
}
