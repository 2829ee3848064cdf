//!
//! Normal-Inverse-Wishart prior (single-variable form)
//!
//! Owned by the training driver and only read by the emission model when
//! computing its expected-log distribution. Absence of a prior is an error
//! on that path, never a silent default.
//!
use crate::error::{HmmError, Result};

///
/// Conjugate prior of a single-variable Gaussian.
///
/// Hyperparameters: prior mean `m`, scale `s` (the 1×1 scale matrix),
/// concentration `kappa` and degrees of freedom `nu`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct NormalInverseWishart {
    mean: f64,
    scale: f64,
    concentration: f64,
    dof: f64,
}

impl NormalInverseWishart {
    ///
    /// Create a prior, rejecting non-positive scale/concentration/dof.
    ///
    pub fn new(mean: f64, scale: f64, concentration: f64, dof: f64) -> Result<Self> {
        if !(scale > 0.0 && concentration > 0.0 && dof > 0.0) {
            return Err(HmmError::InvalidParameterUpdate(format!(
                "non-positive NIW hyperparameters: scale={} concentration={} dof={}",
                scale, concentration, dof
            )));
        }
        Ok(NormalInverseWishart {
            mean,
            scale,
            concentration,
            dof,
        })
    }
    ///
    /// Weak default prior `(m=0, s=1, kappa=1, nu=1)`.
    ///
    pub fn weak() -> Self {
        NormalInverseWishart {
            mean: 0.0,
            scale: 1.0,
            concentration: 1.0,
            dof: 1.0,
        }
    }
    ///
    /// `(mean, scale, concentration, dof)`
    ///
    pub fn params(&self) -> (f64, f64, f64, f64) {
        (self.mean, self.scale, self.concentration, self.dof)
    }
    ///
    /// Expectation of the precision determinant under the prior,
    ///
    /// ```text
    /// lambda_tilde = exp( E[ln |Lambda|] ) = exp( digamma(nu/2) + ln 2 - ln s )
    /// ```
    ///
    /// (one-dimensional case of the usual Gaussian-Wishart expectation).
    ///
    pub fn lambda_tilde(&self) -> f64 {
        (digamma(self.dof / 2.0) + std::f64::consts::LN_2 - self.scale.ln()).exp()
    }
}

///
/// Digamma function `psi(x) = d/dx ln Gamma(x)` for `x > 0`.
///
/// Recurrence `psi(x) = psi(x+1) - 1/x` up to `x >= 10`, then the asymptotic
/// expansion
/// `ln x - 1/(2x) - 1/(12x^2) + 1/(120x^4) - 1/(252x^6) + 1/(240x^8)`,
/// accurate to well below 1e-12 at the threshold.
///
pub fn digamma(x: f64) -> f64 {
    assert!(x > 0.0, "digamma is only defined for positive arguments");
    let mut x = x;
    let mut result = 0.0;
    while x < 10.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result + x.ln() - 0.5 * inv
        - inv2
            * (1.0 / 12.0 - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digamma_known_values() {
        // digamma(1) = -euler_gamma
        assert_abs_diff_eq!(digamma(1.0), -0.5772156649015329, epsilon = 1e-10);
        // digamma(1/2) = -euler_gamma - 2 ln 2
        assert_abs_diff_eq!(digamma(0.5), -1.9635100260214235, epsilon = 1e-10);
        // recurrence digamma(x+1) = digamma(x) + 1/x
        assert_abs_diff_eq!(digamma(2.0), digamma(1.0) + 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(digamma(10.5), digamma(9.5) + 1.0 / 9.5, epsilon = 1e-10);
    }
    #[test]
    fn niw_rejects_bad_hyperparameters() {
        assert!(NormalInverseWishart::new(0.0, 0.0, 1.0, 1.0).is_err());
        assert!(NormalInverseWishart::new(0.0, 1.0, -1.0, 1.0).is_err());
        assert!(NormalInverseWishart::new(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(NormalInverseWishart::new(1.5, 2.0, 0.1, 3.0).is_ok());
    }
    #[test]
    fn niw_lambda_tilde() {
        // m=0, s=1, kappa=1, nu=1: exp(digamma(1/2) + ln 2)
        let prior = NormalInverseWishart::weak();
        let expected = (digamma(0.5) + std::f64::consts::LN_2).exp();
        assert_abs_diff_eq!(prior.lambda_tilde(), expected, epsilon = 1e-12);
        assert!(prior.lambda_tilde() > 0.0);

        // scaling the scale matrix divides lambda_tilde
        let wide = NormalInverseWishart::new(0.0, 4.0, 1.0, 1.0).unwrap();
        assert_abs_diff_eq!(wide.lambda_tilde(), expected / 4.0, epsilon = 1e-12);
    }
}
