//!
//! Single-variable Gaussian emission model
//!
//! Implements the full exponential-family capability set: point density,
//! natural parameters, responsibility-weighted sufficient statistics,
//! maximum-likelihood update and the expected-log distribution derived from
//! a Normal-Inverse-Wishart prior.
//!
use super::niw::NormalInverseWishart;
use super::{Emission, Likelihood};
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use ndarray::ArrayView2;
use rand::Rng;

///
/// `N(mu, sigma^2)` with an optional NIW prior.
///
/// The density is evaluated in log space, so far-tail observations yield a
/// tiny `Prob` instead of a linear-space underflow to zero.
///
#[derive(Debug, Clone)]
pub struct Gaussian {
    mu: f64,
    sigma: f64,
    prior: Option<NormalInverseWishart>,
}

impl Gaussian {
    ///
    /// Create `N(mu, sigma^2)`; `sigma` must be positive and finite.
    ///
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !(sigma > 0.0 && sigma.is_finite() && mu.is_finite()) {
            return Err(HmmError::InvalidParameterUpdate(format!(
                "invalid gaussian parameters: mu={} sigma={}",
                mu, sigma
            )));
        }
        Ok(Gaussian {
            mu,
            sigma,
            prior: None,
        })
    }
    ///
    /// Attach a prior at construction time.
    ///
    pub fn with_prior(mu: f64, sigma: f64, prior: NormalInverseWishart) -> Result<Self> {
        let mut g = Gaussian::new(mu, sigma)?;
        g.prior = Some(prior);
        Ok(g)
    }
    ///
    /// Attach (or replace) the prior.
    ///
    pub fn set_prior(&mut self, prior: NormalInverseWishart) {
        self.prior = Some(prior);
    }
    pub fn mu(&self) -> f64 {
        self.mu
    }
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
    ///
    /// Responsibility-weighted moment sums `(sum_w, sum_wx, sum_wx2)` of
    /// `obs[a..=b]`, weighted by `gamma[t][state]`.
    ///
    fn weighted_moments(
        obs: &[f64],
        gamma: ArrayView2<Prob>,
        state: usize,
        a: usize,
        b: usize,
    ) -> Result<(f64, f64, f64)> {
        if gamma.nrows() != obs.len() {
            return Err(HmmError::DimensionMismatch {
                what: "responsibility matrix rows",
                expected: obs.len(),
                found: gamma.nrows(),
            });
        }
        if state >= gamma.ncols() {
            return Err(HmmError::DimensionMismatch {
                what: "state index",
                expected: gamma.ncols(),
                found: state,
            });
        }
        if a > b || b >= obs.len() {
            return Err(HmmError::DimensionMismatch {
                what: "subchain bound",
                expected: obs.len(),
                found: b,
            });
        }
        let mut sum_w = 0.0;
        let mut sum_wx = 0.0;
        let mut sum_wx2 = 0.0;
        for t in a..=b {
            let w = gamma[[t, state]].to_value();
            sum_w += w;
            sum_wx += w * obs[t];
            sum_wx2 += w * obs[t] * obs[t];
        }
        Ok((sum_w, sum_wx, sum_wx2))
    }
}

const LN_2PI: f64 = 1.8378770664093453;

impl Likelihood for Gaussian {
    ///
    /// Normal density `exp(-(x-mu)^2 / 2 sigma^2) / (sigma sqrt(2 pi))`,
    /// computed in log space.
    ///
    fn likelihood(&self, x: f64) -> Prob {
        let z = (x - self.mu) / self.sigma;
        Prob::from_log_prob(-0.5 * z * z - self.sigma.ln() - 0.5 * LN_2PI)
    }
}

impl Emission for Gaussian {
    ///
    /// `[mu / sigma^2, -1 / (2 sigma^2)]`
    ///
    fn natural(&self) -> Vec<f64> {
        let var = self.sigma * self.sigma;
        vec![self.mu / var, -0.5 / var]
    }
    ///
    /// Invert the natural parameterization:
    /// `sigma^2 = -1/(2 w[1])`, `mu = -w[0]/(2 w[1])`.
    ///
    /// Rejects any vector that is not length 2 or does not encode a positive
    /// finite variance; `mu`/`sigma` keep their prior values on rejection.
    ///
    fn set_natural(&mut self, w: &[f64]) -> Result<()> {
        if w.len() != 2 {
            return Err(HmmError::InvalidParameterUpdate(format!(
                "natural parameter vector has length {}, expected 2",
                w.len()
            )));
        }
        if !(w[1] < 0.0 && w[0].is_finite() && w[1].is_finite()) {
            return Err(HmmError::InvalidParameterUpdate(format!(
                "natural parameters [{}, {}] do not encode a positive variance",
                w[0], w[1]
            )));
        }
        let var = -0.5 / w[1];
        let mu = w[0] * var;
        if !(var > 0.0 && var.is_finite() && mu.is_finite()) {
            return Err(HmmError::InvalidParameterUpdate(format!(
                "natural parameters [{}, {}] give mu={} var={}",
                w[0], w[1], mu, var
            )));
        }
        self.mu = mu;
        self.sigma = var.sqrt();
        Ok(())
    }
    ///
    /// `[sum_w, sum_wx, sum_wx2]` over the subchain.
    ///
    fn expected_stats(
        &self,
        obs: &[f64],
        gamma: ArrayView2<Prob>,
        state: usize,
        a: usize,
        b: usize,
    ) -> Result<Vec<f64>> {
        let (sum_w, sum_wx, sum_wx2) = Gaussian::weighted_moments(obs, gamma, state, a, b)?;
        Ok(vec![sum_w, sum_wx, sum_wx2])
    }
    ///
    /// Weighted sample mean/stddev of the subchain. Fails (leaving the model
    /// unchanged) on zero total responsibility or non-positive variance.
    ///
    fn maximize(
        &mut self,
        obs: &[f64],
        gamma: ArrayView2<Prob>,
        state: usize,
        a: usize,
        b: usize,
    ) -> Result<()> {
        let (sum_w, sum_wx, sum_wx2) = Gaussian::weighted_moments(obs, gamma, state, a, b)?;
        if sum_w <= 0.0 {
            return Err(HmmError::InvalidParameterUpdate(format!(
                "zero total responsibility for state {} on [{}, {}]",
                state, a, b
            )));
        }
        let mu = sum_wx / sum_w;
        let var = sum_wx2 / sum_w - mu * mu;
        if !(var > 0.0 && var.is_finite()) {
            return Err(HmmError::InvalidParameterUpdate(format!(
                "update gives non-positive variance {} for state {}",
                var, state
            )));
        }
        self.mu = mu;
        self.sigma = var.sqrt();
        Ok(())
    }
    fn expected_log(&self) -> Result<Box<dyn Likelihood>> {
        let prior = self.prior.as_ref().ok_or(HmmError::MissingPrior)?;
        let (mean, scale, concentration, dof) = prior.params();
        Ok(Box::new(ExpectedGaussian {
            mean,
            scale,
            concentration,
            dof,
            lambda_tilde: prior.lambda_tilde(),
        }))
    }
    ///
    /// Box-Muller transform.
    ///
    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let u1: f64 = 1.0 - rng.gen::<f64>(); // (0, 1], ln is finite
        let u2: f64 = rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        self.mu + self.sigma * z
    }
}

///
/// Expected-log distribution of a Gaussian under its NIW prior
/// (variational posterior-predictive factor; Bishop 10.64-10.65 in one
/// dimension). Only evaluable, never updatable.
///
#[derive(Debug, Clone)]
pub struct ExpectedGaussian {
    mean: f64,
    scale: f64,
    concentration: f64,
    dof: f64,
    lambda_tilde: f64,
}

impl Likelihood for ExpectedGaussian {
    ///
    /// ```text
    /// mass(x) = sqrt(lambda_tilde)
    ///           * exp( -1/(2 kappa) - nu (x - m)^2 / (2 s) )
    ///           / sqrt(2 pi)
    /// ```
    ///
    fn likelihood(&self, x: f64) -> Prob {
        let d = x - self.mean;
        Prob::from_log_prob(
            0.5 * self.lambda_tilde.ln()
                - 0.5 / self.concentration
                - 0.5 * self.dof * d * d / self.scale
                - 0.5 * LN_2PI,
        )
    }
}
