//!
//! Emission distributions
//!
//! Each hidden state owns one emission model. The smoother only needs point
//! likelihood evaluation; the training driver additionally uses the
//! exponential-family operations (natural parameters, expected sufficient
//! statistics, maximum-likelihood update, expected-log distribution) between
//! inference rounds. Models are never mutated during an in-flight
//! forward/backward computation.
//!
use crate::error::Result;
use crate::prob::Prob;
use ndarray::ArrayView2;
use rand::Rng;

pub mod gaussian;
pub mod niw;

pub use gaussian::{ExpectedGaussian, Gaussian};
pub use niw::NormalInverseWishart;

///
/// Minimal capability: evaluate a likelihood at a point.
///
/// This is all the smoother (and the expected-log-distribution consumers)
/// depend on.
///
pub trait Likelihood {
    ///
    /// Likelihood (density or mass) of a single observation.
    ///
    fn likelihood(&self, x: f64) -> Prob;
}

///
/// Capability set of an exponential-family emission model.
///
/// `gamma` below is the smoothed single-state marginal matrix (T×K); the
/// column `gamma[.., state]` weights each observation by the responsibility
/// of the state this model emits for. Subchain bounds `a..=b` are inclusive.
///
pub trait Emission: Likelihood {
    ///
    /// Natural-parameter vector of the distribution.
    ///
    fn natural(&self) -> Vec<f64>;
    ///
    /// Replace the parameters with the given natural-parameter vector.
    ///
    /// Rejects a vector of the wrong dimensionality (or one that encodes an
    /// invalid distribution) and leaves the current parameters untouched.
    ///
    fn set_natural(&mut self, w: &[f64]) -> Result<()>;
    ///
    /// Responsibility-weighted sufficient statistics of `obs[a..=b]`.
    ///
    fn expected_stats(
        &self,
        obs: &[f64],
        gamma: ArrayView2<Prob>,
        state: usize,
        a: usize,
        b: usize,
    ) -> Result<Vec<f64>>;
    ///
    /// In-place maximum-likelihood update from the responsibility-weighted
    /// statistics of `obs[a..=b]`. Either succeeds and leaves the model in a
    /// valid state, or fails and leaves it unchanged.
    ///
    fn maximize(
        &mut self,
        obs: &[f64],
        gamma: ArrayView2<Prob>,
        state: usize,
        a: usize,
        b: usize,
    ) -> Result<()>;
    ///
    /// Expected-log distribution under the attached prior, usable only for
    /// likelihood evaluation. Fails with `MissingPrior` when no prior is
    /// attached.
    ///
    fn expected_log(&self) -> Result<Box<dyn Likelihood>>;
    ///
    /// Draw one observation from the distribution.
    ///
    fn sample<R: Rng>(&self, rng: &mut R) -> f64;
}
