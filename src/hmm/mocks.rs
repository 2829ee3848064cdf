//!
//! Mock HMMs for testing
//!
use super::common::HmmModel;
use crate::distribution::{Emission, Gaussian, Likelihood};
use crate::error::{HmmError, Result};
use crate::prob::{p, Prob};
use ndarray::{array, ArrayView2};
use rand::Rng;

///
/// Deterministic emission: likelihood 1 when the observation equals the
/// target, 0 otherwise. Gives closed-form posteriors in tests.
///
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    pub target: f64,
}

impl Likelihood for Indicator {
    fn likelihood(&self, x: f64) -> Prob {
        if x == self.target {
            Prob::one()
        } else {
            Prob::zero()
        }
    }
}

impl Emission for Indicator {
    fn natural(&self) -> Vec<f64> {
        Vec::new()
    }
    fn set_natural(&mut self, _w: &[f64]) -> Result<()> {
        Err(HmmError::InvalidParameterUpdate(
            "indicator emission has no parameters".to_string(),
        ))
    }
    fn expected_stats(
        &self,
        _obs: &[f64],
        _gamma: ArrayView2<Prob>,
        _state: usize,
        _a: usize,
        _b: usize,
    ) -> Result<Vec<f64>> {
        Ok(Vec::new())
    }
    fn maximize(
        &mut self,
        _obs: &[f64],
        _gamma: ArrayView2<Prob>,
        _state: usize,
        _a: usize,
        _b: usize,
    ) -> Result<()> {
        Ok(())
    }
    fn expected_log(&self) -> Result<Box<dyn Likelihood>> {
        Err(HmmError::MissingPrior)
    }
    fn sample<R: Rng>(&self, _rng: &mut R) -> f64 {
        self.target
    }
}

///
/// Two well-separated Gaussian states (means 0 and 5, unit variance) with
/// moderately sticky transitions.
///
pub fn mock_two_state_gaussian() -> HmmModel<Gaussian> {
    HmmModel::new(
        array![[p(0.9), p(0.1)], [p(0.2), p(0.8)]],
        array![p(0.5), p(0.5)],
        vec![
            Gaussian::new(0.0, 1.0).unwrap(),
            Gaussian::new(5.0, 1.0).unwrap(),
        ],
    )
    .unwrap()
}

///
/// Two indicator states with identity transitions and a uniform start:
/// state 0 emits 1.0, state 1 emits 2.0. With observations all equal to 1.0
/// the posterior is exactly state 0 at every step.
///
pub fn mock_indicator_hmm() -> HmmModel<Indicator> {
    HmmModel::new(
        array![[p(1.0), p(0.0)], [p(0.0), p(1.0)]],
        array![p(0.5), p(0.5)],
        vec![Indicator { target: 1.0 }, Indicator { target: 2.0 }],
    )
    .unwrap()
}
