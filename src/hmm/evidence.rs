//!
//! Local-evidence matrix construction
//!
use super::common::HmmModel;
use crate::distribution::Emission;
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use ndarray::Array2;

impl<D: Emission> HmmModel<D> {
    ///
    /// Evaluate every emission model against every observation:
    ///
    /// ```text
    /// psi[t][k] = P(x[t] | z_t = k) = B[k].likelihood(x[t])
    /// ```
    ///
    /// Recomputed on every smoothing call (never cached across emission-model
    /// updates). Fails with `EmptySequence` when T = 0; K >= 1 is guaranteed
    /// by model construction.
    ///
    pub fn local_evidence(&self, obs: &[f64]) -> Result<Array2<Prob>> {
        if obs.is_empty() {
            return Err(HmmError::EmptySequence);
        }
        Ok(Array2::from_shape_fn(
            (obs.len(), self.n_states()),
            |(t, k)| self.emission(k).likelihood(obs[t]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Likelihood;
    use crate::hmm::mocks::mock_two_state_gaussian;

    #[test]
    fn local_evidence_shape_and_values() {
        let m = mock_two_state_gaussian();
        let obs = [0.0, 5.0, 2.5];
        let psi = m.local_evidence(&obs).unwrap();
        assert_eq!(psi.shape(), &[3, 2]);
        // each entry is the per-state density of that observation
        for (t, &x) in obs.iter().enumerate() {
            for k in 0..2 {
                assert_abs_diff_eq!(
                    psi[[t, k]],
                    m.emission(k).likelihood(x),
                    epsilon = 1e-12
                );
            }
        }
        // observation at a state mean is far more likely under that state
        assert!(psi[[0, 0]] > psi[[0, 1]]);
        assert!(psi[[1, 1]] > psi[[1, 0]]);
    }
    #[test]
    fn local_evidence_rejects_empty_sequence() {
        let m = mock_two_state_gaussian();
        assert!(matches!(
            m.local_evidence(&[]),
            Err(HmmError::EmptySequence)
        ));
    }
}
