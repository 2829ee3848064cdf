//!
//! Backward algorithm definitions
//!
use super::common::HmmModel;
use super::forward::ForwardResult;
use crate::distribution::Emission;
use crate::linalg::{hadamard, matvec};
use crate::prob::Prob;
use ndarray::Array2;

///
/// Result of a backward run.
///
#[derive(Debug, Clone)]
pub struct BackwardResult {
    ///
    /// `betas[t][k] = P(x[t+1..] | z_t = k)`, with `betas[T-1][k] = 1`.
    ///
    /// These are conditional likelihoods, not probabilities: rows are not
    /// normalized, and in linear space their magnitude shrinks geometrically
    /// with distance from the terminal step. Carried in log space here, so
    /// the shrinkage costs range, not precision.
    ///
    pub betas: Array2<Prob>,
}

impl BackwardResult {
    ///
    /// The number of observations this result covers.
    ///
    pub fn n_steps(&self) -> usize {
        self.betas.nrows()
    }
}

impl<D: Emission> HmmModel<D> {
    ///
    /// Run the backward algorithm on a local-evidence matrix.
    ///
    /// ```text
    /// beta[T-1] = 1                                (no future evidence)
    /// beta[t]   = A · (psi[t+1] ⊙ beta[t+1])      t = T-2..0
    /// ```
    ///
    /// propagate future evidence through `A` itself, mirroring the forward
    /// pass's use of the transpose.
    ///
    /// # Panics
    ///
    /// Panics when `psi` is empty or its width is not K; a `psi` from
    /// `local_evidence` on this model always has the right shape.
    ///
    pub fn backward(&self, psi: &Array2<Prob>) -> BackwardResult {
        let t_len = psi.nrows();
        assert!(t_len > 0);
        assert_eq!(psi.ncols(), self.n_states());

        let mut betas = Array2::zeros((t_len, self.n_states()));
        betas.row_mut(t_len - 1).fill(Prob::one());

        for t in (0..t_len - 1).rev() {
            let future = hadamard(psi.row(t + 1), betas.row(t + 1));
            let bt = matvec(self.trans().view(), future.view());
            betas.row_mut(t).assign(&bt);
        }

        BackwardResult { betas }
    }
    ///
    /// Scaled-beta variant: divides each step by the forward scaling constant
    /// `Z[t+1]`, keeping the entries in the same range as the alphas. The
    /// smoothed outputs (gamma, xi) are identical to the unscaled variant,
    /// since both are renormalized per step.
    ///
    /// A zero scaling constant (degenerate observation) is skipped instead of
    /// divided by, so no NaN can be produced.
    ///
    /// # Panics
    ///
    /// Panics when `psi` is empty, its width is not K, or `forward` covers a
    /// different number of steps than `psi`.
    ///
    pub fn backward_scaled(&self, psi: &Array2<Prob>, forward: &ForwardResult) -> BackwardResult {
        let t_len = psi.nrows();
        assert!(t_len > 0);
        assert_eq!(psi.ncols(), self.n_states());
        assert_eq!(forward.n_steps(), t_len);

        let mut betas = Array2::zeros((t_len, self.n_states()));
        betas.row_mut(t_len - 1).fill(Prob::one());

        for t in (0..t_len - 1).rev() {
            let future = hadamard(psi.row(t + 1), betas.row(t + 1));
            let mut bt = matvec(self.trans().view(), future.view());
            let z = forward.scalings[t + 1];
            if !z.is_zero() {
                bt.mapv_inplace(|x| x / z);
            }
            betas.row_mut(t).assign(&bt);
        }

        BackwardResult { betas }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::{mock_indicator_hmm, mock_two_state_gaussian};
    use crate::prob::p;

    #[test]
    fn backward_terminal_row_is_ones() {
        let m = mock_two_state_gaussian();
        let obs = [0.1, 5.0, 4.8];
        let psi = m.local_evidence(&obs).unwrap();
        let b = m.backward(&psi);
        assert_eq!(b.n_steps(), 3);
        for k in 0..2 {
            assert!(b.betas[[2, k]].is_one());
        }
    }
    #[test]
    fn backward_single_observation() {
        let m = mock_two_state_gaussian();
        let psi = m.local_evidence(&[0.0]).unwrap();
        let b = m.backward(&psi);
        assert_eq!(b.n_steps(), 1);
        assert!(b.betas[[0, 0]].is_one());
        assert!(b.betas[[0, 1]].is_one());
    }
    #[test]
    fn backward_recursion_matches_hand_computation() {
        let m = mock_two_state_gaussian();
        let obs = [0.1, 5.0];
        let psi = m.local_evidence(&obs).unwrap();
        let b = m.backward(&psi);
        // beta[0][i] = sum_j A[i][j] psi[1][j]
        for i in 0..2 {
            let expected: Prob = (0..2).map(|j| m.trans()[[i, j]] * psi[[1, j]]).sum();
            assert_abs_diff_eq!(b.betas[[0, i]], expected, epsilon = 1e-9);
        }
    }
    #[test]
    fn backward_indicator_path() {
        let m = mock_indicator_hmm();
        let obs = [1.0, 1.0, 1.0];
        let psi = m.local_evidence(&obs).unwrap();
        let b = m.backward(&psi);
        // future evidence is certain when staying in state 0, impossible in 1
        for t in 0..2 {
            assert_abs_diff_eq!(b.betas[[t, 0]], p(1.0), epsilon = 1e-9);
            assert!(b.betas[[t, 1]].is_zero());
        }
    }
    #[test]
    fn scaled_beta_divides_by_forward_scalings() {
        let m = mock_two_state_gaussian();
        let obs = [0.1, 4.9, 5.2, 0.3];
        let psi = m.local_evidence(&obs).unwrap();
        let f = m.forward(&psi);
        let b = m.backward(&psi);
        let bs = m.backward_scaled(&psi, &f);
        // betas_scaled[t] = betas[t] / prod_{s>t} Z[s]
        for t in 0..obs.len() {
            let rest: Prob = f.scalings[t + 1..].iter().product();
            for k in 0..2 {
                assert_abs_diff_eq!(bs.betas[[t, k]], b.betas[[t, k]] / rest, epsilon = 1e-9);
            }
        }
    }
}
