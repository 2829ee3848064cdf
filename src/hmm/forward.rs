//!
//! Forward algorithm definitions
//!
use super::common::HmmModel;
use crate::distribution::Emission;
use crate::linalg::{hadamard, matvec_t, normalize};
use crate::prob::Prob;
use ndarray::Array2;

///
/// Result of a forward run: the filtered beliefs and the per-step scaling
/// constants separated out by the normalization.
///
#[derive(Debug, Clone)]
pub struct ForwardResult {
    ///
    /// `alphas[t][k] = P(z_t = k | x[0..=t])`; each row sums to 1 unless the
    /// step was degenerate (scaling constant zero).
    ///
    pub alphas: Array2<Prob>,
    ///
    /// `scalings[t] = Z[t]`, the sum removed at step t. `Z[t] = 0` marks an
    /// observation impossible under every state.
    ///
    pub scalings: Vec<Prob>,
}

impl ForwardResult {
    ///
    /// The number of observations this result covers.
    ///
    pub fn n_steps(&self) -> usize {
        self.alphas.nrows()
    }
    ///
    /// Full sequence probability `P(x) = prod_t Z[t]` (Murphy 17.4.2).
    ///
    pub fn full_prob(&self) -> Prob {
        self.scalings.iter().product()
    }
}

impl<D: Emission> HmmModel<D> {
    ///
    /// Run the forward algorithm on a local-evidence matrix.
    ///
    /// ```text
    /// alpha[0] = normalize(psi[0] ⊙ pi)
    /// alpha[t] = normalize(psi[t] ⊙ (Aᵗ · alpha[t-1]))   t = 1..T-1
    /// ```
    ///
    /// predict through the transpose of `A`, then reweight by the local
    /// evidence. Strictly left-to-right: `alpha[t]` depends on `alpha[t-1]`.
    ///
    /// # Panics
    ///
    /// Panics when `psi` is empty or its width is not K; a `psi` from
    /// `local_evidence` on this model always has the right shape.
    ///
    pub fn forward(&self, psi: &Array2<Prob>) -> ForwardResult {
        let t_len = psi.nrows();
        assert!(t_len > 0);
        assert_eq!(psi.ncols(), self.n_states());

        let mut alphas = Array2::zeros((t_len, self.n_states()));
        let mut scalings = Vec::with_capacity(t_len);

        let (a0, z0) = normalize(hadamard(psi.row(0), self.init().view()).view());
        alphas.row_mut(0).assign(&a0);
        scalings.push(z0);

        for t in 1..t_len {
            let predicted = matvec_t(self.trans().view(), alphas.row(t - 1));
            let (at, zt) = normalize(hadamard(psi.row(t), predicted.view()).view());
            alphas.row_mut(t).assign(&at);
            scalings.push(zt);
        }

        ForwardResult { alphas, scalings }
    }
}
