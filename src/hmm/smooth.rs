//!
//! Smoother: combines the forward and backward passes into the posterior
//! single-state marginals (gamma) and two-slice marginals (xi).
//!
use super::backward::BackwardResult;
use super::common::HmmModel;
use super::forward::ForwardResult;
use crate::distribution::Emission;
use crate::error::Result;
use crate::linalg::{hadamard, normalize, outer};
use crate::prob::Prob;
use itertools::izip;
use log::debug;
use ndarray::{Array1, Array2, ArrayView2};

///
/// Paired forward/backward results over the same local-evidence matrix.
///
#[derive(Debug, Clone)]
pub struct HmmOutput {
    pub forward: ForwardResult,
    pub backward: BackwardResult,
}

///
/// Smoothed posterior over the hidden state sequence.
///
#[derive(Debug, Clone)]
pub struct Posterior {
    ///
    /// `gamma[t][k] = P(z_t = k | x)`; T×K, each non-degenerate row sums to 1.
    ///
    pub gamma: Array2<Prob>,
    ///
    /// `xi[t][i][j] = P(z_t = i, z_t+1 = j | x)`; T-1 slices of K×K, each
    /// non-degenerate slice sums to 1 over all (i, j).
    ///
    pub xi: Vec<Array2<Prob>>,
    ///
    /// Full sequence probability `P(x)` from the forward scaling constants.
    ///
    pub full_prob: Prob,
}

impl Posterior {
    pub fn n_steps(&self) -> usize {
        self.gamma.nrows()
    }
    pub fn n_states(&self) -> usize {
        self.gamma.ncols()
    }
    ///
    /// Most probable state at each timestep (posterior mode per slice).
    ///
    pub fn modes(&self) -> Vec<usize> {
        (0..self.n_steps())
            .map(|t| {
                self.gamma
                    .row(t)
                    .iter()
                    .enumerate()
                    .max_by_key(|&(_, p)| *p)
                    .map(|(k, _)| k)
                    .unwrap()
            })
            .collect()
    }
}

impl<D: Emission + Sync> HmmModel<D> {
    ///
    /// Run forward and backward over the same evidence matrix. The two
    /// passes read only shared immutable inputs and write disjoint outputs,
    /// so they run concurrently. The model is borrowed from both threads,
    /// hence the `Sync` bound on the emission models.
    ///
    pub fn run(&self, psi: &Array2<Prob>) -> HmmOutput {
        let (forward, backward) = rayon::join(|| self.forward(psi), || self.backward(psi));
        HmmOutput { forward, backward }
    }
    ///
    /// Full smoothing: local evidence, forward/backward, gamma and xi.
    ///
    /// T = 1 gives a single-row gamma and an empty xi (no transitions to
    /// infer); T = 0 is rejected. A zero-likelihood sequence is returned as
    /// data (`full_prob` zero, degenerate rows all zero), never as an error.
    ///
    pub fn smooth(&self, obs: &[f64]) -> Result<Posterior> {
        let psi = self.local_evidence(obs)?;
        debug!("smoothing T={} K={}", obs.len(), self.n_states());
        let o = self.run(&psi);
        let gamma = o.to_gamma();
        let xi = o.to_xi(self.trans().view(), &psi);
        let full_prob = o.to_full_prob_forward();
        debug!("smoothing done full_prob={}", full_prob);
        Ok(Posterior {
            gamma,
            xi,
            full_prob,
        })
    }
}

impl HmmOutput {
    ///
    /// `gamma[t] = normalize(alpha[t] ⊙ beta[t])`
    ///
    pub fn to_gamma(&self) -> Array2<Prob> {
        let mut gamma = Array2::zeros(self.forward.alphas.raw_dim());
        let rows = izip!(
            self.forward.alphas.outer_iter(),
            self.backward.betas.outer_iter()
        );
        for (t, (alpha, beta)) in rows.enumerate() {
            let (g, _) = normalize(hadamard(alpha, beta).view());
            gamma.row_mut(t).assign(&g);
        }
        gamma
    }
    ///
    /// `xi[t] = normalize(A ⊙ outer(alpha[t], psi[t+1] ⊙ beta[t+1]))`
    ///
    /// the joint of (i at t, j at t+1) is proportional to the filtered belief
    /// in i, the transition i→j, and the evidence-weighted future likelihood
    /// of j; each K×K slice is renormalized as a whole.
    ///
    pub fn to_xi(&self, trans: ArrayView2<Prob>, psi: &Array2<Prob>) -> Vec<Array2<Prob>> {
        let t_len = self.forward.n_steps();
        (0..t_len.saturating_sub(1))
            .map(|t| {
                let future = hadamard(psi.row(t + 1), self.backward.betas.row(t + 1));
                let joint = hadamard(
                    trans,
                    outer(self.forward.alphas.row(t), future.view()).view(),
                );
                normalize(joint.view()).0
            })
            .collect()
    }
    ///
    /// `P(x)` from the forward scaling constants.
    ///
    pub fn to_full_prob_forward(&self) -> Prob {
        self.forward.full_prob()
    }
    ///
    /// `P(x) = sum_k pi[k] psi[0][k] beta[0][k]` from the backward messages.
    /// Must agree with [`HmmOutput::to_full_prob_forward`]; kept as an
    /// internal consistency check.
    ///
    pub fn to_full_prob_backward(&self, init: &Array1<Prob>, psi: &Array2<Prob>) -> Prob {
        izip!(init.iter(), psi.row(0), self.backward.betas.row(0))
            .map(|(&pi_k, &psi_k, &beta_k)| pi_k * psi_k * beta_k)
            .sum()
    }
}
