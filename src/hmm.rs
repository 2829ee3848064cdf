//!
//! Discrete-state HMM smoothing
//!
//! # Overview of calculation
//!
//! x = x[0],...,x[T-1] : Observations of length T, K hidden states
//!
//! Local evidence
//! psi[t][k] = P(x[t] | z_t = k)
//!
//! Forward (scaled per step, Murphy 17.4.2)
//! alpha[t][k] = P(z_t = k | x[0..=t])
//! Z[t] = per-step normalization constant; P(x) = prod_t Z[t]
//!
//! Backward (unscaled, Murphy 17.4.3)
//! beta[t][k] = P(x[t+1..] | z_t = k), beta[T-1][k] = 1
//!
//! Smoothing
//! gamma[t][k] = P(z_t = k | x) ∝ alpha[t][k] beta[t][k]
//! xi[t][i][j] = P(z_t = i, z_t+1 = j | x)
//!             ∝ A[i][j] alpha[t][i] psi[t+1][j] beta[t+1][j]
//!
pub mod backward;
pub mod common;
pub mod evidence;
pub mod forward;
pub mod mocks;
pub mod sample;
pub mod smooth;

pub use backward::BackwardResult;
pub use common::HmmModel;
pub use forward::ForwardResult;
pub use sample::History;
pub use smooth::{HmmOutput, Posterior};
