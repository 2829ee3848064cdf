//!
//! Convenience re-exports of the crate's main types.
//!
pub use crate::distribution::{Emission, Gaussian, Likelihood, NormalInverseWishart};
pub use crate::error::{HmmError, Result};
pub use crate::hmm::{BackwardResult, ForwardResult, History, HmmModel, HmmOutput, Posterior};
pub use crate::prob::{lp, p, Prob};
