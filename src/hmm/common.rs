//!
//! Definition of the discrete-state HMM model
//!
use crate::distribution::Emission;
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use ndarray::{Array1, Array2};

///
/// A K-state HMM: transition matrix `A` (K×K, row i = distribution over the
/// next state given current state i), initial distribution `pi` (length K)
/// and one emission model per state.
///
/// Rows of `A` and `pi` are expected to sum to 1; this is the caller's
/// responsibility and is deliberately not enforced here. Dimensions are
/// checked at construction, so every constructed model is consistent.
///
/// The emission models are owned by the model and only read during
/// inference; they are mutated exclusively through [`HmmModel::emission_mut`]
/// between inference rounds (e.g. by an EM driver).
///
pub struct HmmModel<D: Emission> {
    trans: Array2<Prob>,
    init: Array1<Prob>,
    emissions: Vec<D>,
}

impl<D: Emission> HmmModel<D> {
    ///
    /// Create a model, failing fast on any dimension mismatch between
    /// `trans`, `init` and `emissions`.
    ///
    pub fn new(trans: Array2<Prob>, init: Array1<Prob>, emissions: Vec<D>) -> Result<Self> {
        let k = emissions.len();
        if k == 0 {
            return Err(HmmError::DimensionMismatch {
                what: "emission models",
                expected: 1,
                found: 0,
            });
        }
        if trans.nrows() != k || trans.ncols() != k {
            return Err(HmmError::DimensionMismatch {
                what: "transition matrix",
                expected: k,
                found: if trans.nrows() != k {
                    trans.nrows()
                } else {
                    trans.ncols()
                },
            });
        }
        if init.len() != k {
            return Err(HmmError::DimensionMismatch {
                what: "initial distribution",
                expected: k,
                found: init.len(),
            });
        }
        Ok(HmmModel {
            trans,
            init,
            emissions,
        })
    }
    ///
    /// The number of hidden states K.
    ///
    pub fn n_states(&self) -> usize {
        self.emissions.len()
    }
    ///
    /// Transition matrix `A`.
    ///
    pub fn trans(&self) -> &Array2<Prob> {
        &self.trans
    }
    ///
    /// Initial distribution `pi`.
    ///
    pub fn init(&self) -> &Array1<Prob> {
        &self.init
    }
    ///
    /// The emission model of state `k`.
    ///
    pub fn emission(&self, k: usize) -> &D {
        &self.emissions[k]
    }
    ///
    /// Mutable access for explicit parameter updates between inference
    /// rounds. Never call during an in-flight smoothing computation.
    ///
    pub fn emission_mut(&mut self, k: usize) -> &mut D {
        &mut self.emissions[k]
    }
    pub fn emissions(&self) -> &[D] {
        &self.emissions
    }
}
