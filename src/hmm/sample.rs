//!
//! Sampling (state, observation) paths from the model
//!
use super::common::HmmModel;
use crate::distribution::Emission;
use crate::prob::Prob;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// A sampled realization of the HMM: the hidden-state path together with the
/// observation each state emitted.
///
#[derive(Debug, Clone)]
pub struct History(pub Vec<(usize, f64)>);

impl History {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    ///
    /// The hidden-state path.
    ///
    pub fn to_states(&self) -> Vec<usize> {
        self.0.iter().map(|&(state, _)| state).collect()
    }
    ///
    /// The observation sequence, as the smoother consumes it.
    ///
    pub fn to_observations(&self) -> Vec<f64> {
        self.0.iter().map(|&(_, x)| x).collect()
    }
}

///
/// pick randomly from the choices with its own probability.
///
pub fn pick_with_prob<R: Rng, T: Copy>(rng: &mut R, choices: &[(T, Prob)]) -> T {
    choices
        .choose_weighted(rng, |item| item.1.to_value())
        .unwrap()
        .0
}

impl<D: Emission> HmmModel<D> {
    ///
    /// Sample a (state, observation) path of the given length with a seeded
    /// RNG: the first state from `pi`, each next state from the current
    /// state's row of `A`, and each observation from the state's emission
    /// model.
    ///
    pub fn sample(&self, length: usize, seed: u64) -> History {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut history = Vec::with_capacity(length);
        let mut state = 0;
        for t in 0..length {
            state = if t == 0 {
                self.pick_init_state(&mut rng)
            } else {
                self.pick_next_state(&mut rng, state)
            };
            let x = self.emission(state).sample(&mut rng);
            history.push((state, x));
        }
        History(history)
    }
    fn pick_init_state<R: Rng>(&self, rng: &mut R) -> usize {
        let choices: Vec<(usize, Prob)> =
            self.init().iter().copied().enumerate().collect();
        pick_with_prob(rng, &choices)
    }
    fn pick_next_state<R: Rng>(&self, rng: &mut R, state: usize) -> usize {
        let choices: Vec<(usize, Prob)> = self
            .trans()
            .row(state)
            .iter()
            .copied()
            .enumerate()
            .collect();
        pick_with_prob(rng, &choices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::mock_two_state_gaussian;

    #[test]
    fn sample_is_reproducible() {
        let m = mock_two_state_gaussian();
        let h1 = m.sample(50, 7);
        let h2 = m.sample(50, 7);
        assert_eq!(h1.len(), 50);
        assert_eq!(h1.to_states(), h2.to_states());
        assert_eq!(h1.to_observations(), h2.to_observations());
        let h3 = m.sample(50, 8);
        assert_ne!(h1.to_observations(), h3.to_observations());
    }
    #[test]
    fn sample_observations_follow_emitting_state() {
        // states are well separated (means 0 and 5, unit variance), so each
        // observation should land near its emitting state's mean
        let m = mock_two_state_gaussian();
        let h = m.sample(300, 0);
        for (state, x) in h.0.iter() {
            let mu = m.emission(*state).mu();
            assert!((x - mu).abs() < 5.0);
        }
        // both states show up in a long path
        let states = h.to_states();
        assert!(states.iter().any(|&s| s == 0));
        assert!(states.iter().any(|&s| s == 1));
    }
    #[test]
    fn pick_with_prob_respects_weights() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let choices = [(0usize, crate::prob::p(0.9)), (1usize, crate::prob::p(0.1))];
        let n = 5000;
        let hits = (0..n)
            .filter(|_| pick_with_prob(&mut rng, &choices) == 0)
            .count();
        let frac = hits as f64 / n as f64;
        assert!((frac - 0.9).abs() < 0.02);
    }
}
