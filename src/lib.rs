pub mod distribution;
pub mod error;
pub mod hmm;
pub mod linalg;
pub mod prelude;
pub mod prob;

#[cfg(test)]
#[macro_use]
extern crate approx;
