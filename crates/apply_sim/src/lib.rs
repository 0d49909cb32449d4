//! # apply_sim: Seeded Simulation for the Apply Toolkit
//!
//! This crate provides the random-number capability consumed by user
//! functions passed to the apply engines.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every draw comes from one seeded stream, and
//!   [`SimRng::set_seed`] resets that stream deterministically
//! - **Validation**: distribution parameters are checked up front and
//!   reported as [`SimError`] instead of panicking
//!
//! ## Module Structure
//!
//! - `prng`: [`SimRng`] and the distribution draws (`runif`, `rnorm`,
//!   `rpois`, `rbinom`)
//! - `sample`: sampling from finite populations (`sample`, `permutation`)
//! - `error`: [`SimError`]
//!
//! ## Usage Example
//!
//! ```rust
//! use apply_sim::SimRng;
//!
//! let mut rng = SimRng::from_seed(20);
//! let heights = rng.rnorm(10, 170.0, 8.0).unwrap();
//! let coins = rng.rbinom(10, 1, 0.5).unwrap();
//! let counts = rng.rpois(10, 4.0).unwrap();
//! assert_eq!(heights.len() + coins.len() + counts.len(), 30);
//! ```

#![deny(missing_docs)]

mod error;
mod prng;
mod sample;

pub use error::SimError;
pub use prng::SimRng;

#[cfg(test)]
mod tests;
