//! Numerical building blocks.
//!
//! - `statistics`: mean, sample moments and the Pearson coefficient

pub mod statistics;
