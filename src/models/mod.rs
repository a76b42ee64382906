//! Model evaluation for the loaded ensemble members.
//!
//! The pipeline relies on two primitive operations:
//! - evaluate one member's raw margin for a feature vector
//! - combine member probabilities into the ensemble decision
//!
//! These are implemented here per member kind.

pub mod ensemble;
pub mod gbdt;

pub use ensemble::predict;
