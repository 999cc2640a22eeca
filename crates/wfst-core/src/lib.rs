//! Shared types for the weighted finite-state transducer toolkit.
//!
//! Everything in this crate is independent of the graph representation:
//!
//! - [`semiring`] -- the weight algebra every operation is generic over
//! - [`label`] -- label and state identifiers, the epsilon label
//! - [`enums`] -- option enums shared by the operations

pub mod enums;
pub mod label;
pub mod semiring;

pub use label::{EPS_LABEL, Label, StateId};
pub use semiring::{LogSemiring, ProbabilitySemiring, Semiring, TropicalSemiring};
