//! Weighted finite-state transducer engine.
//!
//! This crate provides an index-based graph model for weighted transducers
//! and the operations that restructure and combine them. Every operation is
//! generic over a [`Semiring`] from `wfst-core`.
//!
//! # Architecture
//!
//! - [`arc`] -- Weighted, labeled arc
//! - [`symbols`] -- Symbol table (label id to string mapping, pass-through)
//! - [`vector`] -- `VectorFst`, the owned mutable automaton
//! - [`config`] -- Per-operation options
//! - [`ops`] -- ExtendFinal, Reverse, Connect, Compose and small transforms

pub mod arc;
pub mod config;
pub mod ops;
pub mod symbols;
pub mod vector;

pub use arc::Arc;
pub use symbols::SymbolTable;
pub use vector::{State, VectorFst};
pub use wfst_core::{EPS_LABEL, Label, Semiring, StateId};

/// Error type for automaton validation and operations.
#[derive(Debug, thiserror::Error)]
pub enum FstError {
    #[error("start state {start} out of range (automaton has {num_states} states)")]
    InvalidStart { start: StateId, num_states: usize },
    #[error("arc from state {state} targets {target}, but automaton has {num_states} states")]
    DanglingArc {
        state: StateId,
        target: StateId,
        num_states: usize,
    },
    #[error("state {state} carries a weight outside the {semiring} semiring")]
    InvalidWeight {
        state: StateId,
        semiring: &'static str,
    },
    #[error("state {state} out of range (automaton has {num_states} states)")]
    StateOutOfRange { state: StateId, num_states: usize },
    #[error("semiring mismatch: {left} vs {right}")]
    SemiringMismatch {
        left: &'static str,
        right: &'static str,
    },
    #[error("symbol table mismatch: {0}")]
    SymbolTableMismatch(String),
}

/// Read-only contract consumed by operations that do not mutate.
///
/// States are addressed by dense indices `0..num_states()`. Accessors return
/// [`FstError::StateOutOfRange`] for ids outside that range.
pub trait Fst<S: Semiring> {
    /// The algebra this automaton's weights belong to.
    fn semiring(&self) -> &S;

    /// The start state, if one has been set.
    fn start(&self) -> Option<StateId>;

    /// Total number of states.
    fn num_states(&self) -> usize;

    /// Final weight of `state`; `zero` means non-final.
    fn final_weight(&self, state: StateId) -> Result<S::Weight, FstError>;

    /// Outgoing arcs of `state`, in insertion order.
    fn arcs(&self, state: StateId) -> Result<&[Arc<S::Weight>], FstError>;

    fn input_symbols(&self) -> Option<&SymbolTable>;

    fn output_symbols(&self) -> Option<&SymbolTable>;

    fn num_arcs(&self, state: StateId) -> Result<usize, FstError> {
        Ok(self.arcs(state)?.len())
    }

    /// Returns `true` if the final weight of `state` is not `zero`.
    fn is_final(&self, state: StateId) -> Result<bool, FstError> {
        let weight = self.final_weight(state)?;
        Ok(self.semiring().is_not_zero(weight))
    }

    /// Check the structural invariants every operation relies on.
    ///
    /// The start state, when set, must be in range, every arc must target
    /// an existing state, and every weight must be a member of the semiring.
    /// An automaton without a start state is valid and accepts nothing.
    fn validate(&self) -> Result<(), FstError> {
        let num_states = self.num_states();
        if let Some(start) = self.start().filter(|&s| s >= num_states) {
            return Err(FstError::InvalidStart { start, num_states });
        }

        let semiring = self.semiring();
        for state in 0..num_states {
            if !semiring.is_member(self.final_weight(state)?) {
                return Err(FstError::InvalidWeight {
                    state,
                    semiring: semiring.name(),
                });
            }
            for arc in self.arcs(state)? {
                if arc.nextstate >= num_states {
                    return Err(FstError::DanglingArc {
                        state,
                        target: arc.nextstate,
                        num_states,
                    });
                }
                if !semiring.is_member(arc.weight) {
                    return Err(FstError::InvalidWeight {
                        state,
                        semiring: semiring.name(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Structural edits on top of [`Fst`].
///
/// `add_arc` only checks the source state; the target is checked by
/// [`Fst::validate`] when an operation consumes the automaton.
pub trait MutableFst<S: Semiring>: Fst<S> {
    /// Append a non-final state and return its id.
    fn add_state(&mut self) -> StateId;

    fn set_start(&mut self, state: StateId) -> Result<(), FstError>;

    fn set_final(&mut self, state: StateId, weight: S::Weight) -> Result<(), FstError>;

    fn add_arc(&mut self, state: StateId, arc: Arc<S::Weight>) -> Result<(), FstError>;

    /// Remove `states` together with every arc targeting them.
    ///
    /// Remaining states are renumbered densely, preserving their relative
    /// order; the start state is remapped or cleared if it was deleted.
    fn delete_states(&mut self, states: &[StateId]) -> Result<(), FstError>;

    fn set_input_symbols(&mut self, symbols: Option<SymbolTable>);

    fn set_output_symbols(&mut self, symbols: Option<SymbolTable>);
}
