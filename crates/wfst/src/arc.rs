// Weighted, labeled arc

use std::cmp::Ordering;

use wfst_core::enums::ArcSortType;
use wfst_core::{EPS_LABEL, Label, StateId};

/// A directed edge owned by its source state.
///
/// - `ilabel`: symbol consumed (`EPS_LABEL` for none)
/// - `olabel`: symbol emitted (`EPS_LABEL` for none)
/// - `weight`: semiring weight of taking the arc
/// - `nextstate`: index of the target state in the same automaton
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc<W> {
    pub ilabel: Label,
    pub olabel: Label,
    pub weight: W,
    pub nextstate: StateId,
}

impl<W> Arc<W> {
    pub fn new(ilabel: Label, olabel: Label, weight: W, nextstate: StateId) -> Self {
        Self {
            ilabel,
            olabel,
            weight,
            nextstate,
        }
    }

    /// Epsilon-to-epsilon arc.
    pub fn epsilon(weight: W, nextstate: StateId) -> Self {
        Self::new(EPS_LABEL, EPS_LABEL, weight, nextstate)
    }

    /// Returns `true` if both labels are epsilon.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.ilabel == EPS_LABEL && self.olabel == EPS_LABEL
    }
}

/// Ordering used by arc sorting. Ties on both labels keep insertion order
/// because callers use a stable sort.
pub fn compare_arcs<W>(a: &Arc<W>, b: &Arc<W>, sort_type: ArcSortType) -> Ordering {
    match sort_type {
        ArcSortType::Input => (a.ilabel, a.olabel).cmp(&(b.ilabel, b.olabel)),
        ArcSortType::Output => (a.olabel, a.ilabel).cmp(&(b.olabel, b.ilabel)),
    }
}
