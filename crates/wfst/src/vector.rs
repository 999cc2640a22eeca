// Owned mutable automaton backed by a state vector

use std::cmp::Ordering;

use wfst_core::{Semiring, StateId};

use crate::arc::Arc;
use crate::symbols::SymbolTable;
use crate::{Fst, FstError, MutableFst};

/// A node of a [`VectorFst`]: its final weight and outgoing arcs.
///
/// The state's id is its position in the owning automaton.
#[derive(Debug, Clone, PartialEq)]
pub struct State<W> {
    pub final_weight: W,
    pub arcs: Vec<Arc<W>>,
}

impl<W> State<W> {
    fn new(final_weight: W) -> Self {
        Self {
            final_weight,
            arcs: Vec::new(),
        }
    }
}

/// Weighted transducer stored as a vector of states.
///
/// Arcs reference their targets by index, so the graph has no ownership
/// cycles and copying an automaton never aliases the original's states.
#[derive(Debug, Clone)]
pub struct VectorFst<S: Semiring> {
    semiring: S,
    states: Vec<State<S::Weight>>,
    start: Option<StateId>,
    input_symbols: Option<SymbolTable>,
    output_symbols: Option<SymbolTable>,
}

impl<S: Semiring> VectorFst<S> {
    /// Create an empty automaton bound to `semiring`.
    pub fn new(semiring: S) -> Self {
        Self::with_capacity(semiring, 0)
    }

    pub fn with_capacity(semiring: S, num_states: usize) -> Self {
        Self {
            semiring,
            states: Vec::with_capacity(num_states),
            start: None,
            input_symbols: None,
            output_symbols: None,
        }
    }

    /// Deep copy of any [`Fst`]: states, arcs, start and symbol tables.
    pub fn copy_from<F: Fst<S>>(fst: &F) -> Result<Self, FstError> {
        let num_states = fst.num_states();
        let mut copy = Self::with_capacity(fst.semiring().clone(), num_states);
        for state in 0..num_states {
            copy.states.push(State {
                final_weight: fst.final_weight(state)?,
                arcs: fst.arcs(state)?.to_vec(),
            });
        }
        copy.start = fst.start();
        copy.input_symbols = fst.input_symbols().cloned();
        copy.output_symbols = fst.output_symbols().cloned();
        Ok(copy)
    }

    /// Append a state with the given final weight and return its id.
    pub fn add_state_with_final(&mut self, final_weight: S::Weight) -> StateId {
        self.states.push(State::new(final_weight));
        self.states.len() - 1
    }

    /// Total number of arcs over all states.
    pub fn total_arcs(&self) -> usize {
        self.states.iter().map(|s| s.arcs.len()).sum()
    }

    /// Apply `f` to every arc in place, state by state.
    pub fn map_arcs<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Arc<S::Weight>),
    {
        for state in &mut self.states {
            state.arcs.iter_mut().for_each(&mut f);
        }
    }

    /// Stable-sort the arcs of every state with `compare`.
    pub fn sort_arcs_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Arc<S::Weight>, &Arc<S::Weight>) -> Ordering,
    {
        for state in &mut self.states {
            state.arcs.sort_by(&mut compare);
        }
    }

    /// All states in id order.
    pub fn states(&self) -> &[State<S::Weight>] {
        &self.states
    }

    fn state(&self, state: StateId) -> Result<&State<S::Weight>, FstError> {
        self.states.get(state).ok_or(FstError::StateOutOfRange {
            state,
            num_states: self.states.len(),
        })
    }

    fn state_mut(&mut self, state: StateId) -> Result<&mut State<S::Weight>, FstError> {
        let num_states = self.states.len();
        self.states
            .get_mut(state)
            .ok_or(FstError::StateOutOfRange { state, num_states })
    }
}

impl<S: Semiring> Fst<S> for VectorFst<S> {
    fn semiring(&self) -> &S {
        &self.semiring
    }

    fn start(&self) -> Option<StateId> {
        self.start
    }

    fn num_states(&self) -> usize {
        self.states.len()
    }

    fn final_weight(&self, state: StateId) -> Result<S::Weight, FstError> {
        Ok(self.state(state)?.final_weight)
    }

    fn arcs(&self, state: StateId) -> Result<&[Arc<S::Weight>], FstError> {
        Ok(&self.state(state)?.arcs)
    }

    fn input_symbols(&self) -> Option<&SymbolTable> {
        self.input_symbols.as_ref()
    }

    fn output_symbols(&self) -> Option<&SymbolTable> {
        self.output_symbols.as_ref()
    }
}

impl<S: Semiring> MutableFst<S> for VectorFst<S> {
    fn add_state(&mut self) -> StateId {
        let zero = self.semiring.zero();
        self.add_state_with_final(zero)
    }

    fn set_start(&mut self, state: StateId) -> Result<(), FstError> {
        self.state(state)?;
        self.start = Some(state);
        Ok(())
    }

    fn set_final(&mut self, state: StateId, weight: S::Weight) -> Result<(), FstError> {
        self.state_mut(state)?.final_weight = weight;
        Ok(())
    }

    fn add_arc(&mut self, state: StateId, arc: Arc<S::Weight>) -> Result<(), FstError> {
        self.state_mut(state)?.arcs.push(arc);
        Ok(())
    }

    fn delete_states(&mut self, states: &[StateId]) -> Result<(), FstError> {
        let num_states = self.states.len();
        let mut doomed = vec![false; num_states];
        for &state in states {
            if state >= num_states {
                return Err(FstError::StateOutOfRange { state, num_states });
            }
            doomed[state] = true;
        }

        // old id -> new id
        let mut remap: Vec<Option<StateId>> = Vec::with_capacity(num_states);
        let mut next_id = 0;
        for &gone in &doomed {
            if gone {
                remap.push(None);
            } else {
                remap.push(Some(next_id));
                next_id += 1;
            }
        }

        let old_states = std::mem::take(&mut self.states);
        self.states = old_states
            .into_iter()
            .zip(&doomed)
            .filter(|(_, gone)| !**gone)
            .map(|(mut state, _)| {
                state.arcs.retain_mut(|arc| {
                    match remap.get(arc.nextstate).copied().flatten() {
                        Some(target) => {
                            arc.nextstate = target;
                            true
                        }
                        None => false,
                    }
                });
                state
            })
            .collect();

        self.start = self.start.and_then(|s| remap.get(s).copied().flatten());
        Ok(())
    }

    fn set_input_symbols(&mut self, symbols: Option<SymbolTable>) {
        self.input_symbols = symbols;
    }

    fn set_output_symbols(&mut self, symbols: Option<SymbolTable>) {
        self.output_symbols = symbols;
    }
}

/// Structural equality: same semiring, start, symbol tables, and state by
/// state the same final weights and arcs in the same order. Weights are
/// compared with the semiring's tolerance.
impl<S: Semiring> PartialEq for VectorFst<S> {
    fn eq(&self, other: &Self) -> bool {
        if self.semiring != other.semiring
            || self.start != other.start
            || self.states.len() != other.states.len()
            || self.input_symbols != other.input_symbols
            || self.output_symbols != other.output_symbols
        {
            return false;
        }
        let sr = &self.semiring;
        self.states.iter().zip(&other.states).all(|(a, b)| {
            sr.approx_eq(a.final_weight, b.final_weight)
                && a.arcs.len() == b.arcs.len()
                && a.arcs.iter().zip(&b.arcs).all(|(x, y)| {
                    x.ilabel == y.ilabel
                        && x.olabel == y.olabel
                        && x.nextstate == y.nextstate
                        && sr.approx_eq(x.weight, y.weight)
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfst_core::TropicalSemiring;

    /// 0 -a-> 1 -b-> 2(final), plus 0 -c-> 2
    fn build_small() -> VectorFst<TropicalSemiring> {
        let mut fst = VectorFst::new(TropicalSemiring);
        let s0 = fst.add_state();
        let s1 = fst.add_state();
        let s2 = fst.add_state();
        fst.set_start(s0).unwrap();
        fst.set_final(s2, 0.5).unwrap();
        fst.add_arc(s0, Arc::new(1, 1, 1.0, s1)).unwrap();
        fst.add_arc(s1, Arc::new(2, 2, 2.0, s2)).unwrap();
        fst.add_arc(s0, Arc::new(3, 3, 3.0, s2)).unwrap();
        fst
    }

    #[test]
    fn build_and_query() {
        let fst = build_small();
        assert_eq!(fst.num_states(), 3);
        assert_eq!(fst.start(), Some(0));
        assert_eq!(fst.num_arcs(0).unwrap(), 2);
        assert!(fst.is_final(2).unwrap());
        assert!(!fst.is_final(0).unwrap());
        assert_eq!(fst.total_arcs(), 3);
        fst.validate().unwrap();
    }

    #[test]
    fn out_of_range_accessors() {
        let mut fst = build_small();
        assert!(matches!(
            fst.final_weight(7),
            Err(FstError::StateOutOfRange {
                state: 7,
                num_states: 3
            })
        ));
        assert!(fst.set_start(3).is_err());
        assert!(fst.add_arc(9, Arc::new(1, 1, 0.0, 0)).is_err());
    }

    #[test]
    fn validate_rejects_dangling_arc() {
        let mut fst = build_small();
        fst.add_arc(1, Arc::new(1, 1, 0.0, 42)).unwrap();
        let err = fst.validate().unwrap_err();
        assert!(matches!(
            err,
            FstError::DanglingArc {
                state: 1,
                target: 42,
                num_states: 3
            }
        ));
    }

    #[test]
    fn validate_accepts_missing_start() {
        let mut fst = VectorFst::new(TropicalSemiring);
        fst.add_state();
        fst.validate().unwrap();
    }

    #[test]
    fn validate_rejects_start_out_of_range() {
        let mut fst = build_small();
        // set_start checks its argument, so go around it
        fst.start = Some(4);
        assert!(matches!(
            fst.validate(),
            Err(FstError::InvalidStart {
                start: 4,
                num_states: 3
            })
        ));
    }

    #[test]
    fn validate_accepts_empty() {
        let fst = VectorFst::new(TropicalSemiring);
        fst.validate().unwrap();
    }

    #[test]
    fn validate_rejects_nan_weight() {
        let mut fst = build_small();
        fst.set_final(1, f64::NAN).unwrap();
        assert!(matches!(
            fst.validate(),
            Err(FstError::InvalidWeight { state: 1, .. })
        ));
    }

    #[test]
    fn delete_states_remaps_arcs_and_start() {
        let mut fst = build_small();
        fst.delete_states(&[1]).unwrap();
        assert_eq!(fst.num_states(), 2);
        assert_eq!(fst.start(), Some(0));
        // 0 -a-> 1 was dropped, 0 -c-> 2 becomes 0 -c-> 1
        let arcs = fst.arcs(0).unwrap();
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].ilabel, 3);
        assert_eq!(arcs[0].nextstate, 1);
        assert!(fst.is_final(1).unwrap());
        fst.validate().unwrap();
    }

    #[test]
    fn delete_start_clears_it() {
        let mut fst = build_small();
        fst.delete_states(&[0]).unwrap();
        assert_eq!(fst.start(), None);
        assert_eq!(fst.num_states(), 2);
    }

    #[test]
    fn delete_out_of_range_leaves_fst_untouched() {
        let mut fst = build_small();
        let before = fst.clone();
        assert!(fst.delete_states(&[0, 5]).is_err());
        assert_eq!(fst, before);
    }

    #[test]
    fn copy_is_deep_and_equal() {
        let fst = build_small();
        let mut copy = VectorFst::copy_from(&fst).unwrap();
        assert_eq!(copy, fst);
        copy.set_final(0, 1.0).unwrap();
        assert_ne!(copy, fst);
        assert!(!fst.is_final(0).unwrap());
    }

    #[test]
    fn equality_tolerates_rounding() {
        let a = build_small();
        let mut b = build_small();
        b.set_final(2, 0.5 + 1e-9).unwrap();
        assert_eq!(a, b);
    }
}
