// Compose: product construction with a three-state epsilon filter

use std::collections::VecDeque;

use hashbrown::HashMap;
use wfst_core::{EPS_LABEL, Label, Semiring, StateId};

use crate::arc::Arc;
use crate::config::ComposeConfig;
use crate::ops::connect::connect_with_config;
use crate::vector::VectorFst;
use crate::{Fst, FstError, MutableFst};

/// Epsilon filter state attached to every product state.
///
/// Without a filter, a T1 epsilon-output move and a T2 epsilon-input move
/// can be interleaved in several orders, each producing its own path. The
/// filter admits exactly one of them: simultaneous moves are taken when
/// possible, and once one side has moved alone the other side may not move
/// alone until a real symbol is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterState {
    /// After a symbol match, a simultaneous epsilon move, or at the start.
    /// Every move is allowed.
    Free,
    /// T2 last moved alone on an epsilon input. T1 may not move alone.
    RightEpsilon,
    /// T1 last moved alone on an epsilon output. T2 may not move alone.
    LeftEpsilon,
}

impl FilterState {
    #[inline]
    fn allows_left_alone(self) -> bool {
        self != FilterState::RightEpsilon
    }

    #[inline]
    fn allows_right_alone(self) -> bool {
        self != FilterState::LeftEpsilon
    }

    #[inline]
    fn allows_both_epsilon(self) -> bool {
        self == FilterState::Free
    }
}

/// A state of the product automaton.
type ProductTuple = (StateId, StateId, FilterState);

/// Compose `fst1` with `fst2` using the default [`ComposeConfig`].
///
/// The result maps `x` to `z` with weight `times(w1, w2)` summed over every
/// intermediate `y` where `fst1` maps `x` to `y` with `w1` and `fst2` maps
/// `y` to `z` with `w2`. Product states are numbered in breadth-first
/// discovery order from the start pair; dead states are left in place.
pub fn compose<S, F1, F2>(fst1: &F1, fst2: &F2, semiring: &S) -> Result<VectorFst<S>, FstError>
where
    S: Semiring,
    F1: Fst<S>,
    F2: Fst<S>,
{
    compose_with_config(fst1, fst2, semiring, &ComposeConfig::default())
}

/// Compose with explicit options. See [`compose`].
pub fn compose_with_config<S, F1, F2>(
    fst1: &F1,
    fst2: &F2,
    semiring: &S,
    config: &ComposeConfig,
) -> Result<VectorFst<S>, FstError>
where
    S: Semiring,
    F1: Fst<S>,
    F2: Fst<S>,
{
    let _span = tracing::debug_span!("compose").entered();
    fst1.validate()?;
    fst2.validate()?;
    check_compatible(fst1, fst2, semiring)?;

    let mut result = VectorFst::new(semiring.clone());
    result.set_input_symbols(fst1.input_symbols().cloned());
    result.set_output_symbols(fst2.output_symbols().cloned());

    let (Some(start1), Some(start2)) = (fst1.start(), fst2.start()) else {
        return Ok(result);
    };

    let matcher = InputLabelIndex::new(fst2)?;
    let mut builder = ProductBuilder::default();
    let start = builder.state_for(&mut result, (start1, start2, FilterState::Free));
    result.set_start(start)?;

    while let Some(((q1, q2, filter), id)) = builder.queue.pop_front() {
        let final1 = fst1.final_weight(q1)?;
        let final2 = fst2.final_weight(q2)?;
        if semiring.is_not_zero(final1) && semiring.is_not_zero(final2) {
            result.set_final(id, semiring.times(final1, final2))?;
        }

        let arcs2 = fst2.arcs(q2)?;
        for a1 in fst1.arcs(q1)? {
            if a1.olabel != EPS_LABEL {
                for &j in matcher.matches(q2, a1.olabel) {
                    let a2 = &arcs2[j];
                    let target = (a1.nextstate, a2.nextstate, FilterState::Free);
                    let next = builder.state_for(&mut result, target);
                    let weight = semiring.times(a1.weight, a2.weight);
                    result.add_arc(id, Arc::new(a1.ilabel, a2.olabel, weight, next))?;
                }
                continue;
            }

            if filter.allows_both_epsilon() {
                for &j in matcher.matches(q2, EPS_LABEL) {
                    let a2 = &arcs2[j];
                    let target = (a1.nextstate, a2.nextstate, FilterState::Free);
                    let next = builder.state_for(&mut result, target);
                    let weight = semiring.times(a1.weight, a2.weight);
                    result.add_arc(id, Arc::new(a1.ilabel, a2.olabel, weight, next))?;
                }
            }
            if filter.allows_left_alone() {
                let target = (a1.nextstate, q2, FilterState::LeftEpsilon);
                let next = builder.state_for(&mut result, target);
                result.add_arc(id, Arc::new(a1.ilabel, EPS_LABEL, a1.weight, next))?;
            }
        }

        if filter.allows_right_alone() {
            for &j in matcher.matches(q2, EPS_LABEL) {
                let a2 = &arcs2[j];
                let target = (q1, a2.nextstate, FilterState::RightEpsilon);
                let next = builder.state_for(&mut result, target);
                result.add_arc(id, Arc::new(EPS_LABEL, a2.olabel, a2.weight, next))?;
            }
        }
    }

    tracing::debug!(
        num_states = result.num_states(),
        num_arcs = result.total_arcs(),
        "compose"
    );

    if config.connect {
        connect_with_config(&mut result, &config.connect_config)?;
    }
    Ok(result)
}

/// Both operands must be bound to `semiring`, and T1's output alphabet must
/// agree with T2's input alphabet where both are known.
fn check_compatible<S, F1, F2>(fst1: &F1, fst2: &F2, semiring: &S) -> Result<(), FstError>
where
    S: Semiring,
    F1: Fst<S>,
    F2: Fst<S>,
{
    for operand in [fst1.semiring(), fst2.semiring()] {
        if operand != semiring {
            return Err(FstError::SemiringMismatch {
                left: operand.name(),
                right: semiring.name(),
            });
        }
    }

    if let (Some(out1), Some(in2)) = (fst1.output_symbols(), fst2.input_symbols()) {
        if let Some(label) = out1.first_conflict(in2) {
            return Err(FstError::SymbolTableMismatch(format!(
                "label {label} is {:?} on the first output side but {:?} on the second input side",
                out1.find_symbol(label).unwrap_or_default(),
                in2.find_symbol(label).unwrap_or_default(),
            )));
        }
    }
    Ok(())
}

/// Arcs of the right operand grouped by input label, per state.
///
/// Holds arc positions so lookups return arcs in their original order.
struct InputLabelIndex {
    by_state: Vec<HashMap<Label, Vec<usize>>>,
}

impl InputLabelIndex {
    fn new<S: Semiring, F: Fst<S>>(fst: &F) -> Result<Self, FstError> {
        let mut by_state = Vec::with_capacity(fst.num_states());
        for state in 0..fst.num_states() {
            let mut groups: HashMap<Label, Vec<usize>> = HashMap::new();
            for (pos, arc) in fst.arcs(state)?.iter().enumerate() {
                groups.entry(arc.ilabel).or_default().push(pos);
            }
            by_state.push(groups);
        }
        Ok(Self { by_state })
    }

    fn matches(&self, state: StateId, label: Label) -> &[usize] {
        self.by_state[state]
            .get(&label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Assigns result ids to product tuples and queues newly discovered ones.
#[derive(Default)]
struct ProductBuilder {
    ids: HashMap<ProductTuple, StateId>,
    queue: VecDeque<(ProductTuple, StateId)>,
}

impl ProductBuilder {
    fn state_for<S: Semiring>(&mut self, result: &mut VectorFst<S>, tuple: ProductTuple) -> StateId {
        if let Some(&id) = self.ids.get(&tuple) {
            return id;
        }
        let id = result.add_state();
        self.ids.insert(tuple, id);
        self.queue.push_back((tuple, id));
        id
    }
}
