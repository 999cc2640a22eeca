// ExtendFinal: normalize an automaton to a single final state

use wfst_core::Semiring;

use crate::arc::Arc;
use crate::vector::VectorFst;
use crate::{Fst, FstError, MutableFst};

/// Copy `fst` and funnel every final state into one new final state.
///
/// The new state is appended last with final weight `one`. Each originally
/// final state becomes non-final and gains an epsilon arc to it carrying its
/// old final weight, so path weights are unchanged. An automaton with no
/// final states yields an isolated final state.
pub fn extend_final<S, F>(fst: &F) -> Result<VectorFst<S>, FstError>
where
    S: Semiring,
    F: Fst<S>,
{
    fst.validate()?;
    let mut copy = VectorFst::copy_from(fst)?;
    let semiring = copy.semiring().clone();

    let mut finals = Vec::new();
    for state in 0..copy.num_states() {
        let weight = copy.final_weight(state)?;
        if semiring.is_not_zero(weight) {
            finals.push((state, weight));
        }
    }

    let new_final = copy.add_state_with_final(semiring.one());
    for &(state, weight) in &finals {
        copy.add_arc(state, Arc::epsilon(weight, new_final))?;
        copy.set_final(state, semiring.zero())?;
    }

    tracing::debug!(
        num_states = copy.num_states(),
        merged_finals = finals.len(),
        "extend_final"
    );
    Ok(copy)
}
