// Reverse: automaton accepting the reversed weighted language

use wfst_core::Semiring;

use crate::arc::Arc;
use crate::ops::extend_final::extend_final;
use crate::vector::VectorFst;
use crate::{Fst, FstError, MutableFst};

/// Build the reversal of `fst`.
///
/// The input is first normalized with [`extend_final`], so it has exactly
/// one final state. State `i` of the normalized automaton maps to state `i`
/// of the result. The image of that final state becomes the start, the image
/// of the old start becomes final with weight `one`, and every arc
/// `u -i:o/w-> v` becomes `v -i:o/reverse(w)-> u`.
///
/// Labels keep their side, but the symbol tables are swapped: the result's
/// input table is the source's output table and vice versa.
pub fn reverse<S, F>(fst: &F) -> Result<VectorFst<S>, FstError>
where
    S: Semiring,
    F: Fst<S>,
{
    fst.validate()?;
    let normalized = extend_final(fst)?;
    let semiring = normalized.semiring().clone();
    let num_states = normalized.num_states();

    let mut reversed = VectorFst::with_capacity(semiring.clone(), num_states);
    reversed.set_input_symbols(normalized.output_symbols().cloned());
    reversed.set_output_symbols(normalized.input_symbols().cloned());

    for state in 0..num_states {
        let image = reversed.add_state();
        // After normalization exactly one state is final, so the last
        // candidate is also the only one.
        if normalized.is_final(state)? {
            reversed.set_start(image)?;
        }
    }

    if let Some(start) = normalized.start() {
        reversed.set_final(start, semiring.one())?;
    }

    for state in 0..num_states {
        for arc in normalized.arcs(state)? {
            reversed.add_arc(
                arc.nextstate,
                Arc::new(arc.ilabel, arc.olabel, semiring.reverse(arc.weight), state),
            )?;
        }
    }

    tracing::debug!(
        num_states,
        num_arcs = reversed.total_arcs(),
        "reverse"
    );
    Ok(reversed)
}
