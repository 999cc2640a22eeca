// Invert: swap input and output labels

use wfst_core::Semiring;

use crate::vector::VectorFst;
use crate::{Fst, FstError, MutableFst};

/// Copy `fst` with every arc's input and output labels exchanged, and the
/// input and output symbol tables exchanged with them.
pub fn invert<S, F>(fst: &F) -> Result<VectorFst<S>, FstError>
where
    S: Semiring,
    F: Fst<S>,
{
    fst.validate()?;
    let mut inverted = VectorFst::copy_from(fst)?;
    inverted.map_arcs(|arc| std::mem::swap(&mut arc.ilabel, &mut arc.olabel));
    inverted.set_input_symbols(fst.output_symbols().cloned());
    inverted.set_output_symbols(fst.input_symbols().cloned());
    Ok(inverted)
}
