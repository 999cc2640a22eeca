// Project: turn a transducer into an acceptor on one of its sides

use wfst_core::Semiring;
use wfst_core::enums::ProjectType;

use crate::vector::VectorFst;
use crate::{Fst, FstError, MutableFst};

/// Copy `fst`, replacing one label of every arc with the other.
///
/// With [`ProjectType::Input`] each output label becomes the input label,
/// and the output symbol table becomes a copy of the input table.
/// [`ProjectType::Output`] is the mirror image.
pub fn project<S, F>(fst: &F, project_type: ProjectType) -> Result<VectorFst<S>, FstError>
where
    S: Semiring,
    F: Fst<S>,
{
    fst.validate()?;
    let mut projected = VectorFst::copy_from(fst)?;
    projected.map_arcs(|arc| match project_type {
        ProjectType::Input => arc.olabel = arc.ilabel,
        ProjectType::Output => arc.ilabel = arc.olabel,
    });

    let table = match project_type {
        ProjectType::Input => fst.input_symbols(),
        ProjectType::Output => fst.output_symbols(),
    }
    .cloned();
    projected.set_input_symbols(table.clone());
    projected.set_output_symbols(table);
    Ok(projected)
}
