// ArcSort: order each state's arcs by label

use wfst_core::Semiring;
use wfst_core::enums::ArcSortType;

use crate::arc::compare_arcs;
use crate::vector::VectorFst;
use crate::{Fst, FstError};

/// Copy `fst` with the arcs of every state stably sorted by label.
///
/// Only arc order changes, so the weighted language is preserved.
pub fn arc_sort<S, F>(fst: &F, sort_type: ArcSortType) -> Result<VectorFst<S>, FstError>
where
    S: Semiring,
    F: Fst<S>,
{
    fst.validate()?;
    let mut sorted = VectorFst::copy_from(fst)?;
    sorted.sort_arcs_by(|a, b| compare_arcs(a, b, sort_type));
    Ok(sorted)
}
