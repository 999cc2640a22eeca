// Label and state identifiers

/// Symbol id carried on the input or output side of an arc.
pub type Label = u32;

/// Dense index of a state inside its owning automaton.
pub type StateId = usize;

/// Reserved label meaning "no symbol consumed or emitted".
///
/// Symbol tables always place epsilon at index 0, so the id doubles as the
/// first table entry.
pub const EPS_LABEL: Label = 0;

/// Returns `true` if `label` is the epsilon label.
#[inline]
pub fn is_epsilon(label: Label) -> bool {
    label == EPS_LABEL
}
