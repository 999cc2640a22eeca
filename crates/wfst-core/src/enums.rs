// Option enums shared by the operations

/// Which label an arc sort orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcSortType {
    /// Sort by input label, then output label.
    Input,
    /// Sort by output label, then input label.
    Output,
}

/// Which side of each arc a projection keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    /// Copy the input label onto the output side.
    Input,
    /// Copy the output label onto the input side.
    Output,
}

/// Which states survive a connect (trim) pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Retention {
    /// Keep a state that is accessible from the start state, or that can
    /// reach a final state. A reachable dead end is kept.
    #[default]
    AccessibleOrCoaccessible,
    /// Keep only states lying on some start-to-final path.
    AccessibleAndCoaccessible,
}

impl Retention {
    /// Decide whether a state with the given reachability survives.
    #[inline]
    pub fn retains(self, accessible: bool, coaccessible: bool) -> bool {
        match self {
            Retention::AccessibleOrCoaccessible => accessible || coaccessible,
            Retention::AccessibleAndCoaccessible => accessible && coaccessible,
        }
    }
}
