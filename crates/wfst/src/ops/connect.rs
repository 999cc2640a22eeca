// Connect: remove states that cannot take part in a successful path

use wfst_core::{Semiring, StateId};

use crate::config::ConnectConfig;
use crate::{Fst, FstError, MutableFst};

/// Trim `fst` in place with the default [`ConnectConfig`].
///
/// A state is deleted only if it is neither accessible (reachable from the
/// start state) nor coaccessible (able to reach a final state). A reachable
/// dead end is therefore kept. Arcs into deleted states are removed and the
/// remaining states are renumbered densely.
pub fn connect<S, M>(fst: &mut M) -> Result<(), FstError>
where
    S: Semiring,
    M: MutableFst<S>,
{
    connect_with_config(fst, &ConnectConfig::default())
}

/// Trim `fst` in place, keeping the states selected by `config.retention`.
pub fn connect_with_config<S, M>(fst: &mut M, config: &ConnectConfig) -> Result<(), FstError>
where
    S: Semiring,
    M: MutableFst<S>,
{
    let _span = tracing::debug_span!("connect").entered();
    fst.validate()?;

    let accessible = accessible_states(fst)?;
    let coaccessible = coaccessible_states(fst)?;

    let doomed: Vec<StateId> = (0..fst.num_states())
        .filter(|&s| !config.retention.retains(accessible[s], coaccessible[s]))
        .collect();

    tracing::debug!(
        num_states = fst.num_states(),
        deleted = doomed.len(),
        retention = ?config.retention,
        "connect"
    );
    fst.delete_states(&doomed)
}

/// Mark every state reachable from the start state.
///
/// Depth-first with an explicit stack; self-loops and cycles are cut by the
/// visited set.
pub fn accessible_states<S, F>(fst: &F) -> Result<Vec<bool>, FstError>
where
    S: Semiring,
    F: Fst<S>,
{
    let mut visited = vec![false; fst.num_states()];
    let Some(start) = fst.start() else {
        return Ok(visited);
    };

    let mut stack = vec![start];
    visited[start] = true;
    while let Some(state) = stack.pop() {
        for arc in fst.arcs(state)? {
            if !visited[arc.nextstate] {
                visited[arc.nextstate] = true;
                stack.push(arc.nextstate);
            }
        }
    }
    Ok(visited)
}

/// Mark every state from which some final state can be reached.
///
/// Builds a predecessor index and searches backward from all final states
/// at once. Final states are coaccessible through the empty path.
pub fn coaccessible_states<S, F>(fst: &F) -> Result<Vec<bool>, FstError>
where
    S: Semiring,
    F: Fst<S>,
{
    let num_states = fst.num_states();
    let mut predecessors: Vec<Vec<StateId>> = vec![Vec::new(); num_states];
    for state in 0..num_states {
        for arc in fst.arcs(state)? {
            if arc.nextstate != state {
                predecessors[arc.nextstate].push(state);
            }
        }
    }

    let mut visited = vec![false; num_states];
    let mut stack = Vec::new();
    for state in 0..num_states {
        if fst.is_final(state)? {
            visited[state] = true;
            stack.push(state);
        }
    }
    while let Some(state) = stack.pop() {
        for &pred in &predecessors[state] {
            if !visited[pred] {
                visited[pred] = true;
                stack.push(pred);
            }
        }
    }
    Ok(visited)
}
