// Shared helpers for the integration tests: JSON fixtures and brute-force
// path enumeration.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use rand::RngExt;
use rand::rngs::StdRng;
use serde::Deserialize;
use wfst::{Arc, EPS_LABEL, Fst, Label, MutableFst, Semiring, StateId, VectorFst};
use wfst_core::TropicalSemiring;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct FstFixture {
    pub start: Option<StateId>,
    pub states: Vec<StateFixture>,
}

#[derive(Debug, Deserialize)]
pub struct StateFixture {
    /// `null` marks a non-final state.
    #[serde(rename = "final", default)]
    pub final_weight: Option<f64>,
    #[serde(default)]
    pub arcs: Vec<ArcFixture>,
}

#[derive(Debug, Deserialize)]
pub struct ArcFixture {
    pub ilabel: Label,
    pub olabel: Label,
    pub weight: f64,
    pub nextstate: StateId,
}

/// Path of a file under `tests/data`.
pub fn data_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(relative)
}

/// Load a tropical automaton from a JSON fixture under `tests/data`.
pub fn load_tropical(relative: &str) -> VectorFst<TropicalSemiring> {
    let path = data_path(relative);
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e));
    let fixture: FstFixture = serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {}", path.display(), e));
    build_tropical(&fixture)
}

pub fn build_tropical(fixture: &FstFixture) -> VectorFst<TropicalSemiring> {
    let sr = TropicalSemiring;
    let mut fst = VectorFst::new(sr);
    for state in &fixture.states {
        fst.add_state_with_final(state.final_weight.unwrap_or(sr.zero()));
    }
    for (id, state) in fixture.states.iter().enumerate() {
        for arc in &state.arcs {
            fst.add_arc(id, Arc::new(arc.ilabel, arc.olabel, arc.weight, arc.nextstate))
                .unwrap();
        }
    }
    if let Some(start) = fixture.start {
        fst.set_start(start).unwrap();
    }
    fst
}

// ---------------------------------------------------------------------------
// Brute-force semantics
// ---------------------------------------------------------------------------

/// Input and output label sequences of a path, epsilons removed.
pub type PathKey = (Vec<Label>, Vec<Label>);

/// Sum (with `plus`) the weights of all successful paths of at most
/// `max_arcs` arcs, grouped by their label sequences.
///
/// Exact for acyclic automata when `max_arcs` is at least the longest path.
pub fn path_weights<S, F>(fst: &F, max_arcs: usize) -> HashMap<PathKey, S::Weight>
where
    S: Semiring,
    F: Fst<S>,
{
    let sr = fst.semiring();
    let mut out = HashMap::new();
    let Some(start) = fst.start() else {
        return out;
    };

    let mut stack = vec![(start, Vec::new(), Vec::new(), sr.one(), 0usize)];
    while let Some((state, ilabels, olabels, weight, depth)) = stack.pop() {
        let final_weight = fst.final_weight(state).unwrap();
        if sr.is_not_zero(final_weight) {
            let total = sr.times(weight, final_weight);
            let entry = out
                .entry((ilabels.clone(), olabels.clone()))
                .or_insert(sr.zero());
            *entry = sr.plus(*entry, total);
        }
        if depth == max_arcs {
            continue;
        }
        for arc in fst.arcs(state).unwrap() {
            let mut i = ilabels.clone();
            let mut o = olabels.clone();
            if arc.ilabel != EPS_LABEL {
                i.push(arc.ilabel);
            }
            if arc.olabel != EPS_LABEL {
                o.push(arc.olabel);
            }
            stack.push((arc.nextstate, i, o, sr.times(weight, arc.weight), depth + 1));
        }
    }
    out
}

/// Relational composition of two path-weight maps.
pub fn compose_languages<S: Semiring>(
    sr: &S,
    left: &HashMap<PathKey, S::Weight>,
    right: &HashMap<PathKey, S::Weight>,
) -> HashMap<PathKey, S::Weight> {
    let mut out = HashMap::new();
    for ((x, y1), &w1) in left {
        for ((y2, z), &w2) in right {
            if y1 == y2 {
                let entry = out.entry((x.clone(), z.clone())).or_insert(sr.zero());
                *entry = sr.plus(*entry, sr.times(w1, w2));
            }
        }
    }
    out
}

/// Assert two path-weight maps agree key by key, within tolerance.
pub fn assert_same_language<S: Semiring>(
    sr: &S,
    actual: &HashMap<PathKey, S::Weight>,
    expected: &HashMap<PathKey, S::Weight>,
) {
    for (key, &w) in expected {
        let got = actual
            .get(key)
            .copied()
            .unwrap_or_else(|| panic!("missing path {key:?} (expected weight {w:?})"));
        assert!(
            sr.approx_eq(got, w),
            "path {key:?}: got {got:?}, expected {w:?}"
        );
    }
    for key in actual.keys() {
        assert!(expected.contains_key(key), "unexpected path {key:?}");
    }
}

/// Reverse both label sequences of every key.
pub fn reversed_keys<W: Copy>(map: &HashMap<PathKey, W>) -> HashMap<PathKey, W> {
    map.iter()
        .map(|((i, o), &w)| {
            let mut i = i.clone();
            let mut o = o.clone();
            i.reverse();
            o.reverse();
            ((i, o), w)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Random acyclic automaton: arcs only go from lower to higher state ids.
///
/// `eps_in` / `eps_out` control how often an arc carries epsilon on the
/// input / output side (out of 4).
pub fn random_acyclic<S: Semiring<Weight = f64>>(
    sr: S,
    rng: &mut StdRng,
    num_states: usize,
    alphabet: Label,
    eps_in: u32,
    eps_out: u32,
) -> VectorFst<S> {
    let mut fst = VectorFst::new(sr.clone());
    for _ in 0..num_states {
        fst.add_state();
    }
    fst.set_start(0).unwrap();
    fst.set_final(num_states - 1, sr.one()).unwrap();
    for s in 0..num_states - 1 {
        if rng.random_range(0..3) == 0 {
            fst.set_final(s, 0.5).unwrap();
        }
        let fanout = rng.random_range(1..=2);
        for _ in 0..fanout {
            let target = rng.random_range(s + 1..num_states);
            let ilabel = if rng.random_range(0..4) < eps_in {
                EPS_LABEL
            } else {
                rng.random_range(1..=alphabet)
            };
            let olabel = if rng.random_range(0..4) < eps_out {
                EPS_LABEL
            } else {
                rng.random_range(1..=alphabet)
            };
            let weight = 0.5 * rng.random_range(1..=3u32) as f64;
            fst.add_arc(s, Arc::new(ilabel, olabel, weight, target)).unwrap();
        }
    }
    fst
}

/// Random graph with cycles and self-loops; only a few states are final.
pub fn random_graph(
    rng: &mut StdRng,
    num_states: usize,
    num_arcs: usize,
) -> VectorFst<TropicalSemiring> {
    let mut fst = VectorFst::new(TropicalSemiring);
    for _ in 0..num_states {
        fst.add_state();
    }
    fst.set_start(0).unwrap();
    for s in 0..num_states {
        if rng.random_range(0..5) == 0 {
            fst.set_final(s, 1.0).unwrap();
        }
    }
    for _ in 0..num_arcs {
        let from = rng.random_range(0..num_states);
        let to = rng.random_range(0..num_states);
        fst.add_arc(from, Arc::new(1, 1, 1.0, to)).unwrap();
    }
    fst
}
