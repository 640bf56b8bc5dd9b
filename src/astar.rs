//! A* with a closed set that is filled on discovery rather than on expansion. Every node is
//! closed the first time it is generated and never revisited, which is only optimal for
//! consistent heuristics on uniform edge costs. States live in an insertion-ordered map that
//! doubles as the arena for parent links and as the closed set.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::{IndexMap, IndexSet};
use num_traits::{One, Zero};

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
/// Insertion-ordered set used to report explored locations in the order they were closed.
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Search bookkeeping for one node. `parent` is the arena index of the state that generated it.
#[derive(Clone, Copy, Debug)]
struct SearchState<C> {
    g: C,
    h: C,
    parent: Option<usize>,
}

impl<C: Zero + Copy> SearchState<C> {
    fn f(&self) -> C {
        self.g + self.h
    }
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so every key is reversed: smallest estimated cost first, then
        // smallest cost, then the node discovered first
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}

pub(crate) struct Outcome<N, C> {
    /// Nodes from start to goal and the cost of the path.
    pub path: Option<(Vec<N>, C)>,
    pub closed: FxIndexSet<N>,
    pub expanded: usize,
}

fn reverse_path<N, C>(states: &FxIndexMap<N, SearchState<C>>, goal: usize) -> Vec<N>
where
    N: Clone,
{
    let mut path: Vec<N> = std::iter::successors(states.get_index(goal), |(_, state)| {
        state.parent.and_then(|parent| states.get_index(parent))
    })
    .map(|(node, _)| node.clone())
    .collect();
    path.reverse();
    path
}

/// Runs A* from `start` until `success` accepts a popped node or the frontier runs dry.
///
/// `successors` yields every neighbour together with whether it can be entered. Neighbours that
/// cannot be entered are closed like any other but never pushed, so they show up in
/// [Outcome::closed] without being expanded. Each step costs [One::one]. The first error returned
/// by `heuristic` aborts the search.
pub(crate) fn astar_closed<N, C, E, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Result<Outcome<N, C>, E>
where
    N: Eq + Hash + Clone,
    C: Zero + One + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, bool)>,
    FH: FnMut(&N) -> Result<C, E>,
    FS: FnMut(&N) -> bool,
{
    let initial = SearchState {
        g: Zero::zero(),
        h: heuristic(start)?,
        parent: None,
    };
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: initial.f(),
        cost: initial.g,
        index: 0,
    });
    let mut states: FxIndexMap<N, SearchState<C>> = FxIndexMap::default();
    states.insert(start.clone(), initial);
    let mut expanded = 0;

    while let Some(SmallestCostHolder { index, .. }) = to_see.pop() {
        expanded += 1;
        let (successors, cost) = {
            let Some((node, state)) = states.get_index(index) else {
                continue;
            };
            if success(node) {
                let cost = state.g;
                let path = reverse_path(&states, index);
                return Ok(Outcome {
                    path: Some((path, cost)),
                    closed: states.into_keys().collect(),
                    expanded,
                });
            }
            (successors(node), state.g + One::one())
        };
        for (successor, passable) in successors {
            let (n, state) = match states.entry(successor) {
                Occupied(_) => continue,
                Vacant(e) => {
                    let state = SearchState {
                        g: cost,
                        h: heuristic(e.key())?,
                        parent: Some(index),
                    };
                    let n = e.index();
                    e.insert(state);
                    (n, state)
                }
            };
            if passable {
                to_see.push(SmallestCostHolder {
                    estimated_cost: state.f(),
                    cost: state.g,
                    index: n,
                });
            }
        }
    }
    Ok(Outcome {
        path: None,
        closed: states.into_keys().collect(),
        expanded,
    })
}
