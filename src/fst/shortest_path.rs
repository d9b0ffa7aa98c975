//! Shortest distances and best-path decoding.

use super::{Fst, FstError, Result, StateId, Weight};
use rustc_hash::FxHashSet;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::trace;

/// Search nodes popped beyond this bound abort the search with whatever has
/// been found. Only reachable on automata with zero-cost output cycles.
const MAX_EXPANSIONS: usize = 1 << 20;

/// Extra equal-cost candidates gathered past the k-th before ordering.
const MAX_TIES: usize = 64;

/// A decoded path: its output string and total cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    /// Concatenated output labels
    pub output: String,
    /// Total path weight
    pub weight: Weight,
}

/// A partial path in the A* frontier.
#[derive(Debug, PartialEq, Eq)]
struct Frontier {
    /// Cost so far plus exact cost-to-acceptance.
    priority: Weight,
    cost: Weight,
    /// `None` marks a completed path.
    state: Option<StateId>,
    output: String,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.state.is_none().cmp(&self.state.is_none()))
            .then_with(|| self.output.cmp(&other.output))
            .then_with(|| self.state.cmp(&other.state))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Fst {
    /// Cheapest cost from every state to acceptance (`Weight::ZERO` when no
    /// final state is reachable).
    pub fn shortest_distance_to_final(&self) -> Vec<Weight> {
        let n = self.num_states();
        let mut reverse: Vec<Vec<(StateId, Weight)>> = vec![Vec::new(); n];
        for (source, state) in self.states().iter().enumerate() {
            for arc in &state.arcs {
                reverse[arc.nextstate].push((source, arc.weight));
            }
        }

        let mut distance = vec![Weight::ZERO; n];
        let mut heap = BinaryHeap::new();
        for (id, state) in self.states().iter().enumerate() {
            if let Some(w) = state.final_weight {
                distance[id] = w;
                heap.push(Reverse((w, id)));
            }
        }

        while let Some(Reverse((weight, state))) = heap.pop() {
            if weight > distance[state] {
                continue;
            }
            for &(source, arc_weight) in &reverse[state] {
                let candidate = arc_weight.times(weight);
                if candidate < distance[source] {
                    distance[source] = candidate;
                    heap.push(Reverse((candidate, source)));
                }
            }
        }
        distance
    }

    /// Up to `k` distinct output strings of the automaton, cheapest first.
    ///
    /// Candidates whose costs are equal within [`WEIGHT_DELTA`](super::WEIGHT_DELTA)
    /// are ordered lexicographically by output. The automaton should be free
    /// of pure epsilon cycles (any output of [`Fst::optimize`] is).
    pub fn best_paths(&self, k: usize) -> Vec<Path> {
        if k == 0 || self.is_empty() {
            return Vec::new();
        }

        let potential = self.shortest_distance_to_final();
        let mut heap = BinaryHeap::new();
        let mut expanded: FxHashSet<(StateId, String)> = FxHashSet::default();
        let mut emitted: FxHashSet<String> = FxHashSet::default();
        let mut found: Vec<Path> = Vec::new();
        let mut cutoff: Option<Weight> = None;
        let mut expansions = 0usize;

        heap.push(Reverse(Frontier {
            priority: potential[self.start()],
            cost: Weight::ONE,
            state: Some(self.start()),
            output: String::new(),
        }));

        while let Some(Reverse(node)) = heap.pop() {
            if let Some(limit) = cutoff {
                if node.priority > limit && !node.priority.approx_eq(limit) {
                    break;
                }
            }
            expansions += 1;
            if expansions > MAX_EXPANSIONS {
                trace!(expansions, "best-path search hit its expansion bound");
                break;
            }

            let Some(state) = node.state else {
                if emitted.insert(node.output.clone()) {
                    found.push(Path {
                        output: node.output,
                        weight: node.cost,
                    });
                    if found.len() == k {
                        cutoff = Some(found[k - 1].weight);
                    } else if found.len() >= k + MAX_TIES {
                        break;
                    }
                }
                continue;
            };

            if !expanded.insert((state, node.output.clone())) {
                continue;
            }

            if let Some(final_weight) = self.final_weight(state) {
                let cost = node.cost.times(final_weight);
                heap.push(Reverse(Frontier {
                    priority: cost,
                    cost,
                    state: None,
                    output: node.output.clone(),
                }));
            }

            for arc in self.arcs(state) {
                let rest = potential[arc.nextstate];
                if rest.is_zero() {
                    continue;
                }
                let cost = node.cost.times(arc.weight);
                let mut output = node.output.clone();
                arc.olabel.push_to(&mut output);
                heap.push(Reverse(Frontier {
                    priority: cost.times(rest),
                    cost,
                    state: Some(arc.nextstate),
                    output,
                }));
            }
        }

        order_candidates(&mut found);
        found.truncate(k);
        found
    }

    /// The cheapest output for `input`.
    ///
    /// Composes an acceptor for `input` with the automaton, optimizes the
    /// result and decodes it. Fails with [`FstError::NoMatch`] when the
    /// automaton does not accept `input`.
    pub fn shortest_path(&self, input: &str) -> Result<String> {
        self.k_shortest_paths(input, 1)?
            .into_iter()
            .next()
            .map(|path| path.output)
            .ok_or(FstError::NoMatch)
    }

    /// Up to `k` distinct outputs for `input`, ordered by ascending cost and
    /// then lexicographically.
    pub fn k_shortest_paths(&self, input: &str, k: usize) -> Result<Vec<Path>> {
        let lattice = self.lattice(input)?;
        Ok(lattice.best_paths(k))
    }

    /// True when some path accepts `input`.
    pub fn accepts(&self, input: &str) -> bool {
        !Fst::accept(input).compose(self).is_empty()
    }

    /// `optimize(compose(accept(input), self))`, or `NoMatch` when empty.
    pub fn lattice(&self, input: &str) -> Result<Fst> {
        let composed = Fst::accept(input).compose(self);
        if composed.is_empty() {
            return Err(FstError::NoMatch);
        }
        Ok(composed.optimize())
    }
}

/// Sort by weight, then lexicographically within runs of equal weight.
fn order_candidates(paths: &mut [Path]) {
    paths.sort_by(|a, b| a.weight.cmp(&b.weight));
    let mut begin = 0;
    while begin < paths.len() {
        let anchor = paths[begin].weight;
        let mut end = begin + 1;
        while end < paths.len() && paths[end].weight.approx_eq(anchor) {
            end += 1;
        }
        paths[begin..end].sort_by(|a, b| a.output.cmp(&b.output));
        begin = end;
    }
}
