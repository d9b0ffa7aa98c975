//! Epsilon removal, determinization, weight pushing and minimization.

use super::{Arc, Fst, Label, State, StateId, Weight};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};
use tracing::{trace, warn};

/// Upper bound on the number of subset states weighted determinization may
/// create before giving up and keeping the non-deterministic automaton.
///
/// Weighted transducers are not always determinizable; the bound turns a
/// potentially non-terminating construction into a graceful fallback.
pub const MAX_DETERMINIZED_STATES: usize = 1 << 16;

type PairLabel = (Label, Label);

/// A weighted subset: states paired with residual weights, sorted by state.
type Subset = Vec<(StateId, Weight)>;

fn subset_key(subset: &Subset) -> Vec<(StateId, i64)> {
    subset.iter().map(|&(s, w)| (s, w.quantize())).collect()
}

impl Fst {
    /// Optimize the automaton without changing the weighted relation it
    /// denotes.
    ///
    /// Literal labels are expanded, pure epsilon arcs removed, the result is
    /// determinized over `(input, output)` label pairs when that terminates
    /// within [`MAX_DETERMINIZED_STATES`], weights are pushed towards the
    /// start state, and equivalent states are merged. Applying `optimize` to
    /// its own output yields an automaton accepting the same relation.
    pub fn optimize(&self) -> Fst {
        let before = (self.num_states(), self.num_arcs());
        let mut fst = self.expand_literals().connect().rm_epsilon();

        match fst.determinize(MAX_DETERMINIZED_STATES) {
            Some(deterministic) => fst = deterministic,
            None => warn!(
                states = fst.num_states(),
                limit = MAX_DETERMINIZED_STATES,
                "determinization exceeded its state budget; keeping non-deterministic automaton"
            ),
        }

        let optimized = fst.push_weights().minimize().connect();
        trace!(
            states_before = before.0,
            arcs_before = before.1,
            states_after = optimized.num_states(),
            arcs_after = optimized.num_arcs(),
            "optimized automaton"
        );
        optimized
    }

    /// Remove arcs that are epsilon on both sides.
    ///
    /// Every state inherits the non-epsilon arcs and final weights of the
    /// states in its epsilon closure, each extended by the cheapest epsilon
    /// path reaching it.
    pub fn rm_epsilon(&self) -> Fst {
        if self.is_epsilon_free() {
            return self.clone();
        }

        let mut states = Vec::with_capacity(self.num_states());
        for source in 0..self.num_states() {
            let closure = self.epsilon_closure(source);
            let mut final_weight = Weight::ZERO;
            let mut best: FxHashMap<(Label, Label, StateId), Weight> = FxHashMap::default();
            let mut order: Vec<(Label, Label, StateId)> = Vec::new();

            for (state, distance) in closure {
                if let Some(w) = self.final_weight(state) {
                    final_weight = final_weight.plus(distance.times(w));
                }
                for arc in self.arcs(state).iter().filter(|a| !a.is_epsilon()) {
                    let key = (arc.ilabel.clone(), arc.olabel.clone(), arc.nextstate);
                    let weight = distance.times(arc.weight);
                    match best.get_mut(&key) {
                        Some(existing) => *existing = existing.plus(weight),
                        None => {
                            best.insert(key.clone(), weight);
                            order.push(key);
                        }
                    }
                }
            }

            let arcs = order
                .into_iter()
                .map(|key| {
                    let weight = best[&key];
                    let (ilabel, olabel, nextstate) = key;
                    Arc::new(ilabel, olabel, weight, nextstate)
                })
                .collect();
            states.push(State {
                final_weight: (!final_weight.is_zero()).then_some(final_weight),
                arcs,
            });
        }

        Fst {
            states,
            start: self.start,
        }
        .connect()
    }

    /// Cheapest pure-epsilon distance from `source` to every state in its
    /// epsilon closure (including `source` itself at zero cost).
    fn epsilon_closure(&self, source: StateId) -> Vec<(StateId, Weight)> {
        let mut distance: FxHashMap<StateId, Weight> = FxHashMap::default();
        let mut settled: FxHashSet<StateId> = FxHashSet::default();
        let mut closure = Vec::new();
        let mut heap = BinaryHeap::new();
        distance.insert(source, Weight::ONE);
        heap.push(Reverse((Weight::ONE, source)));

        while let Some(Reverse((weight, state))) = heap.pop() {
            if !settled.insert(state) {
                continue;
            }
            closure.push((state, weight));
            for arc in self.arcs(state).iter().filter(|a| a.is_epsilon()) {
                let candidate = weight.times(arc.weight);
                let improves = distance
                    .get(&arc.nextstate)
                    .map_or(true, |&best| candidate < best);
                if improves {
                    distance.insert(arc.nextstate, candidate);
                    heap.push(Reverse((candidate, arc.nextstate)));
                }
            }
        }
        closure
    }

    /// Weighted subset construction over `(input, output)` label pairs.
    ///
    /// Expects an epsilon-free automaton. Returns `None` when more than
    /// `max_states` subsets would be created.
    pub fn determinize(&self, max_states: usize) -> Option<Fst> {
        let mut result = Fst::empty();
        let mut ids: FxHashMap<Vec<(StateId, i64)>, StateId> = FxHashMap::default();
        let mut subsets: Vec<Subset> = Vec::new();
        let mut queue = VecDeque::new();

        let initial: Subset = vec![(self.start, Weight::ONE)];
        ids.insert(subset_key(&initial), 0);
        subsets.push(initial);
        queue.push_back(0);

        while let Some(id) = queue.pop_front() {
            let subset = subsets[id].clone();

            let mut final_weight = Weight::ZERO;
            let mut by_label: BTreeMap<PairLabel, Vec<(StateId, Weight)>> = BTreeMap::new();
            for &(state, residual) in &subset {
                if let Some(w) = self.final_weight(state) {
                    final_weight = final_weight.plus(residual.times(w));
                }
                for arc in self.arcs(state) {
                    by_label
                        .entry((arc.ilabel.clone(), arc.olabel.clone()))
                        .or_default()
                        .push((arc.nextstate, residual.times(arc.weight)));
                }
            }
            if !final_weight.is_zero() {
                result.set_final(id, final_weight);
            }

            for ((ilabel, olabel), targets) in by_label {
                let arc_weight = targets
                    .iter()
                    .fold(Weight::ZERO, |acc, &(_, w)| acc.plus(w));

                let mut merged: BTreeMap<StateId, Weight> = BTreeMap::new();
                for (state, weight) in targets {
                    let residual = weight.divide(arc_weight);
                    merged
                        .entry(state)
                        .and_modify(|w| *w = w.plus(residual))
                        .or_insert(residual);
                }
                let next: Subset = merged.into_iter().collect();
                let key = subset_key(&next);

                let target = match ids.get(&key) {
                    Some(&existing) => existing,
                    None => {
                        if subsets.len() >= max_states {
                            return None;
                        }
                        let fresh = result.add_state();
                        ids.insert(key, fresh);
                        subsets.push(next);
                        queue.push_back(fresh);
                        fresh
                    }
                };
                result.add_arc(id, Arc::new(ilabel, olabel, arc_weight, target));
            }
        }

        Some(result.connect())
    }

    /// Move weights as close to the start state as possible.
    ///
    /// Each arc is reweighted by the potential `d(s)` = cheapest cost from
    /// `s` to acceptance, so every path keeps its total cost while the
    /// cheapest continuation from any state costs nothing.
    pub fn push_weights(&self) -> Fst {
        let potential = self.shortest_distance_to_final();
        let start_potential = potential[self.start];
        if start_potential.is_zero() {
            return Fst::empty();
        }

        let mut states: Vec<State> = self
            .states
            .iter()
            .enumerate()
            .map(|(id, state)| State {
                final_weight: state.final_weight.map(|w| w.divide(potential[id])),
                arcs: state
                    .arcs
                    .iter()
                    .map(|a| Arc {
                        weight: a.weight.times(potential[a.nextstate]).divide(potential[id]),
                        ..a.clone()
                    })
                    .collect(),
            })
            .collect();

        let mut start = self.start;
        if !start_potential.is_one() {
            let start_has_incoming = states
                .iter()
                .any(|s| s.arcs.iter().any(|a| a.nextstate == start));
            let lifted = State {
                final_weight: states[start]
                    .final_weight
                    .map(|w| w.times(start_potential)),
                arcs: states[start]
                    .arcs
                    .iter()
                    .map(|a| Arc {
                        weight: a.weight.times(start_potential),
                        ..a.clone()
                    })
                    .collect(),
            };
            if start_has_incoming {
                states.push(lifted);
                start = states.len() - 1;
            } else {
                states[start] = lifted;
            }
        }

        Fst { states, start }.connect()
    }

    /// Merge states with identical futures by partition refinement.
    ///
    /// Two states are merged when they agree on finality (weights compared
    /// after quantization) and their arcs agree on label pair, quantized
    /// weight and destination block.
    pub fn minimize(&self) -> Fst {
        let n = self.num_states();
        let mut block: Vec<usize> = {
            let mut ids: FxHashMap<Option<i64>, usize> = FxHashMap::default();
            (0..n)
                .map(|s| {
                    let key = self.final_weight(s).map(Weight::quantize);
                    let next = ids.len();
                    *ids.entry(key).or_insert(next)
                })
                .collect()
        };
        let mut num_blocks = block.iter().copied().max().map_or(0, |m| m + 1);

        loop {
            let mut ids: FxHashMap<(usize, Vec<(PairLabel, i64, usize)>), usize> =
                FxHashMap::default();
            let refined: Vec<usize> = (0..n)
                .map(|s| {
                    let mut signature: Vec<(PairLabel, i64, usize)> = self
                        .arcs(s)
                        .iter()
                        .map(|a| {
                            (
                                (a.ilabel.clone(), a.olabel.clone()),
                                a.weight.quantize(),
                                block[a.nextstate],
                            )
                        })
                        .collect();
                    signature.sort();
                    signature.dedup();
                    let next = ids.len();
                    *ids.entry((block[s], signature)).or_insert(next)
                })
                .collect();
            let refined_blocks = ids.len();
            block = refined;
            if refined_blocks == num_blocks {
                break;
            }
            num_blocks = refined_blocks;
        }

        if num_blocks == n {
            return self.clone();
        }

        let mut representative: Vec<StateId> = vec![0; num_blocks];
        for s in (0..n).rev() {
            representative[block[s]] = s;
        }

        let states = representative
            .iter()
            .map(|&rep| {
                let mut seen: FxHashMap<(PairLabel, usize), usize> = FxHashMap::default();
                let mut arcs: SmallVec<[Arc; 4]> = SmallVec::new();
                for arc in self.arcs(rep) {
                    let target = block[arc.nextstate];
                    let key = ((arc.ilabel.clone(), arc.olabel.clone()), target);
                    match seen.get(&key) {
                        Some(&index) => {
                            let kept: &mut Arc = &mut arcs[index];
                            kept.weight = kept.weight.plus(arc.weight);
                        }
                        None => {
                            seen.insert(key, arcs.len());
                            arcs.push(Arc {
                                nextstate: target,
                                ..arc.clone()
                            });
                        }
                    }
                }
                State {
                    final_weight: self.final_weight(rep),
                    arcs,
                }
            })
            .collect();

        Fst {
            states,
            start: block[self.start],
        }
        .connect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs(fst: &Fst, input: &str) -> Vec<(String, i64)> {
        fst.k_shortest_paths(input, 16)
            .map(|paths| {
                paths
                    .into_iter()
                    .map(|p| (p.output, p.weight.quantize()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_rm_epsilon_keeps_language() {
        let fst = Fst::accept("a")
            .concat(&Fst::epsilon())
            .concat(&Fst::accept("b"))
            .closure(0);
        let removed = fst.rm_epsilon();
        assert!(removed.is_epsilon_free());
        for input in ["", "ab", "abab"] {
            assert!(removed.accepts(input), "should accept {:?}", input);
        }
        assert!(!removed.accepts("a"));
    }

    #[test]
    fn test_determinize_merges_shared_prefixes() {
        let fst = Fst::accept("abc")
            .union(&Fst::accept("abd"))
            .expand_literals()
            .rm_epsilon();
        let det = fst.determinize(MAX_DETERMINIZED_STATES).unwrap();
        assert!(det.is_deterministic());
        assert!(det.accepts("abc"));
        assert!(det.accepts("abd"));
        assert!(!det.accepts("ab"));
    }

    #[test]
    fn test_determinize_keeps_cheapest_duplicate() {
        let cheap = Fst::cross("a", "x").add_weight(1.0).unwrap();
        let pricey = Fst::cross("a", "x").add_weight(3.0).unwrap();
        let fst = cheap.union(&pricey).expand_literals().rm_epsilon();
        let det = fst.determinize(MAX_DETERMINIZED_STATES).unwrap();
        let paths = det.k_shortest_paths("a", 4).unwrap();
        assert_eq!(paths.len(), 1);
        assert!((paths[0].weight.value() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_determinize_respects_budget() {
        let fst = Fst::accept("abcdef").expand_literals();
        assert!(fst.determinize(3).is_none());
        assert!(fst.determinize(16).is_some());
    }

    #[test]
    fn test_push_weights_preserves_totals() {
        let fst = Fst::accept("ab")
            .add_weight(2.0)
            .unwrap()
            .union(&Fst::accept("ac").add_weight(5.0).unwrap());
        let pushed = fst.expand_literals().rm_epsilon().push_weights();
        assert_eq!(outputs(&pushed, "ab"), outputs(&fst, "ab"));
        assert_eq!(outputs(&pushed, "ac"), outputs(&fst, "ac"));
    }

    #[test]
    fn test_minimize_merges_equivalent_suffixes() {
        let fst = Fst::accept("xa")
            .union(&Fst::accept("ya"))
            .expand_literals()
            .rm_epsilon();
        let det = fst.determinize(MAX_DETERMINIZED_STATES).unwrap();
        let minimal = det.minimize();
        assert!(minimal.num_states() < det.num_states());
        assert!(minimal.accepts("xa"));
        assert!(minimal.accepts("ya"));
        assert!(!minimal.accepts("xy"));
    }

    #[test]
    fn test_optimize_is_idempotent() {
        let digits = Fst::char_set('0'..='9').closure(1);
        let fst = Fst::insert("n:")
            .concat(&digits)
            .union_weighted(&Fst::accept("12").concat(&Fst::insert("!")), 1.0, 0.5)
            .unwrap();
        let once = fst.optimize();
        let twice = once.optimize();
        for input in ["1", "12", "123", "x"] {
            assert_eq!(outputs(&once, input), outputs(&fst, input));
            assert_eq!(outputs(&twice, input), outputs(&fst, input));
        }
        assert_eq!(once.num_states(), twice.num_states());
    }
}
