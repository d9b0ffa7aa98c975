//! Transducer composition.

use super::{Arc, Fst, Label, State, StateId, Weight};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Sequence filter state.
///
/// Between two matched symbols, epsilon moves of the left operand must come
/// before epsilon moves of the right operand. Once the right operand has
/// moved alone the left operand may not move alone until the next match,
/// which leaves exactly one composed path per pair of aligned paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Filter {
    Open,
    RightMoved,
}

type Triple = (StateId, StateId, Filter);

impl Fst {
    /// Expand literal labels into chains of single-symbol arcs.
    ///
    /// An arc `abc:xy/w` becomes `a:x/w`, `b:y`, `c:ε`; an arc with both
    /// labels empty stays a single epsilon arc.
    pub fn expand_literals(&self) -> Fst {
        let needs_expansion = self.states().iter().any(|s| {
            s.arcs.iter().any(|a| {
                matches!(a.ilabel, Label::Literal(_)) || matches!(a.olabel, Label::Literal(_))
            })
        });
        if !needs_expansion {
            return self.clone();
        }

        let mut result = Fst {
            states: self
                .states
                .iter()
                .map(|s| State {
                    final_weight: s.final_weight,
                    arcs: SmallVec::new(),
                })
                .collect(),
            start: self.start,
        };

        for (source, state) in self.states().iter().enumerate() {
            for arc in &state.arcs {
                let inputs = arc.ilabel.symbols();
                let outputs = arc.olabel.symbols();
                let steps = inputs.len().max(outputs.len());
                if steps <= 1 {
                    let ilabel = inputs.into_iter().next().unwrap_or(Label::Epsilon);
                    let olabel = outputs.into_iter().next().unwrap_or(Label::Epsilon);
                    result.add_arc(source, Arc::new(ilabel, olabel, arc.weight, arc.nextstate));
                    continue;
                }

                let mut current = source;
                for step in 0..steps {
                    let next = if step + 1 == steps {
                        arc.nextstate
                    } else {
                        result.add_state()
                    };
                    let weight = if step == 0 { arc.weight } else { Weight::ONE };
                    let ilabel = inputs.get(step).cloned().unwrap_or(Label::Epsilon);
                    let olabel = outputs.get(step).cloned().unwrap_or(Label::Epsilon);
                    result.add_arc(current, Arc::new(ilabel, olabel, weight, next));
                    current = next;
                }
            }
        }
        result
    }

    /// Compose `self` with `other`: output labels of `self` are matched
    /// against input labels of `other`.
    ///
    /// The result maps `x` to `z` with cost `w1 + w2` whenever `self` maps
    /// `x` to `y` with cost `w1` and `other` maps `y` to `z` with cost `w2`.
    /// An empty automaton is returned when no paths align.
    pub fn compose(&self, other: &Fst) -> Fst {
        let left = self.expand_literals();
        let mut right = other.expand_literals();
        for state in &mut right.states {
            state.arcs.sort_by(|a, b| a.ilabel.cmp(&b.ilabel));
        }

        let mut result = Fst::empty();
        let mut ids: FxHashMap<Triple, StateId> = FxHashMap::default();
        let mut queue: VecDeque<Triple> = VecDeque::new();

        let initial = (left.start(), right.start(), Filter::Open);
        ids.insert(initial, result.start());
        queue.push_back(initial);

        let mut lookup = |triple: Triple, result: &mut Fst, queue: &mut VecDeque<Triple>| {
            *ids.entry(triple).or_insert_with(|| {
                queue.push_back(triple);
                result.add_state()
            })
        };

        while let Some(triple) = queue.pop_front() {
            let (l, r, filter) = triple;
            let source = lookup(triple, &mut result, &mut queue);

            if let (Some(wl), Some(wr)) = (left.final_weight(l), right.final_weight(r)) {
                result.set_final(source, wl.times(wr));
            }

            for arc_l in left.arcs(l) {
                if arc_l.olabel.is_epsilon() {
                    if filter == Filter::Open {
                        let target = lookup((arc_l.nextstate, r, Filter::Open), &mut result, &mut queue);
                        result.add_arc(
                            source,
                            Arc::new(arc_l.ilabel.clone(), Label::Epsilon, arc_l.weight, target),
                        );
                    }
                    continue;
                }

                let arcs_r = right.arcs(r);
                let begin = arcs_r.partition_point(|a| a.ilabel < arc_l.olabel);
                for arc_r in arcs_r[begin..]
                    .iter()
                    .take_while(|a| a.ilabel == arc_l.olabel)
                {
                    let target = lookup(
                        (arc_l.nextstate, arc_r.nextstate, Filter::Open),
                        &mut result,
                        &mut queue,
                    );
                    result.add_arc(
                        source,
                        Arc::new(
                            arc_l.ilabel.clone(),
                            arc_r.olabel.clone(),
                            arc_l.weight.times(arc_r.weight),
                            target,
                        ),
                    );
                }
            }

            for arc_r in right.arcs(r).iter().take_while(|a| a.ilabel.is_epsilon()) {
                let target = lookup(
                    (l, arc_r.nextstate, Filter::RightMoved),
                    &mut result,
                    &mut queue,
                );
                result.add_arc(
                    source,
                    Arc::new(Label::Epsilon, arc_r.olabel.clone(), arc_r.weight, target),
                );
            }
        }

        result.connect()
    }
}
