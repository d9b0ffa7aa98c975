//! Weighted finite-state transducers over the tropical semiring.
//!
//! This module is the automaton core of the crate. An [`Fst`] owns its
//! states (index = identity) and each state owns its outgoing arcs. Every
//! operation is pure: it returns a fresh, trimmed automaton and leaves its
//! operands untouched, so fully built grammars can be shared read-only
//! across threads.
//!
//! # Operations
//!
//! - Constructors: [`Fst::accept`], [`Fst::insert`], [`Fst::delete`],
//!   [`Fst::cross`], [`Fst::string_map`], [`Fst::char_set`]
//! - Rational operations: [`Fst::concat`], [`Fst::union`],
//!   [`Fst::union_weighted`], [`Fst::closure`], [`Fst::repeat`],
//!   [`Fst::optional`], [`Fst::add_weight`]
//! - [`Fst::compose`]
//! - [`Fst::optimize`]: epsilon removal, determinization, weight pushing and
//!   minimization
//! - Decoding: [`Fst::shortest_path`], [`Fst::k_shortest_paths`]
//!
//! # Example
//!
//! ```rust,ignore
//! use libtextnorm::fst::Fst;
//!
//! let digit = Fst::string_map(&[("uno", "1"), ("dos", "2")]);
//! let tagged = Fst::insert("integer: \"")
//!     .concat(&digit)
//!     .concat(&Fst::insert("\""));
//!
//! assert_eq!(tagged.shortest_path("dos")?, "integer: \"2\"");
//! ```

mod compose;
mod label;
mod ops;
mod optimize;
mod shortest_path;
mod weight;

pub use label::Label;
pub use optimize::MAX_DETERMINIZED_STATES;
pub use shortest_path::Path;
pub use weight::{Weight, WEIGHT_DELTA};

use smallvec::SmallVec;
use std::collections::{BTreeSet, VecDeque};

/// Identifier of a state within one automaton.
pub type StateId = usize;

/// Errors raised by automaton operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FstError {
    /// No accepting path exists for the given input.
    #[error("no accepting path for input")]
    NoMatch,
    /// A weight was negative or NaN.
    #[error("invalid weight {0}: weights must be non-negative")]
    InvalidWeight(f32),
    /// A state id referenced a state that does not exist.
    #[error("state {0} does not exist")]
    InvalidState(StateId),
    /// `repeat` was called with `min > max`.
    #[error("invalid repetition bounds {min}..={max}")]
    InvalidRepeat {
        /// Lower bound
        min: usize,
        /// Upper bound
        max: usize,
    },
}

/// A specialized `Result` type for automaton operations.
pub type Result<T> = std::result::Result<T, FstError>;

/// A directed, labelled, weighted edge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Arc {
    /// Label consumed on the input side
    pub ilabel: Label,
    /// Label emitted on the output side
    pub olabel: Label,
    /// Cost of taking the arc
    pub weight: Weight,
    /// Destination state
    pub nextstate: StateId,
}

impl Arc {
    /// Create an arc.
    pub fn new(ilabel: Label, olabel: Label, weight: Weight, nextstate: StateId) -> Self {
        Arc {
            ilabel,
            olabel,
            weight,
            nextstate,
        }
    }

    /// An arc that consumes and emits nothing.
    pub fn epsilon(weight: Weight, nextstate: StateId) -> Self {
        Arc::new(Label::Epsilon, Label::Epsilon, weight, nextstate)
    }

    /// True when both labels are epsilon.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.ilabel.is_epsilon() && self.olabel.is_epsilon()
    }
}

/// A state: an optional final weight plus outgoing arcs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct State {
    /// Final weight; `None` means the state is not final
    pub final_weight: Option<Weight>,
    /// Outgoing arcs
    pub arcs: SmallVec<[Arc; 4]>,
}

/// A mutable weighted finite-state transducer.
///
/// Acceptors are transducers whose arcs carry identical input and output
/// labels. The automaton always has exactly one start state; the empty
/// language is a lone non-final start state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Fst {
    states: Vec<State>,
    start: StateId,
}

impl Default for Fst {
    fn default() -> Self {
        Self::empty()
    }
}

impl Fst {
    /// Automaton accepting nothing.
    pub fn empty() -> Self {
        Fst {
            states: vec![State::default()],
            start: 0,
        }
    }

    /// Automaton accepting only the empty string, at zero cost.
    pub fn epsilon() -> Self {
        let mut fst = Self::empty();
        fst.states[0].final_weight = Some(Weight::ONE);
        fst
    }

    /// Rebuild an automaton from raw parts, validating state references
    /// and weights.
    pub fn from_parts(states: Vec<State>, start: StateId) -> Result<Self> {
        fn check(weight: Weight) -> Result<()> {
            match Weight::new(weight.value()) {
                Some(_) => Ok(()),
                None => Err(FstError::InvalidWeight(weight.value())),
            }
        }

        if start >= states.len() {
            return Err(FstError::InvalidState(start));
        }
        for state in &states {
            if let Some(weight) = state.final_weight {
                check(weight)?;
            }
            for arc in &state.arcs {
                if arc.nextstate >= states.len() {
                    return Err(FstError::InvalidState(arc.nextstate));
                }
                check(arc.weight)?;
            }
        }
        Ok(Fst { states, start })
    }

    /// Split into states and start state, the inverse of [`Fst::from_parts`].
    pub fn into_parts(self) -> (Vec<State>, StateId) {
        (self.states, self.start)
    }

    /// Acceptor for exactly `text`.
    pub fn accept(text: &str) -> Self {
        let mut fst = Self::empty();
        let mut current = fst.start;
        for c in text.chars() {
            let next = fst.add_state();
            fst.add_arc(current, Arc::new(c.into(), c.into(), Weight::ONE, next));
            current = next;
        }
        fst.set_final(current, Weight::ONE);
        fst
    }

    /// Transducer rewriting `from` into `to` on a single literal arc.
    pub fn cross(from: &str, to: &str) -> Self {
        let mut fst = Self::empty();
        let end = fst.add_state();
        fst.add_arc(
            fst.start,
            Arc::new(Label::from_text(from), Label::from_text(to), Weight::ONE, end),
        );
        fst.set_final(end, Weight::ONE);
        fst
    }

    /// Transducer mapping the empty string to `text`.
    pub fn insert(text: &str) -> Self {
        Self::cross("", text)
    }

    /// Transducer mapping `text` to the empty string.
    pub fn delete(text: &str) -> Self {
        Self::cross(text, "")
    }

    /// Union of literal rewrites, one arc per pair.
    pub fn string_map<S: AsRef<str>, T: AsRef<str>>(pairs: &[(S, T)]) -> Self {
        let mut fst = Self::empty();
        let end = fst.add_state();
        fst.set_final(end, Weight::ONE);
        for (from, to) in pairs {
            let arc = Arc::new(
                Label::from_text(from.as_ref()),
                Label::from_text(to.as_ref()),
                Weight::ONE,
                end,
            );
            fst.add_arc(fst.start, arc);
        }
        fst.connect()
    }

    /// Acceptor for any single character of `chars`.
    pub fn char_set<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut fst = Self::empty();
        let end = fst.add_state();
        fst.set_final(end, Weight::ONE);
        let unique: BTreeSet<char> = chars.into_iter().collect();
        for c in unique {
            fst.add_arc(fst.start, Arc::new(c.into(), c.into(), Weight::ONE, end));
        }
        fst.connect()
    }

    /// Add a fresh non-final state and return its id.
    pub fn add_state(&mut self) -> StateId {
        self.states.push(State::default());
        self.states.len() - 1
    }

    /// Append an arc leaving `state`.
    pub fn add_arc(&mut self, state: StateId, arc: Arc) {
        self.states[state].arcs.push(arc);
    }

    /// Make `state` final with the given weight.
    pub fn set_final(&mut self, state: StateId, weight: Weight) {
        self.states[state].final_weight = Some(weight);
    }

    /// Change the start state.
    pub fn set_start(&mut self, state: StateId) -> Result<()> {
        if state >= self.states.len() {
            return Err(FstError::InvalidState(state));
        }
        self.start = state;
        Ok(())
    }

    /// The start state.
    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Number of states.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Total number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.states.iter().map(|s| s.arcs.len()).sum()
    }

    /// All states, indexed by id.
    #[inline]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Outgoing arcs of `state`.
    #[inline]
    pub fn arcs(&self, state: StateId) -> &[Arc] {
        &self.states[state].arcs
    }

    /// Final weight of `state`, if final.
    #[inline]
    pub fn final_weight(&self, state: StateId) -> Option<Weight> {
        self.states[state].final_weight
    }

    /// True when no accepting path exists.
    pub fn is_empty(&self) -> bool {
        !self.coaccessible()[self.start]
    }

    /// True when no arc has epsilon on both sides.
    pub fn is_epsilon_free(&self) -> bool {
        self.states
            .iter()
            .all(|s| s.arcs.iter().all(|a| !a.is_epsilon()))
    }

    /// True when no state has two arcs with the same `(ilabel, olabel)` pair
    /// and no arc is a pure epsilon.
    pub fn is_deterministic(&self) -> bool {
        self.states.iter().all(|state| {
            let mut seen = BTreeSet::new();
            state
                .arcs
                .iter()
                .all(|a| !a.is_epsilon() && seen.insert((&a.ilabel, &a.olabel)))
        })
    }

    /// Characters appearing on the input side of any arc.
    pub fn input_alphabet(&self) -> BTreeSet<char> {
        let mut alphabet = BTreeSet::new();
        for state in &self.states {
            for arc in &state.arcs {
                match &arc.ilabel {
                    Label::Epsilon => {}
                    Label::Symbol(c) => {
                        alphabet.insert(*c);
                    }
                    Label::Literal(text) => alphabet.extend(text.chars()),
                }
            }
        }
        alphabet
    }

    /// States reachable from the start state.
    fn accessible(&self) -> Vec<bool> {
        let mut seen = vec![false; self.states.len()];
        let mut stack = vec![self.start];
        seen[self.start] = true;
        while let Some(state) = stack.pop() {
            for arc in &self.states[state].arcs {
                if !seen[arc.nextstate] {
                    seen[arc.nextstate] = true;
                    stack.push(arc.nextstate);
                }
            }
        }
        seen
    }

    /// States from which some final state is reachable.
    fn coaccessible(&self) -> Vec<bool> {
        let mut reverse: Vec<Vec<StateId>> = vec![Vec::new(); self.states.len()];
        for (source, state) in self.states.iter().enumerate() {
            for arc in &state.arcs {
                reverse[arc.nextstate].push(source);
            }
        }

        let mut seen = vec![false; self.states.len()];
        let mut stack: Vec<StateId> = Vec::new();
        for (id, state) in self.states.iter().enumerate() {
            if state.final_weight.map_or(false, |w| !w.is_zero()) {
                seen[id] = true;
                stack.push(id);
            }
        }
        while let Some(state) = stack.pop() {
            for &source in &reverse[state] {
                if !seen[source] {
                    seen[source] = true;
                    stack.push(source);
                }
            }
        }
        seen
    }

    /// Remove states that are unreachable or cannot reach a final state.
    ///
    /// Surviving states are renumbered breadth-first from the start state,
    /// so the start state of the result is always 0.
    pub fn connect(&self) -> Fst {
        let accessible = self.accessible();
        let coaccessible = self.coaccessible();
        let keep = |s: StateId| accessible[s] && coaccessible[s];
        if !keep(self.start) {
            return Fst::empty();
        }

        let mut mapping: Vec<Option<StateId>> = vec![None; self.states.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        mapping[self.start] = Some(0);
        order.push(self.start);
        queue.push_back(self.start);
        while let Some(state) = queue.pop_front() {
            for arc in &self.states[state].arcs {
                let next = arc.nextstate;
                if keep(next) && mapping[next].is_none() {
                    mapping[next] = Some(order.len());
                    order.push(next);
                    queue.push_back(next);
                }
            }
        }

        let states = order
            .iter()
            .map(|&old| {
                let source = &self.states[old];
                State {
                    final_weight: source.final_weight.filter(|w| !w.is_zero()),
                    arcs: source
                        .arcs
                        .iter()
                        .filter(|a| !a.weight.is_zero())
                        .filter_map(|a| {
                            mapping[a.nextstate].map(|next| Arc {
                                nextstate: next,
                                ..a.clone()
                            })
                        })
                        .collect(),
                }
            })
            .collect();

        Fst { states, start: 0 }
    }

    /// Copy `other`'s states into `self`, returning the id offset applied.
    fn append(&mut self, other: &Fst) -> StateId {
        let offset = self.states.len();
        self.states.extend(other.states.iter().map(|state| State {
            final_weight: state.final_weight,
            arcs: state
                .arcs
                .iter()
                .map(|a| Arc {
                    nextstate: a.nextstate + offset,
                    ..a.clone()
                })
                .collect(),
        }));
        offset
    }
}
