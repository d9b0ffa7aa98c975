//! Rational operations: concatenation, union, closure and weighting.

use super::{Arc, Fst, FstError, Result, Weight};

fn checked_weight(value: f32) -> Result<Weight> {
    Weight::new(value).ok_or(FstError::InvalidWeight(value))
}

impl Fst {
    /// Sequential composition: accepts `L(self) · L(other)`.
    pub fn concat(&self, other: &Fst) -> Fst {
        let mut result = self.clone();
        let left_states = result.num_states();
        let offset = result.append(other);
        let bridge = other.start() + offset;

        for state in 0..left_states {
            if let Some(weight) = result.states[state].final_weight.take() {
                result.add_arc(state, Arc::epsilon(weight, bridge));
            }
        }
        result.connect()
    }

    /// Accepts `L(self) ∪ L(other)`; equal-cost alternatives are both kept.
    pub fn union(&self, other: &Fst) -> Fst {
        self.union_with(other, Weight::ONE, Weight::ONE)
    }

    /// Weighted alternation.
    ///
    /// Paths through `self` pay `weight_self`, paths through `other` pay
    /// `weight_other`. When both sides match the same input, decoding
    /// prefers the side with the lower total cost.
    pub fn union_weighted(&self, other: &Fst, weight_self: f32, weight_other: f32) -> Result<Fst> {
        Ok(self.union_with(
            other,
            checked_weight(weight_self)?,
            checked_weight(weight_other)?,
        ))
    }

    fn union_with(&self, other: &Fst, weight_self: Weight, weight_other: Weight) -> Fst {
        let mut result = Fst::empty();
        let left = result.append(self);
        let right = result.append(other);
        let start = result.start();
        result.add_arc(start, Arc::epsilon(weight_self, self.start() + left));
        result.add_arc(start, Arc::epsilon(weight_other, other.start() + right));
        result.connect()
    }

    /// Union of many alternatives, each with its own cost.
    pub fn union_all<'a, I>(alternatives: I) -> Result<Fst>
    where
        I: IntoIterator<Item = (&'a Fst, f32)>,
    {
        let mut result = Fst::empty();
        let start = result.start();
        for (fst, cost) in alternatives {
            let weight = checked_weight(cost)?;
            let offset = result.append(fst);
            result.add_arc(start, Arc::epsilon(weight, fst.start() + offset));
        }
        Ok(result.connect())
    }

    /// Kleene closure requiring at least `min_reps` repetitions.
    ///
    /// `closure(0)` is the star (the empty string included), `closure(1)`
    /// the plus.
    pub fn closure(&self, min_reps: usize) -> Fst {
        let mut result = Fst::epsilon();
        for _ in 0..min_reps {
            result = result.concat(self);
        }
        result.concat(&self.star())
    }

    fn star(&self) -> Fst {
        let mut result = Fst::epsilon();
        let offset = result.append(self);
        let inner_start = self.start() + offset;
        let start = result.start();
        result.add_arc(start, Arc::epsilon(Weight::ONE, inner_start));

        for state in offset..result.num_states() {
            if let Some(weight) = result.final_weight(state) {
                result.add_arc(state, Arc::epsilon(weight, inner_start));
            }
        }
        result.connect()
    }

    /// Between `min` and `max` repetitions, inclusive.
    pub fn repeat(&self, min: usize, max: usize) -> Result<Fst> {
        if min > max {
            return Err(FstError::InvalidRepeat { min, max });
        }
        let mut result = Fst::epsilon();
        for _ in 0..min {
            result = result.concat(self);
        }
        let optional = self.optional();
        for _ in min..max {
            result = result.concat(&optional);
        }
        Ok(result)
    }

    /// Zero or one occurrence.
    pub fn optional(&self) -> Fst {
        self.union(&Fst::epsilon())
    }

    /// Add a constant cost to every accepting path.
    pub fn add_weight(&self, cost: f32) -> Result<Fst> {
        let weight = checked_weight(cost)?;
        let mut result = self.clone();
        for state in &mut result.states {
            if let Some(final_weight) = state.final_weight.as_mut() {
                *final_weight = final_weight.times(weight);
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_accepts_sequence() {
        let fst = Fst::accept("ab").concat(&Fst::accept("cd"));
        assert!(fst.accepts("abcd"));
        assert!(!fst.accepts("ab"));
        assert!(!fst.accepts("cd"));
    }

    #[test]
    fn test_concat_with_empty_is_empty() {
        let fst = Fst::accept("ab").concat(&Fst::empty());
        assert!(fst.is_empty());
        assert_eq!(fst.num_states(), 1);
    }

    #[test]
    fn test_union_accepts_either() {
        let fst = Fst::accept("uno").union(&Fst::accept("dos"));
        assert!(fst.accepts("uno"));
        assert!(fst.accepts("dos"));
        assert!(!fst.accepts("tres"));
    }

    #[test]
    fn test_union_weighted_prefers_cheaper_side() {
        let low = Fst::cross("1", "date");
        let high = Fst::cross("1", "cardinal");
        let fst = low.union_weighted(&high, 1.09, 1.1).unwrap();
        assert_eq!(fst.shortest_path("1").unwrap(), "date");

        let flipped = low.union_weighted(&high, 1.2, 1.1).unwrap();
        assert_eq!(flipped.shortest_path("1").unwrap(), "cardinal");
    }

    #[test]
    fn test_union_weighted_rejects_negative() {
        let fst = Fst::accept("a");
        assert_eq!(
            fst.union_weighted(&fst, -1.0, 0.0).unwrap_err(),
            FstError::InvalidWeight(-1.0)
        );
    }

    #[test]
    fn test_closure_star_and_plus() {
        let a = Fst::accept("a");
        let star = a.closure(0);
        assert!(star.accepts(""));
        assert!(star.accepts("aaa"));

        let plus = a.closure(1);
        assert!(!plus.accepts(""));
        assert!(plus.accepts("a"));
        assert!(plus.accepts("aaaa"));
    }

    #[test]
    fn test_repeat_bounds() {
        let digit = Fst::char_set('0'..='9');
        let three_to_four = digit.repeat(3, 4).unwrap();
        assert!(!three_to_four.accepts("12"));
        assert!(three_to_four.accepts("123"));
        assert!(three_to_four.accepts("1234"));
        assert!(!three_to_four.accepts("12345"));
        assert!(digit.repeat(2, 1).is_err());
    }

    #[test]
    fn test_add_weight_shifts_path_cost() {
        let fst = Fst::accept("a").add_weight(2.5).unwrap();
        let paths = fst.k_shortest_paths("a", 1).unwrap();
        assert!((paths[0].weight.value() - 2.5).abs() < 1e-6);
    }
}
