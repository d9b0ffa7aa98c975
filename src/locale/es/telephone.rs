//! Telephone numbers: nine spoken digits -> `telephone { number_part: "123-456-789" }`.

use super::numbers::NumberGraphs;
use crate::fst::{Fst, Result};
use crate::grammar::{digit, field_extractor, tagged_field, ClassSpec};
use std::sync::Arc;

pub(super) const FIELD_ORDER: &[&str] = &["number_part"];

pub(super) fn spec(numbers: &Arc<NumberGraphs>) -> ClassSpec {
    let numbers = Arc::clone(numbers);
    ClassSpec::new(
        "telephone",
        1.1,
        FIELD_ORDER,
        move |_| tagger(&numbers),
        |_| Ok(field_extractor("number_part")),
    )
}

/// Three groups of three, joined by `separator`.
fn groups(group: &Fst, separator: &Fst) -> Fst {
    group
        .concat(separator)
        .concat(group)
        .concat(separator)
        .concat(group)
}

fn tagger(numbers: &NumberGraphs) -> Result<Fst> {
    let word = &numbers.digit_word;
    let spoken_group = word
        .concat(&Fst::delete(" "))
        .concat(word)
        .concat(&Fst::delete(" "))
        .concat(word);
    let spoken = groups(&spoken_group, &Fst::cross(" ", "-"));

    let hyphen = Fst::accept("-").union(&Fst::insert("-"));
    let written = groups(&digit().repeat(3, 3)?, &hyphen);

    Ok(tagged_field("number_part", &spoken.union(&written)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::add_tokens;

    #[test]
    fn test_spoken_and_written() {
        let numbers = NumberGraphs::new().unwrap();
        let fst = add_tokens("telephone", &tagger(&numbers).unwrap());
        let expected = "telephone { number_part: \"123-456-789\" }";
        assert_eq!(
            fst.shortest_path("uno dos tres cuatro cinco seis siete ocho nueve")
                .unwrap(),
            expected
        );
        assert_eq!(fst.shortest_path("123-456-789").unwrap(), expected);
        assert_eq!(fst.shortest_path("123456789").unwrap(), expected);
        assert!(!fst.accepts("uno dos tres"));
    }
}
