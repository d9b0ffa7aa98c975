//! Decimals: `tres coma catorce` -> `decimal { integer_part: "3" fractional_part: "14" }` -> `3,14`.

use super::numbers::{written_integer, NumberGraphs};
use crate::fst::{Fst, Result};
use crate::grammar::{
    delete_space, digit, field_extractor, field_value_extractor, tagged_field, ClassSpec,
};
use std::sync::Arc;

pub(super) const FIELD_ORDER: &[&str] = &["negative", "integer_part", "fractional_part"];

pub(super) fn spec(numbers: &Arc<NumberGraphs>) -> ClassSpec {
    let numbers = Arc::clone(numbers);
    ClassSpec::new(
        "decimal",
        1.1,
        FIELD_ORDER,
        move |_| Ok(spoken_fields(&numbers).union(&written_fields()?)),
        |_| Ok(verbalizer()),
    )
}

/// Fields for spoken input. The fraction is either a number (`catorce`)
/// or a run of digit names (`cero cinco`).
pub(super) fn spoken_fields(numbers: &NumberGraphs) -> Fst {
    let digit_run = numbers
        .digit_word
        .concat(&Fst::delete(" ").concat(&numbers.digit_word).closure(1));
    let fraction = numbers.cardinal.union(&digit_run);

    Fst::cross("menos ", "negative: \"-\" ")
        .optional()
        .concat(&tagged_field("integer_part", &numbers.cardinal))
        .concat(&Fst::cross(" coma ", " "))
        .concat(&tagged_field("fractional_part", &fraction))
}

/// Fields for written input (`-3,14`).
pub(super) fn written_fields() -> Result<Fst> {
    Ok(Fst::cross("-", "negative: \"-\" ")
        .optional()
        .concat(&tagged_field("integer_part", &written_integer()?))
        .concat(&Fst::cross(",", " "))
        .concat(&tagged_field("fractional_part", &digit().closure(1))))
}

pub(super) fn verbalizer() -> Fst {
    field_value_extractor("negative", &Fst::accept("-"))
        .concat(&delete_space())
        .optional()
        .concat(&field_extractor("integer_part"))
        .concat(&delete_space())
        .concat(&Fst::insert(","))
        .concat(&field_extractor("fractional_part"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{add_tokens, delete_tokens};

    #[test]
    fn test_spoken_and_written_agree() {
        let numbers = NumberGraphs::new().unwrap();
        let tagger = add_tokens(
            "decimal",
            &spoken_fields(&numbers).union(&written_fields().unwrap()),
        );
        let expected = "decimal { integer_part: \"3\" fractional_part: \"14\" }";
        assert_eq!(tagger.shortest_path("tres coma catorce").unwrap(), expected);
        assert_eq!(tagger.shortest_path("3,14").unwrap(), expected);
        assert_eq!(
            tagger.shortest_path("cero coma cero cinco").unwrap(),
            "decimal { integer_part: \"0\" fractional_part: \"05\" }"
        );
        assert_eq!(
            tagger.shortest_path("menos uno coma cinco").unwrap(),
            "decimal { negative: \"-\" integer_part: \"1\" fractional_part: \"5\" }"
        );
    }

    #[test]
    fn test_verbalizer() {
        let fst = delete_tokens("decimal", &verbalizer());
        assert_eq!(
            fst.shortest_path("decimal { integer_part: \"3\" fractional_part: \"14\" }")
                .unwrap(),
            "3,14"
        );
        assert_eq!(
            fst.shortest_path(
                "decimal { negative: \"-\" integer_part: \"1\" fractional_part: \"5\" }"
            )
            .unwrap(),
            "-1,5"
        );
    }
}
