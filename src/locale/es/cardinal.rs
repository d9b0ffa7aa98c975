//! Cardinal numbers: `menos veintiuno` -> `cardinal { negative: "-" integer: "21" }` -> `-21`.

use super::numbers::{group_thousands, grouped_integer, written_integer, NumberGraphs};
use crate::fst::{Fst, Result};
use crate::grammar::{
    delete_space, field_extractor, field_value_extractor, tagged_field, ClassSpec, GrammarOptions,
};
use std::sync::Arc;

pub(super) const FIELD_ORDER: &[&str] = &["negative", "integer"];

/// Cost of the thousands-grouped reading relative to the plain one.
const GROUPED_PENALTY: f32 = 0.1;

pub(super) fn spec(numbers: &Arc<NumberGraphs>) -> ClassSpec {
    let numbers = Arc::clone(numbers);
    ClassSpec::new(
        "cardinal",
        1.1,
        FIELD_ORDER,
        move |options| tagger(&numbers, options),
        |_| Ok(verbalizer()),
    )
}

fn tagger(numbers: &NumberGraphs, options: &GrammarOptions) -> Result<Fst> {
    Ok(spoken_fields(numbers, options)?.union(&written_fields(options)?))
}

/// Fields for spoken input.
pub(super) fn spoken_fields(numbers: &NumberGraphs, options: &GrammarOptions) -> Result<Fst> {
    let mut integer = numbers.cardinal.clone();
    if !options.deterministic {
        let grouped = numbers
            .cardinal
            .compose(&group_thousands()?)
            .add_weight(GROUPED_PENALTY)?;
        integer = integer.union(&grouped);
    }
    Ok(Fst::cross("menos ", "negative: \"-\" ")
        .optional()
        .concat(&tagged_field("integer", &integer)))
}

/// Fields for already written input (`-42`).
pub(super) fn written_fields(options: &GrammarOptions) -> Result<Fst> {
    let mut integer = written_integer()?;
    if !options.deterministic {
        integer = integer.union(&grouped_integer()?);
    }
    Ok(Fst::cross("-", "negative: \"-\" ")
        .optional()
        .concat(&tagged_field("integer", &integer)))
}

/// Optional `negative` field followed by `integer`.
pub(super) fn verbalizer() -> Fst {
    field_value_extractor("negative", &Fst::accept("-"))
        .concat(&delete_space())
        .optional()
        .concat(&field_extractor("integer"))
}
