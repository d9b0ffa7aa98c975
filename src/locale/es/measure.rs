//! Measures: `cinco kilómetros` -> `measure { cardinal { integer: "5" } units: "km" }` -> `5 km`.

use super::data::MEASURE_UNITS;
use super::numbers::NumberGraphs;
use super::{cardinal, decimal};
use crate::fst::{Fst, Result};
use crate::grammar::{
    add_tokens, delete_space, field_extractor, insert_space, nested_extractor, tagged_field,
    ClassSpec, GrammarOptions,
};
use std::collections::BTreeSet;
use std::sync::Arc;

pub(super) const FIELD_ORDER: &[&str] = &["cardinal", "decimal", "units"];

pub(super) fn spec(numbers: &Arc<NumberGraphs>) -> ClassSpec {
    let numbers = Arc::clone(numbers);
    ClassSpec::new(
        "measure",
        0.9,
        FIELD_ORDER,
        move |options| tagger(&numbers, options),
        |_| Ok(verbalizer()),
    )
}

fn tagger(numbers: &NumberGraphs, options: &GrammarOptions) -> Result<Fst> {
    let spoken_amount = add_tokens("cardinal", &cardinal::spoken_fields(numbers, options)?)
        .union(&add_tokens("decimal", &decimal::spoken_fields(numbers)));
    let spoken = spoken_amount
        .concat(&Fst::accept(" "))
        .concat(&tagged_field("units", &Fst::string_map(MEASURE_UNITS)));

    let symbols: BTreeSet<&str> = MEASURE_UNITS.iter().map(|(_, symbol)| *symbol).collect();
    let symbols: Vec<(&str, &str)> = symbols.into_iter().map(|s| (s, s)).collect();
    let written_amount = add_tokens("cardinal", &cardinal::written_fields(options)?)
        .union(&add_tokens("decimal", &decimal::written_fields()?));
    let written = written_amount
        .concat(&Fst::accept(" "))
        .concat(&tagged_field("units", &Fst::string_map(&symbols)));

    Ok(spoken.union(&written))
}

fn verbalizer() -> Fst {
    let amount = nested_extractor("cardinal", &cardinal::verbalizer())
        .union(&nested_extractor("decimal", &decimal::verbalizer()));
    amount
        .concat(&delete_space())
        .concat(&insert_space())
        .concat(&field_extractor("units"))
}
