//! Ordinals: `tercera` -> `ordinal { integer: "3" morphosyntactic_features: "ª" }` -> `3.ª`.

use super::data::{
    ORDINAL_IRREGULAR_STEMS, ORDINAL_TEN_STEMS, ORDINAL_UNITS_FEMININE, ORDINAL_UNITS_MASCULINE,
};
use super::numbers::range;
use crate::fst::{Fst, Result};
use crate::grammar::{delete_space, field_extractor, tagged_field, ClassSpec, GrammarOptions};

pub(super) const FIELD_ORDER: &[&str] = &["integer", "morphosyntactic_features", "compact"];

const COMPACT_PENALTY: f32 = 0.1;

pub(super) fn spec() -> ClassSpec {
    ClassSpec::new("ordinal", 1.1, FIELD_ORDER, tagger, |_| Ok(verbalizer()))
}

/// Spoken ordinal of one gender, `units` giving 1..9 and `ending` closing
/// the tens stems.
fn spoken_integer(units: &[(&str, &str)], ending: &str) -> Fst {
    let units = Fst::string_map(units);
    let tens = Fst::string_map(ORDINAL_TEN_STEMS)
        .concat(&Fst::delete(ending))
        .concat(&Fst::insert("0").union(&Fst::delete(" ").concat(&units)));
    let irregular = Fst::string_map(ORDINAL_IRREGULAR_STEMS).concat(&Fst::delete(ending));
    units.union(&tens).union(&irregular)
}

fn features(marker: &str) -> Fst {
    Fst::insert(&format!(" morphosyntactic_features: \"{marker}\""))
}

fn tagger(options: &GrammarOptions) -> Result<Fst> {
    let masculine = tagged_field(
        "integer",
        &spoken_integer(ORDINAL_UNITS_MASCULINE, "o"),
    )
    .concat(&features("º"));
    let feminine =
        tagged_field("integer", &spoken_integer(ORDINAL_UNITS_FEMININE, "a")).concat(&features("ª"));
    let mut spoken = masculine.union(&feminine);

    let marker = tagged_field("morphosyntactic_features", &Fst::char_set(['º', 'ª']));
    let integer = tagged_field("integer", &range(1, 99));
    let mut written = integer
        .concat(&Fst::delete("."))
        .concat(&Fst::insert(" "))
        .concat(&marker);

    if !options.deterministic {
        let compact = Fst::insert(" compact: true");
        spoken = spoken.union(&spoken.concat(&compact).add_weight(COMPACT_PENALTY)?);
        written = written.union(
            &integer
                .concat(&Fst::insert(" "))
                .concat(&marker)
                .concat(&compact),
        );
    }
    Ok(spoken.union(&written))
}

/// `integer` then the feature marker, dotted unless `compact: true`.
fn verbalizer() -> Fst {
    let integer = field_extractor("integer").concat(&delete_space());
    let features = field_extractor("morphosyntactic_features");
    let compact = delete_space()
        .concat(&Fst::delete("compact:"))
        .concat(&delete_space())
        .concat(&Fst::delete("true"));
    integer.concat(
        &Fst::insert(".")
            .concat(&features)
            .union(&features.concat(&compact)),
    )
}
