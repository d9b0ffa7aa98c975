//! Catch-all words: `hola` -> `word { name: "hola" }`.
//!
//! A word may contain punctuation between other characters (`bien-estar`)
//! but never starts or ends with it, so edge punctuation is tagged on its
//! own.

use crate::fst::Fst;
use crate::grammar::{field_extractor, punct, tagged_field, word_char, ClassSpec};

/// Highest class weight: words only win where nothing else matches.
pub(super) const WEIGHT: f32 = 100.0;

pub(super) fn spec() -> ClassSpec {
    ClassSpec::new(
        "word",
        WEIGHT,
        &["name"],
        |_| Ok(tagged_field("name", &word())),
        |_| Ok(field_extractor("name")),
    )
}

fn word() -> Fst {
    let run = word_char().closure(1);
    run.concat(&punct().closure(1).concat(&run).closure(0))
}
