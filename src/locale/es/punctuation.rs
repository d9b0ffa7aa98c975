//! Punctuation marks: `,` -> `punctuation { name: "," }`.

use crate::grammar::{field_extractor, punct, tagged_field, ClassSpec};

pub(super) fn spec() -> ClassSpec {
    ClassSpec::new(
        "punctuation",
        1.1,
        &["name"],
        |_| Ok(tagged_field("name", &punct())),
        |_| Ok(field_extractor("name")),
    )
    .punctuation()
}
