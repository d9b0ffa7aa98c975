//! Fixed abbreviations: `señor` -> `whitelist { name: "Sr." }` -> `Sr.`.

use super::data::WHITELIST;
use crate::config::InputCase;
use crate::fst::Fst;
use crate::grammar::{field_extractor, tagged_field, ClassSpec, GrammarOptions};

pub(super) const FIELD_ORDER: &[&str] = &["name"];

pub(super) fn spec() -> ClassSpec {
    ClassSpec::new(
        "whitelist",
        1.01,
        FIELD_ORDER,
        |options| Ok(tagger(options)),
        |_| Ok(field_extractor("name")),
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn tagger(options: &GrammarOptions) -> Fst {
    let mut pairs: Vec<(String, &str)> = WHITELIST
        .iter()
        .map(|(spoken, written)| (spoken.to_string(), *written))
        .collect();
    if options.input_case == InputCase::Cased {
        pairs.extend(
            WHITELIST
                .iter()
                .map(|(spoken, written)| (capitalize(spoken), *written)),
        );
    }
    pairs.extend(
        WHITELIST
            .iter()
            .map(|(_, written)| (written.to_string(), *written)),
    );
    tagged_field("name", &Fst::string_map(&pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::add_tokens;

    fn tagger_for(input_case: InputCase) -> Fst {
        add_tokens(
            "whitelist",
            &tagger(&GrammarOptions {
                input_case,
                deterministic: true,
            }),
        )
    }

    #[test]
    fn test_lower_cased_input() {
        let fst = tagger_for(InputCase::LowerCased);
        assert_eq!(
            fst.shortest_path("señor").unwrap(),
            "whitelist { name: \"Sr.\" }"
        );
        assert!(!fst.accepts("Señor"));
        assert!(fst.accepts("Sra."));
    }

    #[test]
    fn test_cased_input() {
        let fst = tagger_for(InputCase::Cased);
        assert_eq!(
            fst.shortest_path("Doctora").unwrap(),
            "whitelist { name: \"Dra.\" }"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("señor"), "Señor");
        assert_eq!(capitalize(""), "");
    }
}
