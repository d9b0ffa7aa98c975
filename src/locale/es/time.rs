//! Times: `las tres y media` -> `time { hours: "3" minutes: "30" }` -> `3:30`.

use super::numbers::{padded_range, range, NumberGraphs};
use crate::fst::Fst;
use crate::grammar::{delete_space, field_extractor, tagged_field, ClassSpec};
use std::sync::Arc;

pub(super) const FIELD_ORDER: &[&str] = &["hours", "minutes"];

pub(super) fn spec(numbers: &Arc<NumberGraphs>) -> ClassSpec {
    let numbers = Arc::clone(numbers);
    ClassSpec::new(
        "time",
        1.1,
        FIELD_ORDER,
        move |_| Ok(tagger(&numbers)),
        |_| Ok(verbalizer()),
    )
}

/// Maps an hour to the one before it, wrapping 1 to 12.
fn previous_hour() -> Fst {
    let pairs: Vec<(String, String)> = (1..=23u32)
        .map(|h| {
            let previous = if h == 1 { 12 } else { h - 1 };
            (h.to_string(), previous.to_string())
        })
        .collect();
    Fst::string_map(&pairs)
}

fn tagger(numbers: &NumberGraphs) -> Fst {
    let article = Fst::delete("la ").union(&Fst::delete("las ")).optional();
    let hours = numbers.cardinal_in(1, 23);
    let minutes = numbers.two_digits.compose(&padded_range(1, 59));

    let past = Fst::cross(" y media", "30")
        .union(&Fst::cross(" y cuarto", "15"))
        .union(&Fst::delete(" y ").concat(&minutes))
        .union(&Fst::cross(" en punto", "00"));
    let spoken_past = article
        .concat(&tagged_field("hours", &hours))
        .concat(&Fst::insert(" "))
        .concat(&tagged_field("minutes", &past));
    let spoken_to = article
        .concat(&tagged_field("hours", &hours.compose(&previous_hour())))
        .concat(&Fst::cross(" menos cuarto", " "))
        .concat(&tagged_field("minutes", &Fst::insert("45")));

    let written = tagged_field("hours", &range(0, 23))
        .concat(&Fst::cross(":", " "))
        .concat(&tagged_field("minutes", &padded_range(0, 59)));

    spoken_past.union(&spoken_to).union(&written)
}

fn verbalizer() -> Fst {
    field_extractor("hours")
        .concat(&delete_space())
        .concat(&Fst::insert(":"))
        .concat(&field_extractor("minutes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{add_tokens, delete_tokens};

    fn tag(input: &str) -> String {
        let numbers = NumberGraphs::new().unwrap();
        add_tokens("time", &tagger(&numbers))
            .shortest_path(input)
            .unwrap()
    }

    #[test]
    fn test_spoken_times() {
        assert_eq!(
            tag("las tres y media"),
            "time { hours: \"3\" minutes: \"30\" }"
        );
        assert_eq!(
            tag("la una y cinco"),
            "time { hours: \"1\" minutes: \"05\" }"
        );
        assert_eq!(
            tag("las cuatro menos cuarto"),
            "time { hours: \"3\" minutes: \"45\" }"
        );
        assert_eq!(
            tag("las diez en punto"),
            "time { hours: \"10\" minutes: \"00\" }"
        );
    }

    #[test]
    fn test_written_time() {
        assert_eq!(tag("3:30"), "time { hours: \"3\" minutes: \"30\" }");
    }

    #[test]
    fn test_verbalizer() {
        let fst = delete_tokens("time", &verbalizer());
        assert_eq!(
            fst.shortest_path("time { hours: \"1\" minutes: \"05\" }")
                .unwrap(),
            "1:05"
        );
    }
}
