//! E-mail addresses: `juan arroba gmail punto com`
//! -> `electronic { username: "juan" domain: "gmail.com" }` -> `juan@gmail.com`.

use crate::fst::Fst;
use crate::grammar::{delete_space, field_extractor, lower_alnum, tagged_field, ClassSpec};

pub(super) const FIELD_ORDER: &[&str] = &["username", "domain"];

pub(super) fn spec() -> ClassSpec {
    ClassSpec::new(
        "electronic",
        1.1,
        FIELD_ORDER,
        |_| Ok(tagger()),
        |_| Ok(verbalizer()),
    )
}

/// Dot-separated labels; `min_dots` of them at least.
fn dotted(dot: &Fst, min_dots: usize) -> Fst {
    let label = lower_alnum().closure(1);
    label.concat(&dot.concat(&label).closure(min_dots))
}

fn tagger() -> Fst {
    let spoken_dot = Fst::cross(" punto ", ".");
    let spoken = tagged_field("username", &dotted(&spoken_dot, 0))
        .concat(&Fst::cross(" arroba ", " "))
        .concat(&tagged_field("domain", &dotted(&spoken_dot, 1)));

    let dot = Fst::accept(".");
    let written = tagged_field("username", &dotted(&dot, 0))
        .concat(&Fst::cross("@", " "))
        .concat(&tagged_field("domain", &dotted(&dot, 1)));

    spoken.union(&written)
}

fn verbalizer() -> Fst {
    field_extractor("username")
        .concat(&delete_space())
        .concat(&Fst::insert("@"))
        .concat(&field_extractor("domain"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{add_tokens, delete_tokens};

    #[test]
    fn test_spoken_and_written() {
        let fst = add_tokens("electronic", &tagger());
        let expected = "electronic { username: \"juan\" domain: \"gmail.com\" }";
        assert_eq!(
            fst.shortest_path("juan arroba gmail punto com").unwrap(),
            expected
        );
        assert_eq!(fst.shortest_path("juan@gmail.com").unwrap(), expected);
        assert!(!fst.accepts("juan arroba gmail"));
    }

    #[test]
    fn test_verbalizer() {
        let fst = delete_tokens("electronic", &verbalizer());
        assert_eq!(
            fst.shortest_path("electronic { username: \"ana.maria\" domain: \"mail.es\" }")
                .unwrap(),
            "ana.maria@mail.es"
        );
    }
}
