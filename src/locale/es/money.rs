//! Money: `cinco dólares con cincuenta centavos`
//! -> `money { integer_part: "5" currency: "$" fractional_part: "50" }` -> `$5,50`.
//!
//! Spoken amounts name the currency after the integer part, written ones
//! before it. The verbalizer reads both orders and always writes the
//! currency symbol first.

use super::data::{CURRENCIES, CURRENCY_SYMBOLS, MINOR_CURRENCY};
use super::numbers::{written_integer, NumberGraphs};
use crate::fst::{Fst, Result};
use crate::grammar::{
    delete_space, digit, field_extractor, field_value_extractor, tagged_field, ClassSpec,
};
use std::sync::Arc;

pub(super) const FIELD_ORDER: &[&str] = &["currency", "integer_part", "fractional_part"];

pub(super) fn spec(numbers: &Arc<NumberGraphs>) -> ClassSpec {
    let numbers = Arc::clone(numbers);
    ClassSpec::new(
        "money",
        1.1,
        FIELD_ORDER,
        move |_| Ok(spoken_fields(&numbers).union(&written_fields()?)),
        |_| Ok(verbalizer()),
    )
}

fn spoken_fields(numbers: &NumberGraphs) -> Fst {
    let minor: Vec<(&str, &str)> = MINOR_CURRENCY.iter().map(|word| (*word, "")).collect();
    let cents = Fst::cross(" con ", " ")
        .concat(&tagged_field("fractional_part", &numbers.two_digits))
        .concat(&Fst::delete(" "))
        .concat(&Fst::string_map(&minor));

    tagged_field("integer_part", &numbers.cardinal)
        .concat(&Fst::accept(" "))
        .concat(&tagged_field("currency", &Fst::string_map(CURRENCIES)))
        .concat(&cents.optional())
}

fn written_fields() -> Result<Fst> {
    let cents = Fst::cross(",", " ")
        .concat(&tagged_field("fractional_part", &digit().repeat(2, 2)?));
    Ok(
        tagged_field("currency", &Fst::char_set(CURRENCY_SYMBOLS.iter().copied()))
            .concat(&Fst::insert(" "))
            .concat(&tagged_field("integer_part", &written_integer()?))
            .concat(&cents.optional()),
    )
}

/// `currency integer_part` or `integer_part currency`, then optional cents.
fn verbalizer() -> Fst {
    let cents = delete_space()
        .concat(&Fst::insert(","))
        .concat(&field_extractor("fractional_part"));
    let written_order = field_extractor("currency")
        .concat(&delete_space())
        .concat(&field_extractor("integer_part"));

    // One branch per symbol: it is written before the integer it follows.
    let spoken_order = CURRENCY_SYMBOLS.iter().fold(Fst::empty(), |acc, symbol| {
        let symbol = symbol.to_string();
        acc.union(
            &Fst::insert(&symbol)
                .concat(&field_extractor("integer_part"))
                .concat(&delete_space())
                .concat(&field_value_extractor("currency", &Fst::delete(&symbol))),
        )
    });

    written_order
        .union(&spoken_order)
        .concat(&cents.optional())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{add_tokens, delete_tokens};

    #[test]
    fn test_spoken_amounts() {
        let numbers = NumberGraphs::new().unwrap();
        let tagger = add_tokens("money", &spoken_fields(&numbers));
        assert_eq!(
            tagger
                .shortest_path("cinco dólares con cincuenta centavos")
                .unwrap(),
            "money { integer_part: \"5\" currency: \"$\" fractional_part: \"50\" }"
        );
        assert_eq!(
            tagger.shortest_path("un euro").unwrap(),
            "money { integer_part: \"1\" currency: \"€\" }"
        );
        assert_eq!(
            tagger
                .shortest_path("diez euros con cinco céntimos")
                .unwrap(),
            "money { integer_part: \"10\" currency: \"€\" fractional_part: \"05\" }"
        );
    }

    #[test]
    fn test_written_amounts() {
        let tagger = add_tokens("money", &written_fields().unwrap());
        assert_eq!(
            tagger.shortest_path("$5,50").unwrap(),
            "money { currency: \"$\" integer_part: \"5\" fractional_part: \"50\" }"
        );
        assert!(!tagger.accepts("$5,5"));
    }

    #[test]
    fn test_verbalizer_reads_spoken_order() {
        let numbers = NumberGraphs::new().unwrap();
        let tagger = add_tokens("money", &spoken_fields(&numbers));
        let fst = delete_tokens("money", &verbalizer());
        for (spoken, written) in [
            ("cinco dólares con cincuenta centavos", "$5,50"),
            ("un euro", "€1"),
            ("diez euros con cinco céntimos", "€10,05"),
        ] {
            let tagged = tagger.shortest_path(spoken).unwrap();
            assert_eq!(fst.shortest_path(&tagged).unwrap(), written, "{tagged}");
        }
    }

    #[test]
    fn test_verbalizer_reads_written_order() {
        let fst = delete_tokens("money", &verbalizer());
        assert_eq!(
            fst.shortest_path(
                "money { currency: \"$\" integer_part: \"5\" fractional_part: \"50\" }"
            )
            .unwrap(),
            "$5,50"
        );
        assert_eq!(
            fst.shortest_path("money { currency: \"€\" integer_part: \"12\" }")
                .unwrap(),
            "€12"
        );
    }
}
