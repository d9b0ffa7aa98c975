//! Dates: `uno de enero de dos mil veinte`
//! -> `date { day: "1" month: "enero" year: "2020" preserve_order: true }` -> `1 de enero de 2020`.

use super::data::MONTHS;
use super::numbers::{range, NumberGraphs};
use crate::fst::{Fst, Result};
use crate::grammar::{
    delete_extra_space, digit, field_extractor, insert_space, nonzero_digit, tagged_field,
    ClassSpec,
};
use std::sync::Arc;

pub(super) const FIELD_ORDER: &[&str] = &["day", "month", "year"];

pub(super) fn spec(numbers: &Arc<NumberGraphs>) -> ClassSpec {
    let numbers = Arc::clone(numbers);
    ClassSpec::new(
        "date",
        1.09,
        FIELD_ORDER,
        move |_| tagger(&numbers),
        |_| Ok(verbalizer()),
    )
}

fn months() -> Fst {
    let pairs: Vec<(&str, &str)> = MONTHS.iter().map(|m| (*m, *m)).collect();
    Fst::string_map(&pairs)
}

/// `day de month [de year]` with the given day and year graphs.
fn day_month_year(day: &Fst, year: &Fst) -> Fst {
    let connector = Fst::cross(" de ", " ");
    tagged_field("day", day)
        .concat(&connector)
        .concat(&tagged_field("month", &months()))
        .concat(&connector.concat(&tagged_field("year", year)).optional())
        .concat(&Fst::insert(" preserve_order: true"))
}

fn tagger(numbers: &NumberGraphs) -> Result<Fst> {
    let spoken_day = numbers
        .cardinal_in(1, 31)
        .union(&Fst::cross("primero", "1"));
    let written_year = nonzero_digit().concat(&digit().repeat(0, 3)?);
    let spoken_year = numbers.cardinal.compose(&written_year).optimize();

    Ok(day_month_year(&spoken_day, &spoken_year)
        .union(&day_month_year(&range(1, 31), &written_year)))
}

/// Day-month (`1 de enero`) or month-day (`enero 1`) order, then an
/// optional year.
fn verbalizer() -> Fst {
    let day = field_extractor("day");
    let month = field_extractor("month");
    let year = delete_extra_space()
        .concat(&Fst::insert("de"))
        .concat(&insert_space())
        .concat(&field_extractor("year"));

    let day_month = day
        .concat(&delete_extra_space())
        .concat(&Fst::insert("de"))
        .concat(&insert_space())
        .concat(&month);
    let month_day = month.concat(&delete_extra_space()).concat(&day);

    day_month.union(&month_day).concat(&year.optional())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{add_tokens, delete_order_markers, delete_tokens};

    #[test]
    fn test_spoken_date() {
        let numbers = NumberGraphs::new().unwrap();
        let fst = add_tokens("date", &tagger(&numbers).unwrap());
        assert_eq!(
            fst.shortest_path("uno de enero de dos mil veinte").unwrap(),
            "date { day: \"1\" month: \"enero\" year: \"2020\" preserve_order: true }"
        );
        assert_eq!(
            fst.shortest_path("primero de mayo").unwrap(),
            "date { day: \"1\" month: \"mayo\" preserve_order: true }"
        );
        assert_eq!(
            fst.shortest_path("15 de agosto de 1990").unwrap(),
            "date { day: \"15\" month: \"agosto\" year: \"1990\" preserve_order: true }"
        );
        assert!(!fst.accepts("treinta y dos de enero"));
    }

    #[test]
    fn test_verbalizer_orders() {
        let fst = delete_tokens("date", &verbalizer().concat(&delete_order_markers()));
        assert_eq!(
            fst.shortest_path("date { day: \"1\" month: \"enero\" preserve_order: true }")
                .unwrap(),
            "1 de enero"
        );
        assert_eq!(
            fst.shortest_path("date { month: \"enero\" day: \"1\" preserve_order: true }")
                .unwrap(),
            "enero 1"
        );
        assert_eq!(
            fst.shortest_path("date { day: \"1\" month: \"enero\" year: \"2020\" }")
                .unwrap(),
            "1 de enero de 2020"
        );
    }
}
