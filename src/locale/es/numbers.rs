//! Spoken number graphs shared by the numeric classes.

use super::data::{DIGITS, HUNDREDS, TEENS, TENS, TWENTIES, UNITS};
use crate::fst::{Fst, Result};
use crate::grammar::{digit, nonzero_digit};

/// Number graphs built once per locale load and shared read-only.
#[derive(Debug, Clone)]
pub(super) struct NumberGraphs {
    /// `cero`..`nueve` to a single digit
    pub(super) digit_word: Fst,
    /// Spoken 1..99 to exactly two digits (`cinco` -> `05`)
    pub(super) two_digits: Fst,
    /// Spoken 0..999 999 to digits without leading zeros
    pub(super) cardinal: Fst,
}

impl NumberGraphs {
    pub(super) fn new() -> Result<Self> {
        let units = Fst::string_map(UNITS);
        let tens = Fst::string_map(TENS)
            .concat(&Fst::insert("0").union(&Fst::delete(" y ").concat(&units)));
        let two_digits = Fst::string_map(TEENS)
            .union(&Fst::string_map(TWENTIES))
            .union(&tens)
            .union(&Fst::insert("0").concat(&units));

        let three_digits = Fst::cross("cien", "100")
            .union(
                &Fst::string_map(HUNDREDS).concat(
                    &Fst::insert("00").union(&Fst::delete(" ").concat(&two_digits)),
                ),
            )
            .union(&Fst::insert("0").concat(&two_digits));

        let thousands = three_digits
            .concat(&Fst::delete(" "))
            .union(&Fst::insert("001"))
            .concat(&Fst::delete("mil"));
        let six_digits = thousands
            .concat(&Fst::insert("000").union(&Fst::delete(" ").concat(&three_digits)))
            .union(&Fst::insert("000").concat(&three_digits));

        let strip_zeros = Fst::delete("0")
            .closure(0)
            .concat(&nonzero_digit())
            .concat(&digit().closure(0));
        let cardinal = six_digits
            .compose(&strip_zeros)
            .union(&Fst::cross("cero", "0"))
            .optimize();

        Ok(NumberGraphs {
            digit_word: Fst::string_map(DIGITS).optimize(),
            two_digits: two_digits.optimize(),
            cardinal,
        })
    }

    /// Spoken numbers restricted to the values `lo..=hi`.
    pub(super) fn cardinal_in(&self, lo: u32, hi: u32) -> Fst {
        self.cardinal.compose(&range(lo, hi)).optimize()
    }
}

/// Acceptor for the decimal spellings of `lo..=hi`.
pub(super) fn range(lo: u32, hi: u32) -> Fst {
    let values: Vec<(String, String)> = (lo..=hi).map(|n| (n.to_string(), n.to_string())).collect();
    Fst::string_map(&values)
}

/// Acceptor for `lo..=hi` zero-padded to two digits.
pub(super) fn padded_range(lo: u32, hi: u32) -> Fst {
    let values: Vec<(String, String)> = (lo..=hi)
        .map(|n| (format!("{n:02}"), format!("{n:02}")))
        .collect();
    Fst::string_map(&values)
}

/// Written integers of up to six digits without leading zeros.
pub(super) fn written_integer() -> Result<Fst> {
    Ok(Fst::accept("0").union(&nonzero_digit().concat(&digit().repeat(0, 5)?)))
}

/// Written integers of four to six digits grouped with a dot (`1.200`).
pub(super) fn grouped_integer() -> Result<Fst> {
    Ok(nonzero_digit()
        .concat(&digit().repeat(0, 2)?)
        .concat(&Fst::accept("."))
        .concat(&digit().repeat(3, 3)?))
}

/// Rewrites plain digit strings of four to six digits into grouped form.
pub(super) fn group_thousands() -> Result<Fst> {
    Ok(nonzero_digit()
        .concat(&digit().repeat(0, 2)?)
        .concat(&Fst::insert("."))
        .concat(&digit().repeat(3, 3)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> NumberGraphs {
        NumberGraphs::new().unwrap()
    }

    #[test]
    fn test_cardinal_spoken_values() {
        let cardinal = numbers().cardinal;
        let cases = [
            ("cero", "0"),
            ("uno", "1"),
            ("quince", "15"),
            ("veintiuno", "21"),
            ("treinta", "30"),
            ("cuarenta y dos", "42"),
            ("cien", "100"),
            ("ciento uno", "101"),
            ("doscientos treinta y cuatro", "234"),
            ("mil", "1000"),
            ("mil doscientos", "1200"),
            ("dos mil veinte", "2020"),
            ("novecientos noventa y nueve mil novecientos noventa y nueve", "999999"),
        ];
        for (spoken, written) in cases {
            assert_eq!(cardinal.shortest_path(spoken).unwrap(), written, "{spoken}");
        }
        assert!(!cardinal.accepts("cuarenta y"));
    }

    #[test]
    fn test_two_digits_pads() {
        let numbers = numbers();
        assert_eq!(numbers.two_digits.shortest_path("cinco").unwrap(), "05");
        assert_eq!(numbers.two_digits.shortest_path("cincuenta").unwrap(), "50");
    }

    #[test]
    fn test_cardinal_in_restricts_values() {
        let days = numbers().cardinal_in(1, 31);
        assert_eq!(days.shortest_path("treinta y uno").unwrap(), "31");
        assert!(!days.accepts("treinta y dos"));
        assert!(!days.accepts("cero"));
    }

    #[test]
    fn test_grouping() {
        let grouped = numbers().cardinal.compose(&group_thousands().unwrap());
        assert_eq!(grouped.shortest_path("mil doscientos").unwrap(), "1.200");
        assert!(!grouped.accepts("doscientos"));
        assert!(grouped_integer().unwrap().accepts("12.345"));
        assert!(!written_integer().unwrap().accepts("0123"));
    }
}
