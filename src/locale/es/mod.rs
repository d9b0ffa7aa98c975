//! Spanish inverse normalization.
//!
//! Spoken-form spans are tagged into the written form of twelve classes.
//! Class weights order the readings: whitelist entries beat dates, dates
//! beat the bare numeric classes, measures beat everything that shares
//! their number, and plain words come last.

mod cardinal;
mod data;
mod date;
mod decimal;
mod electronic;
mod measure;
mod money;
mod numbers;
mod ordinal;
mod punctuation;
mod telephone;
mod time;
mod whitelist;
mod word;

use super::Locale;
use crate::config::Language;
use crate::grammar::{ClassSpec, GrammarError};
use numbers::NumberGraphs;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// The bundled Spanish grammars.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spanish;

impl Locale for Spanish {
    fn language(&self) -> Language {
        Language::Es
    }

    fn classes(&self) -> Result<Vec<ClassSpec>, GrammarError> {
        let started = Instant::now();
        let numbers = Arc::new(NumberGraphs::new()?);
        debug!(
            cardinal_states = numbers.cardinal.num_states(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built spanish number graphs"
        );

        Ok(vec![
            whitelist::spec(),
            time::spec(&numbers),
            date::spec(&numbers),
            decimal::spec(&numbers),
            measure::spec(&numbers),
            cardinal::spec(&numbers),
            ordinal::spec(),
            money::spec(&numbers),
            telephone::spec(&numbers),
            electronic::spec(),
            word::spec(),
            punctuation::spec(),
        ])
    }
}
