//! Locale grammar tables.
//!
//! A [`Locale`] hands the pipeline one [`ClassSpec`] per semiotic class:
//! the tagger, the verbalizer, the union weight and the canonical field
//! order. The pipeline itself knows nothing about any language.

pub mod es;

use crate::config::Language;
use crate::grammar::{ClassSpec, GrammarError};

/// Source of class grammars for one language.
pub trait Locale: Send + Sync {
    /// Language the grammars are written for.
    fn language(&self) -> Language;

    /// Declare every class of the locale.
    ///
    /// Expensive shared graphs may be built here; the per-class builders
    /// run later, possibly in parallel.
    fn classes(&self) -> Result<Vec<ClassSpec>, GrammarError>;
}

/// The bundled locale for `language`.
pub fn for_language(language: Language) -> Box<dyn Locale> {
    match language {
        Language::Es => Box::new(es::Spanish),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_language() {
        assert_eq!(for_language(Language::Es).language(), Language::Es);
    }
}
