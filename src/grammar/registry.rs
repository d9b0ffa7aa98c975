//! Registration and construction of per-class grammars.

use super::{
    add_tokens, delete_order_markers, delete_tokens, Grammar, GrammarError, GrammarKind,
    GrammarOptions,
};
use crate::fst::{self, Fst};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::time::Instant;
use tracing::debug;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Builds the field-level graph of a class.
pub type GraphBuilder = Box<dyn Fn(&GrammarOptions) -> fst::Result<Fst> + Send + Sync>;

/// How a class takes part in sentence classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassRole {
    /// Competes in the weighted union of semiotic classes
    Semiotic,
    /// Attaches to either side of a semiotic token
    Punctuation,
}

/// Declaration of one semiotic class by a locale.
///
/// `tagger` produces the fields of the tagged form (`integer: "5"`), and
/// `verbalizer` reads them back in `field_order`. The class wrapper
/// `name { ... }` is added by the registry.
pub struct ClassSpec {
    /// Class name, also the token name
    pub name: &'static str,
    /// Role in the classifier
    pub role: ClassRole,
    /// Cost added when this class is chosen
    pub weight: f32,
    /// Field order the verbalizer expects when no marker is present
    pub field_order: &'static [&'static str],
    /// Tagger field graph
    pub tagger: GraphBuilder,
    /// Verbalizer field graph
    pub verbalizer: GraphBuilder,
}

impl ClassSpec {
    /// Declare a semiotic class.
    pub fn new<T, V>(
        name: &'static str,
        weight: f32,
        field_order: &'static [&'static str],
        tagger: T,
        verbalizer: V,
    ) -> Self
    where
        T: Fn(&GrammarOptions) -> fst::Result<Fst> + Send + Sync + 'static,
        V: Fn(&GrammarOptions) -> fst::Result<Fst> + Send + Sync + 'static,
    {
        ClassSpec {
            name,
            role: ClassRole::Semiotic,
            weight,
            field_order,
            tagger: Box::new(tagger),
            verbalizer: Box::new(verbalizer),
        }
    }

    /// Mark the class as punctuation.
    pub fn punctuation(mut self) -> Self {
        self.role = ClassRole::Punctuation;
        self
    }
}

impl fmt::Debug for ClassSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassSpec")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("weight", &self.weight)
            .field("field_order", &self.field_order)
            .finish_non_exhaustive()
    }
}

/// Finished tagger and verbalizer of one class.
#[derive(Debug, Clone)]
pub struct ClassGrammars {
    /// Class name
    pub name: String,
    /// Role in the classifier
    pub role: ClassRole,
    /// Union weight
    pub weight: f32,
    /// Canonical field order
    pub field_order: Vec<String>,
    /// `surface -> name { fields }`
    pub tagger: Grammar,
    /// `name { fields } -> surface`
    pub verbalizer: Grammar,
}

impl ClassGrammars {
    fn build(spec: &ClassSpec, options: &GrammarOptions) -> Result<Self, GrammarError> {
        let started = Instant::now();

        let fields = (spec.tagger)(options)?;
        let tagger = Grammar::new(
            spec.name,
            GrammarKind::Classify,
            add_tokens(spec.name, &fields).optimize(),
            options.deterministic,
        )?;

        let fields = (spec.verbalizer)(options)?;
        let verbalizer = Grammar::new(
            spec.name,
            GrammarKind::Verbalize,
            delete_tokens(spec.name, &fields.concat(&delete_order_markers())).optimize(),
            true,
        )?;

        debug!(
            class = spec.name,
            tagger_states = tagger.fst().num_states(),
            verbalizer_states = verbalizer.fst().num_states(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built class grammars"
        );

        Ok(ClassGrammars {
            name: spec.name.to_string(),
            role: spec.role,
            weight: spec.weight,
            field_order: spec.field_order.iter().map(|s| s.to_string()).collect(),
            tagger,
            verbalizer,
        })
    }
}

/// Every class of a locale, built and frozen.
///
/// Construction runs the class builders independently (in parallel with the
/// `rayon` feature) and joins before anything reads the result.
#[derive(Debug, Clone)]
pub struct GrammarRegistry {
    classes: Vec<ClassGrammars>,
    index: FxHashMap<String, usize>,
    options: GrammarOptions,
}

impl GrammarRegistry {
    /// Build every class in `specs`.
    ///
    /// # Errors
    ///
    /// Fails on duplicate class names, on automaton errors and on classes
    /// whose tagger or verbalizer accepts nothing.
    pub fn build(specs: Vec<ClassSpec>, options: GrammarOptions) -> Result<Self, GrammarError> {
        let mut seen = FxHashSet::default();
        for spec in &specs {
            if !seen.insert(spec.name) {
                return Err(GrammarError::DuplicateClass(spec.name.to_string()));
            }
        }

        let started = Instant::now();

        #[cfg(feature = "rayon")]
        let classes = specs
            .par_iter()
            .map(|spec| ClassGrammars::build(spec, &options))
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(not(feature = "rayon"))]
        let classes = specs
            .iter()
            .map(|spec| ClassGrammars::build(spec, &options))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            classes = classes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "grammar registry ready"
        );

        let index = classes
            .iter()
            .enumerate()
            .map(|(i, class)| (class.name.clone(), i))
            .collect();
        Ok(GrammarRegistry {
            classes,
            index,
            options,
        })
    }

    /// All classes, in registration order.
    pub fn classes(&self) -> &[ClassGrammars] {
        &self.classes
    }

    /// Look up a class by name.
    pub fn get(&self, name: &str) -> Option<&ClassGrammars> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    /// Classes with the given role.
    pub fn with_role(&self, role: ClassRole) -> impl Iterator<Item = &ClassGrammars> {
        self.classes.iter().filter(move |class| class.role == role)
    }

    /// Options the grammars were built with.
    pub fn options(&self) -> &GrammarOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{digit, field_extractor, tagged_field};

    fn digits_spec(name: &'static str) -> ClassSpec {
        ClassSpec::new(
            name,
            1.0,
            &["integer"],
            |_| Ok(tagged_field("integer", &digit().closure(1))),
            |_| Ok(field_extractor("integer")),
        )
    }

    #[test]
    fn test_build_registers_classes() {
        let registry =
            GrammarRegistry::build(vec![digits_spec("cardinal")], GrammarOptions::default())
                .unwrap();
        let class = registry.get("cardinal").unwrap();
        assert_eq!(class.field_order, vec!["integer"]);
        assert_eq!(
            class.tagger.apply("7").unwrap(),
            "cardinal { integer: \"7\" }"
        );
        assert_eq!(
            class
                .verbalizer
                .apply("cardinal { integer: \"7\" preserve_order: true }")
                .unwrap(),
            "7"
        );
        assert!(registry.get("date").is_none());
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let err = GrammarRegistry::build(
            vec![digits_spec("cardinal"), digits_spec("cardinal")],
            GrammarOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, GrammarError::DuplicateClass("cardinal".to_string()));
    }

    #[test]
    fn test_build_rejects_empty_tagger() {
        let spec = ClassSpec::new(
            "broken",
            1.0,
            &[],
            |_| Ok(Fst::accept("a").compose(&Fst::accept("b"))),
            |_| Ok(Fst::epsilon()),
        );
        let err = GrammarRegistry::build(vec![spec], GrammarOptions::default()).unwrap_err();
        assert!(matches!(err, GrammarError::Empty { .. }));
    }

    #[test]
    fn test_with_role_filters() {
        let punct = ClassSpec::new(
            "punctuation",
            1.1,
            &["name"],
            |_| Ok(tagged_field("name", &Fst::accept(","))),
            |_| Ok(field_extractor("name")),
        )
        .punctuation();
        let registry = GrammarRegistry::build(
            vec![digits_spec("cardinal"), punct],
            GrammarOptions::default(),
        )
        .unwrap();
        assert_eq!(registry.with_role(ClassRole::Semiotic).count(), 1);
        assert_eq!(
            registry
                .with_role(ClassRole::Punctuation)
                .next()
                .map(|c| c.name.as_str()),
            Some("punctuation")
        );
    }
}
