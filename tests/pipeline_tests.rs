//! End-to-end tests of the Spanish normalizer

use libtextnorm::prelude::*;
use std::sync::OnceLock;

// ============================================================================
// Shared Normalizers
// ============================================================================

fn deterministic() -> &'static Normalizer {
    static NORMALIZER: OnceLock<Normalizer> = OnceLock::new();
    NORMALIZER.get_or_init(|| Normalizer::new(NormalizerConfig::default()).unwrap())
}

fn non_deterministic() -> &'static Normalizer {
    static NORMALIZER: OnceLock<Normalizer> = OnceLock::new();
    NORMALIZER.get_or_init(|| {
        let config = NormalizerConfig::builder()
            .deterministic(false)
            .max_candidates(3)
            .build()
            .unwrap();
        Normalizer::new(config).unwrap()
    })
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_normalize_semiotic_classes() {
    let cases = [
        ("uno de enero", "1 de enero"),
        ("primero de mayo de dos mil veinte", "1 de mayo de 2020"),
        ("tengo veinte manzanas", "tengo 20 manzanas"),
        ("cinco dólares con cincuenta centavos", "$5,50"),
        ("cinco kilómetros", "5 km"),
        ("tres coma catorce", "3,14"),
        ("las tres y media", "3:30"),
        ("juan arroba gmail punto com", "juan@gmail.com"),
        ("buenos días señor", "buenos días Sr."),
    ];
    for (spoken, written) in cases {
        assert_eq!(deterministic().normalize(spoken).unwrap(), written, "{spoken}");
    }
}

#[test]
fn test_date_beats_cardinal() {
    let tagged = deterministic()
        .classify_and_tag("uno de enero", true)
        .unwrap();
    assert_eq!(
        tagged.best(),
        "tokens { date { day: \"1\" month: \"enero\" preserve_order: true } }"
    );
}

#[test]
fn test_spaces_and_punctuation() {
    let normalizer = deterministic();
    assert_eq!(
        normalizer.normalize("  hola,   mundo ").unwrap(),
        "hola , mundo"
    );
    assert_eq!(normalizer.normalize("").unwrap(), "");
}

#[test]
fn test_unsupported_symbols() {
    let normalizer = deterministic();
    assert_eq!(
        normalizer.classify_and_tag("hola \u{263A}", true),
        Err(PipelineError::UnsupportedSymbol('\u{263A}'))
    );
    assert_eq!(
        normalizer.normalize("uno\ndos"),
        Err(PipelineError::UnsupportedSymbol('\n'))
    );
    assert_eq!(
        normalizer.normalize("di \"hola\""),
        Err(PipelineError::UnsupportedSymbol('"'))
    );
}

// ============================================================================
// Candidates
// ============================================================================

#[test]
fn test_candidates_are_bounded_distinct_and_best_first() {
    let normalizer = non_deterministic();
    let tagging = normalizer.classify_and_tag("mil doscientos", false).unwrap();
    let candidates = tagging.clone().into_vec();
    assert!(!candidates.is_empty() && candidates.len() <= 3);
    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(
        tagging.best(),
        "tokens { cardinal { integer: \"1200\" } }"
    );

    let written = normalizer.normalize_candidates("mil doscientos").unwrap();
    assert_eq!(written[0], "1200");
    assert!(written.contains(&"1.200".to_string()));
}

#[test]
fn test_deterministic_flag_overrides_grammar_mode() {
    let normalizer = non_deterministic();
    let single = normalizer.classify_and_tag("mil doscientos", true).unwrap();
    assert!(matches!(single, Tagging::Single(_)));
    assert_eq!(normalizer.verbalize(single.best()).unwrap(), "1200");
}

// ============================================================================
// Verbalization Errors
// ============================================================================

#[test]
fn test_verbalize_errors() {
    let normalizer = deterministic();
    assert!(matches!(
        normalizer.verbalize("tokens { date { day: \"1\" "),
        Err(PipelineError::MalformedToken { .. })
    ));
    assert!(matches!(
        normalizer.verbalize("tokens { planet { name: \"marte\" } }"),
        Err(PipelineError::MalformedToken { .. })
    ));
    assert!(matches!(
        normalizer.verbalize(
            "tokens { date { day: \"1\" month: \"enero\" preserve_order: true field_order: \"day month\" } }"
        ),
        Err(PipelineError::AmbiguousOrderMarker { .. })
    ));
    assert!(matches!(
        normalizer.verbalize("tokens { date { day: \"1\" field_order: \"year day\" } }"),
        Err(PipelineError::MalformedToken { .. })
    ));
}

#[test]
fn test_verbalize_field_order_markers() {
    let normalizer = deterministic();
    assert_eq!(
        normalizer
            .verbalize("tokens { date { day: \"1\" month: \"enero\" field_order: \"month day\" } }")
            .unwrap(),
        "enero 1"
    );
    assert_eq!(
        normalizer
            .verbalize("tokens { money { integer_part: \"7\" currency: \"€\" } }")
            .unwrap(),
        "€7"
    );
}
