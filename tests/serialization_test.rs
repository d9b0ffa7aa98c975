//! Grammar export and reload

#[cfg(feature = "serialization")]
mod serialization_tests {
    use libtextnorm::pipeline::{ALL, TOKENIZE_AND_CLASSIFY};
    use libtextnorm::prelude::*;
    use libtextnorm::serialization::{export_grammars, SerializationError, REDUP};
    use std::sync::OnceLock;
    use tempfile::TempDir;

    fn normalizer() -> &'static Normalizer {
        static NORMALIZER: OnceLock<Normalizer> = OnceLock::new();
        NORMALIZER.get_or_init(|| Normalizer::new(NormalizerConfig::default()).unwrap())
    }

    #[test]
    fn test_export_layout() {
        let temp_dir = TempDir::new().unwrap();
        let written =
            export_grammars(normalizer(), temp_dir.path(), ArchiveFormat::Bincode).unwrap();
        assert_eq!(
            written,
            vec![
                temp_dir.path().join("classify/tokenize_and_classify.bin"),
                temp_dir.path().join("verbalize/verbalize.bin"),
            ]
        );
        for path in &written {
            assert!(path.exists(), "{}", path.display());
        }
    }

    #[test]
    fn test_exported_grammars_behave_like_the_pipeline() {
        let normalizer = normalizer();
        let temp_dir = TempDir::new().unwrap();

        for format in [ArchiveFormat::Bincode, ArchiveFormat::Att] {
            let dir = temp_dir.path().join(format.to_string());
            let written = export_grammars(normalizer, &dir, format).unwrap();

            let classify = format.read(&written[0]).unwrap();
            let tagger = classify.get(TOKENIZE_AND_CLASSIFY).unwrap();
            let tagged = tagger.shortest_path("uno de enero").unwrap();
            assert_eq!(
                tagged,
                normalizer
                    .classify_and_tag("uno de enero", true)
                    .unwrap()
                    .best(),
                "{format}"
            );

            let verbalize = format.read(&written[1]).unwrap();
            assert_eq!(verbalize.len(), 2);
            assert!(verbalize.get(REDUP).unwrap().accepts(REDUP));
            assert_eq!(
                verbalize.get(ALL).unwrap().shortest_path(&tagged).unwrap(),
                "1 de enero",
                "{format}"
            );
        }
    }

    #[test]
    fn test_single_automaton_round_trip() {
        let fst = Fst::string_map(&[("uno", "1"), ("dos", "2")])
            .union_weighted(&Fst::cross("uno", "I"), 0.0, 1.5)
            .unwrap()
            .optimize();

        let mut buffer = Vec::new();
        JsonSerializer::serialize(&fst, &mut buffer).unwrap();
        let loaded = JsonSerializer::deserialize(buffer.as_slice()).unwrap();
        assert_eq!(
            loaded.k_shortest_paths("uno", 2).unwrap(),
            fst.k_shortest_paths("uno", 2).unwrap()
        );
    }

    #[test]
    fn test_corrupt_automaton_is_rejected() {
        let json = r#"{"states":[{"final_weight":null,"arcs":[
            {"ilabel":{"Symbol":"a"},"olabel":"Epsilon","weight":0.0,"nextstate":7}
        ]}],"start":0}"#;
        assert!(matches!(
            JsonSerializer::deserialize(json.as_bytes()),
            Err(SerializationError::Fst(FstError::InvalidState(7)))
        ));

        let mut buffer = Vec::new();
        JsonSerializer::serialize(&Fst::accept("a"), &mut buffer).unwrap();
        let json = String::from_utf8(buffer).unwrap();
        assert!(json.contains("\"final_weight\": 0.0"), "{json}");
        let negative = json.replace("\"final_weight\": 0.0", "\"final_weight\": -5.0");
        assert!(matches!(
            JsonSerializer::deserialize(negative.as_bytes()),
            Err(SerializationError::Fst(FstError::InvalidWeight(w))) if w == -5.0
        ));

        let text = "0\t1\ta\tab\t0\n";
        assert!(matches!(
            AttSerializer::deserialize(text.as_bytes()),
            Err(SerializationError::Att { line: 1, .. })
        ));
    }
}
