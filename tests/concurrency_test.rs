//! Concurrent normalization through one shared normalizer

use libtextnorm::prelude::*;
use std::sync::{Arc, Barrier};
use std::thread;

const INPUTS: &[&str] = &[
    "uno de enero",
    "cinco kilómetros",
    "las tres y media",
    "tengo veinte manzanas",
    "cinco dólares con cincuenta centavos",
    "hola, mundo",
];

#[test]
fn test_parallel_normalization_matches_sequential() {
    let normalizer = Arc::new(Normalizer::new(NormalizerConfig::default()).unwrap());
    let expected: Vec<String> = INPUTS
        .iter()
        .map(|input| normalizer.normalize(input).unwrap())
        .collect();
    let expected = Arc::new(expected);

    const NUM_THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(NUM_THREADS));

    let mut handles = vec![];
    for i in 0..NUM_THREADS {
        let normalizer = Arc::clone(&normalizer);
        let expected = Arc::clone(&expected);
        let barrier = Arc::clone(&barrier);

        handles.push(thread::spawn(move || {
            // All threads start at the same time
            barrier.wait();

            for j in 0..20 {
                let index = (i + j) % INPUTS.len();
                let written = normalizer.normalize(INPUTS[index]).unwrap();
                assert_eq!(written, expected[index], "thread {i}, input {index}");
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_errors_are_reported_per_call() {
    let normalizer = Arc::new(Normalizer::new(NormalizerConfig::default()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let normalizer = Arc::clone(&normalizer);
            thread::spawn(move || {
                if i % 2 == 0 {
                    normalizer.normalize("hola \u{263A}")
                } else {
                    normalizer.normalize("hola")
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(result, Err(PipelineError::UnsupportedSymbol('\u{263A}')));
        } else {
            assert_eq!(result.unwrap(), "hola");
        }
    }
}
