#![cfg(feature = "__test_data")]

use std::path::PathBuf;

use super::{Alphabet, Config, Corpus, Segmenter};

#[test]
fn test_data() {
    crate::test_cases::run(&segmenter(crate_data_dir()));
}

pub fn segmenter(dir: PathBuf) -> Segmenter {
    let corpus = Corpus::from_dir(&dir)
        .unwrap_or_else(|e| panic!("failed to load test data from {:?}: {}", dir, e));
    Segmenter::new(corpus.model, Alphabet::default(), Config::default()).unwrap()
}

pub fn crate_data_dir() -> PathBuf {
    PathBuf::from(format!("{}/tests/data", env!("CARGO_MANIFEST_DIR")))
}
