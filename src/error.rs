use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid construction input for a [`crate::Segmenter`] or one of its parts
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("total must be positive and finite, got {0}")]
    InvalidTotal(f64),
    #[error("invalid count {count} for unigram {token:?}")]
    InvalidUnigram { token: String, count: f64 },
    #[error("invalid count {count} for bigram ({left:?}, {right:?})")]
    InvalidBigram {
        left: String,
        right: String,
        count: f64,
    },
    #[error("word length limit must be at least 1")]
    ZeroLimit,
    #[error("window size must be at least 1")]
    ZeroWindow,
    #[error("cannot carry {carry_words} words with a window size of {window_size}")]
    CarryExceedsWindow {
        carry_words: usize,
        window_size: usize,
    },
    #[error("alphabet character {0:?} is not ASCII")]
    NonAsciiAlphabet(char),
}

/// Failure to read language data
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("read error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: no tab separator")]
    MissingTab { line: usize },
    #[error("line {line}: no space between bigram words")]
    MissingSpace { line: usize },
    #[error("line {line}: invalid count: {source}")]
    InvalidCount {
        line: usize,
        source: ParseFloatError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
