#[cfg(feature = "with-serde")]
use std::convert::TryFrom;
use std::mem;
use std::ops::Range;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};
use smartstring::alias::String;

mod alphabet;
mod config;
mod error;
pub mod load;
mod model;
#[cfg(feature = "test-cases")]
pub mod test_cases;
#[cfg(feature = "__test_data")]
pub mod test_data;

pub use alphabet::Alphabet;
pub use config::Config;
pub use error::{ConfigError, LoadError};
pub use load::Corpus;
pub use model::LanguageModel;

/// Segments unspaced text into its most probable sequence of words
///
/// A `Segmenter` is immutable once built, so it can be shared between threads. Each thread
/// needs its own [`Search`].
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "with-serde",
    derive(Deserialize, Serialize),
    serde(try_from = "SegmenterData")
)]
pub struct Segmenter {
    model: LanguageModel,
    alphabet: Alphabet,
    config: Config,
}

impl Segmenter {
    pub fn new(
        model: LanguageModel,
        alphabet: Alphabet,
        config: Config,
    ) -> Result<Self, ConfigError> {
        model.validate()?;
        config.validate()?;
        log::debug!(
            "segmenter ready: {} unigrams, {} bigrams, limit {}, window {}",
            model.unigrams().len(),
            model.bigrams().len(),
            model.limit(),
            config.window_size,
        );

        Ok(Self {
            model,
            alphabet,
            config,
        })
    }

    /// Create `Segmenter` from the given hashmaps (using ahash)
    ///
    /// Uses the default corpus size, word length limit, alphabet and chunking configuration.
    ///
    /// Note: the `String` types used in this API are defined in the `smartstring` crate. Any
    /// `&str` or `String` can be converted into the `String` used here by calling `into()` on it.
    /// The `HashMap` type here refers to `std::collections::HashMap` parametrized with the
    /// `ahash::RandomState`.
    pub fn from_maps(
        unigrams: HashMap<String, f64>,
        bigrams: HashMap<(String, String), f64>,
    ) -> Result<Self, ConfigError> {
        let model = LanguageModel::new(unigrams, bigrams, DEFAULT_TOTAL, DEFAULT_LIMIT)?;
        Self::new(model, Alphabet::default(), Config::default())
    }

    /// Segment the text in `input`
    ///
    /// Characters outside the alphabet are dropped before segmentation. The `search` parameter
    /// contains caches that are used during segmentation; passing it in allows the callers to
    /// reuse the cache allocations. Joining the words yields the cleaned input.
    pub fn segment<'a>(
        &self,
        input: &str,
        search: &'a mut Search,
    ) -> impl Iterator<Item = &'a str> + ExactSizeIterator {
        SegmentState::new(input, self, search).run();
        search.result.iter().map(|v| v.as_str())
    }

    /// Strip `text` down to the characters of the alphabet
    pub fn clean(&self, text: &str) -> std::string::String {
        self.alphabet.clean(text)
    }

    /// Probability of `word` following `previous`, see [`LanguageModel::score()`]
    pub fn score(&self, word: &str, previous: Option<&str>) -> f64 {
        self.model.score(word, previous)
    }

    /// Candidate splits of `text`, with prefixes no longer than the model's word limit
    pub fn divide<'t>(&self, text: &'t str) -> Divide<'t> {
        divide(text, self.model.limit())
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Serialized form of [`Segmenter`], checked before it is accepted
#[cfg(feature = "with-serde")]
#[derive(Deserialize)]
struct SegmenterData {
    model: LanguageModel,
    alphabet: Alphabet,
    config: Config,
}

#[cfg(feature = "with-serde")]
impl TryFrom<SegmenterData> for Segmenter {
    type Error = ConfigError;

    fn try_from(data: SegmenterData) -> Result<Self, Self::Error> {
        Self::new(data.model, data.alphabet, data.config)
    }
}

struct SegmentState<'a> {
    data: &'a Segmenter,
    search: &'a mut Search,
}

impl<'a> SegmentState<'a> {
    fn new(input: &str, data: &'a Segmenter, search: &'a mut Search) -> Self {
        search.clear();
        data.alphabet.clean_into(input, &mut search.input);
        Self { data, search }
    }

    /// Appends the best segmentation of the cleaned input to the result, one window at a time
    fn run(mut self) {
        let text = mem::take(&mut self.search.input);
        // Holds the words carried over from the previous window, then the current window
        let mut window = mem::take(&mut self.search.window);
        let Config {
            window_size,
            carry_words,
        } = self.data.config;

        let mut start = 0;
        while start < text.len() {
            let end = text.len().min(start + window_size);
            let carried = window.len();
            window.push_str(&text[start..end]);
            self.solve(&window);

            let found = self.search.best[0].len();
            let emit = match found > carry_words {
                true => found - carry_words,
                // Searching the same text again would give the same words
                false if end == text.len() => found,
                false => 0,
            };

            let boundary = self.emit(&window, emit);
            window.replace_range(..boundary, "");
            log::trace!(
                "window {}..{} (+{} carried): {} words, {} emitted",
                start,
                end,
                carried,
                found,
                emit
            );
            start = end;
        }

        if !window.is_empty() {
            self.solve(&window);
            let found = self.search.best[0].len();
            self.emit(&window, found);
            window.clear();
        }

        self.search.input = text;
        self.search.window = window;
    }

    /// Pushes the first `n` words of the last solution for `text`, returning the end offset
    fn emit(&mut self, text: &str, n: usize) -> usize {
        let mut start = 0;
        for &split in self.search.best[0].iter().take(n) {
            self.search.result.push(text[start..split].into());
            start = split;
        }
        start
    }

    /// Finds the best segmentation of `text`, leaving its word end offsets in `best[0]`
    fn solve(&mut self, text: &str) -> f64 {
        self.search.memo.clear();
        self.search.split_cache.clear();
        self.search(text, 0, 0, None)
    }

    /// Score the best segmentation of `text[start..]`
    ///
    /// `previous` is the start offset of the word ending at `start`, or `None` at the start of
    /// the window.
    fn search(&mut self, text: &str, level: usize, start: usize, previous: Option<usize>) -> f64 {
        if self.search.best.len() <= level {
            self.search.best.resize_with(level + 1, Vec::new);
        }

        if start == text.len() {
            self.search.best[level].clear();
            return 0.0;
        }

        let prev_word = match previous {
            Some(prev) => &text[prev..start],
            None => SENTENCE_START,
        };

        let mut best = None;
        for (prefix, _) in divide(&text[start..], self.data.model.limit()) {
            let split = start + prefix.len();
            let prefix_score = self.data.model.score(prefix, Some(prev_word)).log10();

            // The word before `text[split..]` is `text[start..split]`
            let key = (start, split);
            let (suffix_score, suffix_splits) = match self.search.memo.get(&key) {
                Some((score, splits)) => (*score, splits.clone()),
                None => {
                    let suffix_score = self.search(text, level + 1, split, Some(start));
                    let Search {
                        memo,
                        split_cache,
                        best: levels,
                        ..
                    } = &mut *self.search;

                    let cached = split_cache.len()..split_cache.len() + levels[level + 1].len();
                    split_cache.extend_from_slice(&levels[level + 1]);
                    memo.insert(key, (suffix_score, cached.clone()));
                    (suffix_score, cached)
                }
            };

            // Strictly greater: on ties, the shorter prefix wins
            let score = prefix_score + suffix_score;
            if best.map_or(true, |best| score > best) {
                best = Some(score);
                let Search {
                    split_cache,
                    best: levels,
                    ..
                } = &mut *self.search;

                let splits = &mut levels[level];
                splits.clear();
                splits.push(split);
                splits.extend_from_slice(&split_cache[suffix_splits]);
            }
        }

        match best {
            Some(score) => score,
            None => {
                self.search.best[level].clear();
                0.0
            }
        }
    }
}

/// Reusable buffers for [`Segmenter::segment()`]
///
/// Everything in here is reset at the start of each segmentation, including the memo cache.
#[derive(Clone, Default)]
pub struct Search {
    memo: HashMap<MemoKey, (f64, Range<usize>)>,
    split_cache: Vec<usize>,
    best: Vec<Vec<usize>>,
    input: std::string::String,
    window: std::string::String,
    result: Vec<String>,
}

impl Search {
    fn clear(&mut self) {
        self.memo.clear();
        self.split_cache.clear();
        self.input.clear();
        self.window.clear();
        self.result.clear();
    }
}

/// Start of the previous word and start of the residual text, both within the window
type MemoKey = (usize, usize);

/// Iterate over the ways to split off the first word of `text`
///
/// Yields `(prefix, suffix)` pairs for prefix lengths from 1 up to `limit` characters (or the
/// length of `text`), shortest prefix first. Empty `text` yields nothing.
pub fn divide(text: &str, limit: usize) -> Divide<'_> {
    Divide {
        text,
        pos: 0,
        remaining: text.chars().take(limit).count(),
    }
}

/// Iterator returned by [`divide()`]
#[derive(Clone, Debug)]
pub struct Divide<'a> {
    text: &'a str,
    pos: usize,
    remaining: usize,
}

impl<'a> Iterator for Divide<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let next = self.text[self.pos..].chars().next()?;
        self.pos += next.len_utf8();
        self.remaining -= 1;
        Some(self.text.split_at(self.pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Divide<'_> {}

type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

pub const DEFAULT_LIMIT: usize = 24;
pub const DEFAULT_TOTAL: f64 = 1_024_908_267_229.0;
pub const DEFAULT_WINDOW: usize = 250;
pub const DEFAULT_CARRY: usize = 5;
/// Previous word used for the first word of every window
pub const SENTENCE_START: &str = "<s>";
