#[cfg(feature = "with-serde")]
use std::convert::TryFrom;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};
use smartstring::alias::String;

use crate::{ConfigError, HashMap, DEFAULT_LIMIT, DEFAULT_TOTAL};

/// Word frequency data used to calculate word probabilities
///
/// Counts are raw corpus occurrence counts. They are normalized against `total`, a fixed
/// corpus size, rather than against the sum of the counts.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "with-serde",
    derive(Deserialize, Serialize),
    serde(try_from = "ModelData")
)]
pub struct LanguageModel {
    unigrams: HashMap<String, f64>,
    bigrams: HashMap<(String, String), f64>,
    total: f64,
    limit: usize,
}

impl LanguageModel {
    /// Create a `LanguageModel` from the given hashmaps (using ahash)
    ///
    /// Fails if `total` is not positive, if any count is negative (or not a number), or if
    /// `limit` is zero. `limit` is the maximum length of a single word.
    pub fn new(
        unigrams: HashMap<String, f64>,
        bigrams: HashMap<(String, String), f64>,
        total: f64,
        limit: usize,
    ) -> Result<Self, ConfigError> {
        let model = Self {
            unigrams,
            bigrams,
            total,
            limit,
        };
        model.validate()?;
        Ok(model)
    }

    /// Create a `LanguageModel` from the given iterators
    ///
    /// Note: the `String` types used in this API are defined in the `smartstring` crate. Any
    /// `&str` or `String` can be converted into the `String` used here by calling `into()` on it.
    pub fn from_iters<U, B>(unigrams: U, bigrams: B) -> Result<Self, ConfigError>
    where
        U: Iterator<Item = (String, f64)>,
        B: Iterator<Item = ((String, String), f64)>,
    {
        Self::new(
            unigrams.collect(),
            bigrams.collect(),
            DEFAULT_TOTAL,
            DEFAULT_LIMIT,
        )
    }

    /// Check the model invariants
    ///
    /// Every constructor (and the deserializer) runs this, so any `LanguageModel` passes it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.total.is_finite() && self.total > 0.0) {
            return Err(ConfigError::InvalidTotal(self.total));
        }

        if self.limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }

        if let Some((token, &count)) = self.unigrams.iter().find(|(_, c)| !valid_count(**c)) {
            return Err(ConfigError::InvalidUnigram {
                token: token.to_string(),
                count,
            });
        }

        if let Some(((left, right), &count)) =
            self.bigrams.iter().find(|(_, c)| !valid_count(**c))
        {
            return Err(ConfigError::InvalidBigram {
                left: left.to_string(),
                right: right.to_string(),
                count,
            });
        }

        Ok(())
    }

    /// Probability of `word` following `previous`, in `(0, 1]` for sane counts
    ///
    /// `None` (or an empty `previous`) scores `word` on its own. Known bigrams are scored as
    /// the conditional probability of the word given the previous word; everything else
    /// falls back to the unigram probability, and unknown words get a smoothed estimate.
    pub fn score(&self, word: &str, previous: Option<&str>) -> f64 {
        if let Some(prev) = previous.filter(|p| !p.is_empty()) {
            if let Some(bi) = self.bigram(prev, word) {
                if let Some(uni) = self.unigram(prev) {
                    // Conditional probability of the word given the previous
                    // word. The technical name is "stupid backoff" and it's
                    // not a probability distribution but it works well in practice.
                    return (bi / self.total) / (uni / self.total);
                }
            }
        }

        match self.unigram(word) {
            // Probability of the given word
            Some(p) => p / self.total,
            // Penalize words not found in the unigrams according
            // to their length, a crucial heuristic.
            None => {
                let p = 10.0 / (self.total * 10.0f64.powi(word.len() as i32));
                p.max(f64::MIN_POSITIVE)
            }
        }
    }

    /// Zero counts are treated as unattested, so that no word scores zero
    fn unigram(&self, word: &str) -> Option<f64> {
        self.unigrams.get(word).copied().filter(|&c| c > 0.0)
    }

    fn bigram(&self, left: &str, right: &str) -> Option<f64> {
        self.bigrams
            .get(&(left.into(), right.into()))
            .copied()
            .filter(|&c| c > 0.0)
    }

    pub fn unigrams(&self) -> &HashMap<String, f64> {
        &self.unigrams
    }

    pub fn bigrams(&self) -> &HashMap<(String, String), f64> {
        &self.bigrams
    }

    /// Normalizing constant (corpus size)
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Maximum length of a candidate word
    pub fn limit(&self) -> usize {
        self.limit
    }
}

fn valid_count(count: f64) -> bool {
    count.is_finite() && count >= 0.0
}

/// Serialized form of [`LanguageModel`], checked before it is accepted
#[cfg(feature = "with-serde")]
#[derive(Deserialize)]
struct ModelData {
    unigrams: HashMap<String, f64>,
    bigrams: HashMap<(String, String), f64>,
    total: f64,
    limit: usize,
}

#[cfg(feature = "with-serde")]
impl TryFrom<ModelData> for LanguageModel {
    type Error = ConfigError;

    fn try_from(data: ModelData) -> Result<Self, Self::Error> {
        Self::new(data.unigrams, data.bigrams, data.total, data.limit)
    }
}
