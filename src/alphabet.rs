use std::convert::TryFrom;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Set of characters retained by the cleaner
///
/// Only ASCII characters can be part of an alphabet, so that cleaned text can be split at any
/// byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "with-serde",
    derive(Deserialize, Serialize),
    serde(try_from = "Vec<char>", into = "Vec<char>")
)]
pub struct Alphabet(u128);

impl Alphabet {
    pub fn new<I: IntoIterator<Item = char>>(chars: I) -> Result<Self, ConfigError> {
        let mut bits = 0u128;
        for c in chars {
            if !c.is_ascii() {
                return Err(ConfigError::NonAsciiAlphabet(c));
            }
            bits |= 1 << c as u32;
        }
        Ok(Self(bits))
    }

    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.0 & (1 << c as u32) != 0
    }

    /// Strip `text` down to the characters in the alphabet
    ///
    /// Matching is exact: uppercase letters are dropped rather than folded unless the alphabet
    /// contains them.
    pub fn clean(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.clean_into(text, &mut out);
        out
    }

    /// Append the cleaned version of `text` to `out`
    pub fn clean_into(&self, text: &str, out: &mut String) {
        out.extend(text.chars().filter(|&c| self.contains(c)));
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (0u8..128)
            .filter(move |&b| self.0 & (1 << b) != 0)
            .map(char::from)
    }
}

impl Default for Alphabet {
    /// Lowercase ASCII letters and digits
    fn default() -> Self {
        let bits = (b'a'..=b'z')
            .chain(b'0'..=b'9')
            .fold(0u128, |bits, b| bits | 1 << b);
        Self(bits)
    }
}

impl TryFrom<Vec<char>> for Alphabet {
    type Error = ConfigError;

    fn try_from(chars: Vec<char>) -> Result<Self, Self::Error> {
        Self::new(chars)
    }
}

impl From<Alphabet> for Vec<char> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.chars().collect()
    }
}
