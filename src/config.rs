#[cfg(feature = "with-serde")]
use std::convert::TryFrom;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::{ConfigError, DEFAULT_CARRY, DEFAULT_WINDOW};

/// Chunking parameters for long inputs
///
/// Cleaned input is searched in windows of `window_size` characters. The last `carry_words`
/// words of each window are not emitted right away; they are prepended to the next window
/// and segmented again, since a window boundary may have cut through a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "with-serde",
    derive(Deserialize, Serialize),
    serde(try_from = "ConfigData")
)]
pub struct Config {
    pub window_size: usize,
    pub carry_words: usize,
}

impl Config {
    /// Fails for an empty window, or for more carried words than the window has characters
    ///
    /// Carried words are at most one word length limit each, so with this bound a searched
    /// window never exceeds `window_size + carry_words * limit` characters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }

        if self.carry_words > self.window_size {
            return Err(ConfigError::CarryExceedsWindow {
                carry_words: self.carry_words,
                window_size: self.window_size,
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW,
            carry_words: DEFAULT_CARRY,
        }
    }
}

/// Serialized form of [`Config`], checked before it is accepted
#[cfg(feature = "with-serde")]
#[derive(Deserialize)]
#[serde(default)]
struct ConfigData {
    window_size: usize,
    carry_words: usize,
}

#[cfg(feature = "with-serde")]
impl Default for ConfigData {
    fn default() -> Self {
        let Config {
            window_size,
            carry_words,
        } = Config::default();
        Self {
            window_size,
            carry_words,
        }
    }
}

#[cfg(feature = "with-serde")]
impl TryFrom<ConfigData> for Config {
    type Error = ConfigError;

    fn try_from(data: ConfigData) -> Result<Self, Self::Error> {
        let config = Self {
            window_size: data.window_size,
            carry_words: data.carry_words,
        };
        config.validate()?;
        Ok(config)
    }
}
