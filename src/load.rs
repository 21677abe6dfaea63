//! Reading language data from text files
//!
//! Unigram files hold one `word<TAB>count` entry per line, bigram files hold
//! `left right<TAB>count` entries. The word list is newline-delimited. Blank lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use smartstring::alias::String;

use crate::{HashMap, LanguageModel, LoadError, DEFAULT_LIMIT, DEFAULT_TOTAL};

/// Language model together with the word list it was built from
#[derive(Clone, Debug)]
pub struct Corpus {
    pub model: LanguageModel,
    pub words: Vec<String>,
}

impl Corpus {
    /// Load `unigrams.txt`, `bigrams.txt` and `words.txt` from `dir`
    ///
    /// The model uses the default corpus size and word length limit.
    pub fn from_dir(dir: &Path) -> Result<Self, LoadError> {
        let unigrams = unigrams(open(&dir.join("unigrams.txt"))?)?;
        let bigrams = bigrams(open(&dir.join("bigrams.txt"))?)?;
        let words = words(open(&dir.join("words.txt"))?)?;
        log::debug!(
            "loaded {} unigrams, {} bigrams and {} words from {:?}",
            unigrams.len(),
            bigrams.len(),
            words.len(),
            dir
        );

        Ok(Self {
            model: LanguageModel::new(unigrams, bigrams, DEFAULT_TOTAL, DEFAULT_LIMIT)?,
            words,
        })
    }
}

/// Read `word<TAB>count` lines
pub fn unigrams<R: BufRead>(reader: R) -> Result<HashMap<String, f64>, LoadError> {
    let mut unigrams = HashMap::default();
    for_each_entry(reader, |_, word, count| {
        unigrams.insert(word.into(), count);
        Ok(())
    })?;
    Ok(unigrams)
}

/// Read `left right<TAB>count` lines
pub fn bigrams<R: BufRead>(reader: R) -> Result<HashMap<(String, String), f64>, LoadError> {
    let mut bigrams = HashMap::default();
    for_each_entry(reader, |line, words, count| {
        let split = words.find(' ').ok_or(LoadError::MissingSpace { line })?;
        let (left, right) = (&words[..split], &words[split + 1..]);
        bigrams.insert((left.into(), right.into()), count);
        Ok(())
    })?;
    Ok(bigrams)
}

/// Read a newline-delimited word list
pub fn words<R: BufRead>(reader: R) -> Result<Vec<String>, LoadError> {
    let mut words = Vec::new();
    for ln in reader.lines() {
        let ln = ln?;
        let word = ln.trim();
        if !word.is_empty() {
            words.push(word.into());
        }
    }
    Ok(words)
}

fn for_each_entry<R, F>(mut reader: R, mut f: F) -> Result<(), LoadError>
where
    R: BufRead,
    F: FnMut(usize, &str, f64) -> Result<(), LoadError>,
{
    let mut ln = std::string::String::new();
    let mut i = 0;
    while reader.read_line(&mut ln)? > 0 {
        i += 1;
        let entry = ln.trim_end_matches(&['\n', '\r'][..]);
        if !entry.trim().is_empty() {
            let split = entry.find('\t').ok_or(LoadError::MissingTab { line: i })?;
            let count = f64::from_str(entry[split + 1..].trim())
                .map_err(|source| LoadError::InvalidCount { line: i, source })?;
            f(i, &entry[..split], count)?;
        }
        ln.clear();
    }
    Ok(())
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    match File::open(path) {
        Ok(f) => Ok(BufReader::new(f)),
        Err(source) => Err(LoadError::Open {
            path: path.to_owned(),
            source,
        }),
    }
}
