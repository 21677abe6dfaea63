use std::path::PathBuf;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use smartstring::alias::String as SmartString;

use wordsegment::{Alphabet, Config, Corpus, Search, Segmenter};

macro_rules! assert_segments {
    ($list:expr) => {{
        let mut search = Search::default();
        let words = SEGMENTER
            .segment(&$list.join(""), &mut search)
            .collect::<Vec<_>>();
        assert_eq!(words, $list);
    }};
}

fn segment(segmenter: &Segmenter, text: &str) -> Vec<String> {
    let mut search = Search::default();
    segmenter
        .segment(text, &mut search)
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_segment_0() {
    assert_segments!(&["choose", "spain"]);
}

#[test]
fn test_segment_1() {
    assert_segments!(&["this", "is", "a", "test"]);
}

#[test]
fn test_segment_2() {
    assert_segments!(&[
        "when",
        "in",
        "the",
        "course",
        "of",
        "human",
        "events",
        "it",
        "becomes",
        "necessary",
    ]);
}

#[test]
fn test_segment_3() {
    assert_segments!(&["who", "represents"]);
}

#[test]
fn test_segment_4() {
    assert_segments!(&["experts", "exchange"]);
}

#[test]
fn test_segment_5() {
    assert_segments!(&["speed", "of", "art"]);
}

#[test]
fn test_segment_6() {
    assert_segments!(&["now", "is", "the", "time", "for", "all", "good"]);
}

#[test]
fn test_segment_7() {
    assert_segments!(&["it", "is", "a", "truth", "universally", "acknowledged"]);
}

#[test]
fn test_segment_8() {
    assert_segments!(&[
        "it", "was", "a", "bright", "cold", "day", "in", "april", "and", "the", "clocks", "were",
        "striking", "thirteen",
    ]);
}

#[test]
fn test_segment_9() {
    assert_segments!(&["it", "was", "the", "best", "of", "times"]);
}

#[test]
fn test_clean() {
    assert_eq!(SEGMENTER.clean("Can't buy me love!"), "cantbuymelove");
    assert_eq!(
        segment(&SEGMENTER, "Can't buy me love!"),
        ["cant", "buy", "me", "love"]
    );
}

#[test]
fn test_divide() {
    let pairs = SEGMENTER.divide("thisisatest").collect::<Vec<_>>();
    assert_eq!(pairs.len(), 11);
    assert_eq!(pairs.first(), Some(&("t", "hisisatest")));
    assert_eq!(pairs.last(), Some(&("thisisatest", "")));
}

#[test]
fn test_corpus() {
    assert!(CORPUS.model.unigrams().contains_key("test"));
    assert!(CORPUS
        .model
        .bigrams()
        .contains_key(&(SmartString::from("in"), SmartString::from("the"))));
    assert_eq!(CORPUS.words.first().map(|w| w.as_str()), Some("a"));
    assert_eq!(CORPUS.words.last().map(|w| w.as_str()), Some("you"));
}

#[test]
fn empty() {
    assert!(segment(&SEGMENTER, "").is_empty());
    assert!(segment(&SEGMENTER, "'!? ").is_empty());
}

/// Long enough to need several windows at the default window size
fn long_text() -> Vec<&'static str> {
    let mut words = Vec::new();
    for _ in 0..12 {
        words.extend(&["it", "was", "the", "best", "of", "times"]);
    }
    for _ in 0..20 {
        words.extend(&["this", "is", "a", "test"]);
    }
    for _ in 0..3 {
        words.extend(&[
            "when",
            "in",
            "the",
            "course",
            "of",
            "human",
            "events",
            "it",
            "becomes",
            "necessary",
        ]);
    }
    words
}

#[test]
fn long_input() {
    let words = long_text();
    let text = words.concat();
    assert!(text.len() > 2 * wordsegment::DEFAULT_WINDOW);
    assert_eq!(segment(&SEGMENTER, &text), words);
}

#[test]
fn window_sizes() {
    let words = long_text();
    let text = words.concat();
    for &window_size in &[3, 7, 40, 250] {
        let config = Config {
            window_size,
            carry_words: window_size.min(wordsegment::DEFAULT_CARRY),
        };
        let segmenter = Segmenter::new(CORPUS.model.clone(), Alphabet::default(), config).unwrap();
        assert_eq!(segment(&segmenter, &text), words, "window size {}", window_size);
    }
}

#[test]
fn short_trailing_window() {
    // The last window holds only "n", which is re-segmented along with the carried words
    let config = Config {
        window_size: 10,
        carry_words: 5,
    };
    let segmenter = Segmenter::new(CORPUS.model.clone(), Alphabet::default(), config).unwrap();
    assert_eq!(segment(&segmenter, "choosespain"), ["choose", "spain"]);
}

#[test]
fn concurrent() {
    let texts = sample_cases()
        .iter()
        .map(|words| words.concat())
        .collect::<Vec<_>>();

    let expected = texts
        .iter()
        .map(|text| segment(&SEGMENTER, text))
        .collect::<Vec<_>>();

    let parallel = texts
        .par_iter()
        .map_init(Search::default, |search, text| {
            SEGMENTER
                .segment(text, search)
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    assert_eq!(parallel, expected);
}

fn sample_cases() -> Vec<Vec<&'static str>> {
    let mut cases = vec![
        vec!["choose", "spain"],
        vec!["this", "is", "a", "test"],
        vec!["who", "represents"],
        vec!["experts", "exchange"],
        vec!["speed", "of", "art"],
    ];
    cases.push(long_text());
    cases
}

static CORPUS: Lazy<Corpus> = Lazy::new(|| {
    Corpus::from_dir(&PathBuf::from(format!(
        "{}/tests/data",
        env!("CARGO_MANIFEST_DIR")
    )))
    .unwrap()
});

static SEGMENTER: Lazy<Segmenter> = Lazy::new(|| {
    Segmenter::new(CORPUS.model.clone(), Alphabet::default(), Config::default()).unwrap()
});
