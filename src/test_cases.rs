use crate::{Search, Segmenter};

/// Run a segmenter against the built-in test cases
pub fn run(segmenter: &Segmenter) {
    let mut search = Search::default();
    assert_eq!(segmenter.segment("", &mut search).len(), 0);

    let mut success = true;
    for test in TEST_CASES.iter().copied() {
        success &= assert_segments(test, &mut search, segmenter);
    }

    assert!(success);
}

pub fn assert_segments(s: &[&str], search: &mut Search, segmenter: &Segmenter) -> bool {
    let cmp = segmenter
        .segment(&s.join(""), search)
        .collect::<Vec<_>>();
    let success = cmp == s;
    if !success {
        println!("expected: {:?}", s);
        println!("actual:   {:?}\n", cmp);
    }
    success
}

/// Built-in test cases
///
/// These are exposed so that you can test with different data sources.
pub const TEST_CASES: &[&[&str]] = &[
    &["choose", "spain"],
    &["this", "is", "a", "test"],
    &["who", "represents"],
    &["experts", "exchange"],
    &["speed", "of", "art"],
    &["cant", "buy", "me", "love"],
    &["now", "is", "the", "time", "for", "all", "good"],
    &["it", "is", "a", "truth", "universally", "acknowledged"],
    &[
        "it", "was", "a", "bright", "cold", "day", "in", "april", "and", "the", "clocks", "were",
        "striking", "thirteen",
    ],
    &["it", "was", "the", "best", "of", "times"],
    &[
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
    ],
];
