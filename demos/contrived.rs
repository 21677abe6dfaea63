use std::collections::HashMap;

use wordsegment::{Search, Segmenter};

fn main() {
    let mut unigrams = HashMap::default();

    unigrams.insert("choose".into(), 80_000.0);
    unigrams.insert("chooses".into(), 7_000.0);

    unigrams.insert("spain".into(), 20_000.0);
    unigrams.insert("pain".into(), 90_000.0);

    let mut bigrams = HashMap::default();

    bigrams.insert(("choose".into(), "spain".into()), 7.0);
    bigrams.insert(("chooses".into(), "pain".into()), 0.0);

    let segmenter = match Segmenter::from_maps(unigrams, bigrams) {
        Ok(segmenter) => segmenter,
        Err(e) => {
            eprintln!("invalid language data: {}", e);
            std::process::exit(1);
        }
    };

    let mut search = Search::default();
    let words = segmenter.segment("choose spain", &mut search);
    println!("{:?}", words.collect::<Vec<&str>>());
}
