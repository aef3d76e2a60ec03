use once_cell::sync::Lazy;
use regex::Regex;

use crate::taxon_label::run::{Run, RunList, RunStyle};

// "type" を含む単語 (holotype, Paratypes, ...) 全体を太字にする
pub fn annotate_type_words(text: &str) -> Vec<Run> {
    static REGEX_TYPE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\w*type\w*").unwrap());

    let mut runs = RunList::new();

    let mut cursor = 0;
    for m in REGEX_TYPE_WORD.find_iter(text) {
        runs.push(&text[cursor..m.start()], RunStyle::Plain);
        runs.push(m.as_str(), RunStyle::Bold);
        cursor = m.end();
    }
    runs.push(&text[cursor..], RunStyle::Plain);

    runs.into_runs()
}

pub fn is_type_word(word: &str) -> bool {
    static REGEX_CONTAINS_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)type").unwrap());

    REGEX_CONTAINS_TYPE.is_match(word)
}
