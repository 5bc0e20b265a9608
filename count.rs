use std::iter;
use clap::ValueEnum;
use rayon::prelude::*;

use crate::substring_types::FrequencyTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Algorithm {
    /// List every substring of every word
    #[default]
    Enumerate,
    /// Count occurrences through a suffix automaton of the text
    SuffixAutomaton,
}

/// Characters that end a word: Unicode white space plus the ASCII
/// information separators U+001C..U+001F.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Words of the text: maximal runs of non-separator characters, no normalization.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|word| !word.is_empty())
}

/// Every contiguous substring of `word` with at least `min_length` characters,
/// shortest first, left to right. Repeats are yielded once per offset.
pub fn substrings(word: &str, min_length: usize) -> impl Iterator<Item = &str> {
    // byte offset of every char boundary, including the end
    let bounds: Vec<usize> = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(iter::once(word.len()))
        .collect();
    let chars = bounds.len() - 1;
    let min_length = min_length.max(1);

    (min_length..=chars).flat_map(move |length| {
        let bounds = bounds.clone();
        (0..=chars - length).map(move |offset| &word[bounds[offset]..bounds[offset + length]])
    })
}

/// Count every qualifying substring of every word into `table`.
pub fn accumulate<'a>(mut table: FrequencyTable<'a>, text: &'a str, min_length: usize) -> FrequencyTable<'a> {
    for word in words(text) {
        for substring in substrings(word, min_length) {
            table.record(substring);
        }
    }
    table
}

pub fn count(text: &str, min_length: usize) -> FrequencyTable<'_> {
    accumulate(FrequencyTable::new(), text, min_length)
}

/// Same result as [`count`], with words spread over the rayon pool.
pub fn count_parallel(text: &str, min_length: usize) -> FrequencyTable<'_> {
    let words: Vec<&str> = words(text).collect();
    words
        .into_par_iter()
        .fold(FrequencyTable::new, |mut table, word| {
            for substring in substrings(word, min_length) {
                table.record(substring);
            }
            table
        })
        .reduce(FrequencyTable::new, FrequencyTable::merge)
}
