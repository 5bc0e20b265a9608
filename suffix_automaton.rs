//! Substring counting through a suffix automaton of the whole text.
//!
//! Every automaton state stands for a set of substrings that share their end
//! positions, so they all occur equally often. Counting those occurrences is
//! linear in the text; only the final expansion into a table visits each
//! distinct substring.

use std::collections::HashMap;

use crate::count::is_separator;
use crate::substring_types::FrequencyTable;

struct State {
    len: usize,
    link: Option<usize>,
    next: HashMap<char, usize>,
    /// char index just past the first occurrence of the state's longest string
    first_end: usize,
    occurrences: u64,
}

impl State {
    fn root() -> Self {
        State {
            len: 0,
            link: None,
            next: HashMap::new(),
            first_end: 0,
            occurrences: 0,
        }
    }
}

pub struct SuffixAutomaton {
    states: Vec<State>,
    last: usize,
}

impl SuffixAutomaton {
    pub fn build(chars: impl IntoIterator<Item = char>) -> Self {
        let mut automaton = SuffixAutomaton {
            states: vec![State::root()],
            last: 0,
        };
        for c in chars {
            automaton.extend(c);
        }
        automaton.propagate_occurrences();
        automaton
    }

    /// Number of states, root included.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    fn extend(&mut self, c: char) {
        let cur = self.states.len();
        let len = self.states[self.last].len + 1;
        self.states.push(State {
            len,
            link: None,
            next: HashMap::new(),
            first_end: len,
            occurrences: 1,
        });

        let mut p = Some(self.last);
        while let Some(s) = p {
            if self.states[s].next.contains_key(&c) {
                break;
            }
            self.states[s].next.insert(c, cur);
            p = self.states[s].link;
        }

        let link = match p {
            None => 0,
            Some(p) => {
                let q = self.states[p].next[&c];
                if self.states[p].len + 1 == self.states[q].len {
                    q
                } else {
                    let clone = self.states.len();
                    let split = State {
                        len: self.states[p].len + 1,
                        link: self.states[q].link,
                        next: self.states[q].next.clone(),
                        first_end: self.states[q].first_end,
                        occurrences: 0,
                    };
                    self.states.push(split);

                    let mut r = Some(p);
                    while let Some(s) = r {
                        if self.states[s].next.get(&c) != Some(&q) {
                            break;
                        }
                        self.states[s].next.insert(c, clone);
                        r = self.states[s].link;
                    }
                    self.states[q].link = Some(clone);
                    clone
                }
            }
        };
        self.states[cur].link = Some(link);
        self.last = cur;
    }

    /// Sum occurrence counts up the suffix links, longest states first.
    fn propagate_occurrences(&mut self) {
        let mut order: Vec<usize> = (1..self.states.len()).collect();
        order.sort_unstable_by_key(|&v| std::cmp::Reverse(self.states[v].len));
        for v in order {
            if let Some(link) = self.states[v].link {
                self.states[link].occurrences += self.states[v].occurrences;
            }
        }
    }
}

/// Same table as [`crate::count::count`], built from a suffix automaton of `text`.
/// Substrings that cross a word separator are left out.
pub fn count(text: &str, min_length: usize) -> FrequencyTable<'_> {
    let min_length = min_length.max(1);

    // byte offset of every char, and the length of the word run ending there
    let mut offsets = Vec::new();
    let mut run = Vec::new();
    let mut current = 0;
    for (i, c) in text.char_indices() {
        offsets.push(i);
        current = if is_separator(c) { 0 } else { current + 1 };
        run.push(current);
    }
    offsets.push(text.len());

    let automaton = SuffixAutomaton::build(text.chars());
    log::debug!("Suffix automaton has {} states", automaton.len());

    let mut table = FrequencyTable::new();
    for state in automaton.states.iter().skip(1) {
        let shortest = state.link.map_or(0, |link| automaton.states[link].len) + 1;
        let longest = state.len.min(run[state.first_end - 1]);
        let end = offsets[state.first_end];
        for length in shortest.max(min_length)..=longest {
            let start = offsets[state.first_end - length];
            table.record_many(&text[start..end], state.occurrences);
        }
    }
    table
}
