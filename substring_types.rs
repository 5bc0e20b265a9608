use std::collections::HashMap;
use serde::Serialize;

/// Occurrence count per distinct substring, plus the running total of all
/// occurrences. Keys borrow from the decoded input text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrequencyTable<'a> {
    counts: HashMap<&'a str, u64>,
    total: u64,
}

impl<'a> FrequencyTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `substring`.
    pub fn record(&mut self, substring: &'a str) {
        self.record_many(substring, 1);
    }

    /// Count `occurrences` occurrences of `substring` at once.
    pub fn record_many(&mut self, substring: &'a str, occurrences: u64) {
        if occurrences == 0 {
            return;
        }
        *self.counts.entry(substring).or_insert(0) += occurrences;
        self.total += occurrences;
    }

    /// Fold another table into this one. Used to combine per-thread tables.
    pub fn merge(mut self, other: FrequencyTable<'a>) -> Self {
        if self.counts.len() < other.counts.len() {
            return other.merge(self);
        }
        for (substring, count) in other.counts {
            *self.counts.entry(substring).or_insert(0) += count;
        }
        self.total += other.total;
        self
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct substrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[cfg(test)]
    pub fn count_of(&self, substring: &str) -> u64 {
        self.counts.get(substring).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, u64)> + '_ {
        self.counts.iter().map(|(s, c)| (*s, *c))
    }
}

/// One line of the ranked report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry<'a> {
    pub rank: usize,
    pub count: u64,
    pub percentage: f64,
    pub substring: &'a str,
}

/// Ranked top of a frequency table, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<'a> {
    pub total: u64,
    pub entries: Vec<ResultEntry<'a>>,
}
