use std::collections::BTreeMap;

use crate::format::Formatter;

/// Per-character occurrence counts, kept in codepoint order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyCounter {
    counts: BTreeMap<char, usize>,
}

impl FrequencyCounter {
    pub fn new() -> FrequencyCounter {
        FrequencyCounter::default()
    }

    pub fn accumulate(&mut self, c: char) {
        *self.counts.entry(c).or_insert(0) += 1;
    }

    pub fn get(&self, c: char) -> usize {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    /// Number of distinct characters seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(character, count)` pairs sorted by codepoint.
    pub fn report(&self) -> Vec<(char, usize)> {
        self.counts.iter().map(|(&c, &n)| (c, n)).collect()
    }

    /// The report as display lines.
    pub fn lines(&self, formatter: &Formatter) -> Vec<String> {
        self.counts
            .iter()
            .map(|(&c, &n)| formatter.count_line(c, n))
            .collect()
    }
}

impl Extend<char> for FrequencyCounter {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for c in iter {
            self.accumulate(c);
        }
    }
}
