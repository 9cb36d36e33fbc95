use std::iter::FromIterator;

use indexmap::IndexMap;

use crate::tokenizer::tokenize;

/// Word occurrence counts gathered from one or more documents.
///
/// Counts only ever grow. Two bags are equal when they hold the same counts,
/// regardless of the order in which words were first seen.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BagOfWords {
    counts: IndexMap<String, u64>,
}

impl BagOfWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from the tokens of a single text.
    pub fn from_text(text: &str) -> Self {
        let mut bag = Self::new();
        bag.add_text(text);
        bag
    }

    /// Count every token of `text`.
    pub fn add_text(&mut self, text: &str) -> &mut Self {
        self.accumulate(tokenize(text))
    }

    /// Count every word in `tokens` once per occurrence.
    pub fn accumulate<I>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for token in tokens {
            self.add_occurrences(token.as_ref(), 1);
        }

        self
    }

    /// Add all counts of `other` to this bag.
    pub fn merge(&mut self, other: &BagOfWords) -> &mut Self {
        for (word, &count) in other.iter() {
            self.add_occurrences(word, count);
        }

        self
    }

    fn add_occurrences(&mut self, word: &str, count: u64) {
        // look up by &str first so known words don't allocate
        if let Some(existing) = self.counts.get_mut(word) {
            *existing += count;
            return;
        }

        self.counts.insert(word.to_owned(), count);
    }

    /// How many times `word` was seen, zero if never.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), count))
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Sum of all counts, unfiltered.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Sum of counts of the words seen at least `min_word_freq` times.
    pub fn total_word_count(&self, min_word_freq: u64) -> u64 {
        self.counts
            .values()
            .filter(|&&count| count >= min_word_freq)
            .sum()
    }
}

impl<S: AsRef<str>> FromIterator<S> for BagOfWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut bag = Self::new();
        bag.accumulate(iter);
        bag
    }
}

impl<S: AsRef<str>> Extend<S> for BagOfWords {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.accumulate(iter);
    }
}
