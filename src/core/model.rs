//! Concordance model
//!
//! The store maps each normalized word to the line numbers it was seen on.
//! Ordering is applied only when a sorted view is requested.

use serde::Serialize;
use std::collections::HashMap;

use crate::core::error::{ConcordError, StoreError};

/// One distinct word and every line it occurs on, borrowed from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordEntry<'a> {
    /// Case-folded token text
    pub word: &'a str,

    /// 1-based line numbers in encounter order, repeats included
    pub lines: &'a [usize],
}

impl WordEntry<'_> {
    /// Number of recorded occurrences
    pub fn occurrences(&self) -> usize {
        self.lines.len()
    }
}

/// Anything ingestion can record `(word, line)` pairs into
pub trait OccurrenceSink {
    fn add_occurrence(&mut self, word: &str, line: usize) -> Result<(), StoreError>;
}

/// Word -> line-number mapping built during ingestion
#[derive(Debug, Default)]
pub struct ConcordanceStore {
    entries: HashMap<String, Vec<usize>>,
}

impl ConcordanceStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with room for `capacity` distinct words.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConcordError> {
        let mut entries: HashMap<String, Vec<usize>> = HashMap::new();
        entries
            .try_reserve(capacity)
            .map_err(ConcordError::Resource)?;
        Ok(Self { entries })
    }

    /// Record that `word` occurs on `line`.
    ///
    /// `word` must already be normalized. The table, the key and the line
    /// list all grow through `try_reserve`, so exhaustion surfaces as
    /// [`StoreError::Allocation`].
    pub fn add_occurrence(&mut self, word: &str, line: usize) -> Result<(), StoreError> {
        if word.is_empty() {
            return Err(StoreError::EmptyWord);
        }
        if line == 0 {
            return Err(StoreError::InvalidLineNumber(word.to_string()));
        }

        let alloc_err = |source| StoreError::Allocation {
            word: word.to_string(),
            source,
        };

        if !self.entries.contains_key(word) {
            self.entries.try_reserve(1).map_err(alloc_err)?;
            let mut key = String::new();
            key.try_reserve_exact(word.len()).map_err(alloc_err)?;
            key.push_str(word);
            self.entries.insert(key, Vec::new());
        }

        // Inserted above when absent
        if let Some(lines) = self.entries.get_mut(word) {
            lines.try_reserve(1).map_err(alloc_err)?;
            lines.push(line);
        }
        Ok(())
    }

    /// Unordered view of every entry
    pub fn entries(&self) -> impl Iterator<Item = WordEntry<'_>> {
        self.entries
            .iter()
            .map(|(word, lines)| WordEntry { word, lines })
    }

    /// Entries ordered by ascending byte order of the word.
    ///
    /// The store itself is left untouched, so repeated calls agree.
    pub fn sorted_entries(&self) -> Vec<WordEntry<'_>> {
        let mut sorted: Vec<WordEntry<'_>> = self.entries().collect();
        sorted.sort_by(|a, b| a.word.cmp(b.word));
        sorted
    }

    #[cfg(test)]
    pub fn get(&self, word: &str) -> Option<WordEntry<'_>> {
        self.entries
            .get_key_value(word)
            .map(|(word, lines)| WordEntry { word, lines })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of recorded occurrences across all words
    pub fn total_occurrences(&self) -> usize {
        self.entries().map(|entry| entry.occurrences()).sum()
    }

    /// Word with the most occurrences; ties go to the alphabetically first
    pub fn most_frequent(&self) -> Option<WordEntry<'_>> {
        self.sorted_entries()
            .into_iter()
            .min_by_key(|entry| std::cmp::Reverse(entry.occurrences()))
    }
}

impl OccurrenceSink for ConcordanceStore {
    fn add_occurrence(&mut self, word: &str, line: usize) -> Result<(), StoreError> {
        ConcordanceStore::add_occurrence(self, word, line)
    }
}
