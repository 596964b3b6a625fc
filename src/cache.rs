//! Sorted string cache for blacklisted domains.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Concurrency-safe collection of strings with binary-search membership.
///
/// Writers append without keeping order; [`SortedStringSet::sort`] must run
/// once all inserts are done before [`SortedStringSet::contains`] gives
/// meaningful answers. Duplicates are kept.
///
/// Every operation takes the same exclusive lock for its whole duration.
pub struct SortedStringSet {
    data: Mutex<Vec<String>>,
}

impl SortedStringSet {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(Vec::new()),
        }
    }

    // A panicking writer can only leave a pushed or unpushed string behind,
    // so the data is still usable after poisoning.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a single value. Does not keep the set sorted.
    pub fn add(&self, value: impl Into<String>) {
        self.lock().push(value.into());
    }

    /// Add a batch of values under one lock acquisition.
    pub fn append<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.lock().extend(values.into_iter().map(Into::into));
    }

    /// Remove one occurrence of `value` from a sorted set.
    ///
    /// Returns `false` and leaves the set untouched when the binary search
    /// does not land on an exact match.
    pub fn remove(&self, value: &str) -> bool {
        let mut data = self.lock();
        let i = data.partition_point(|s| s.as_str() < value);

        if data.get(i).is_some_and(|s| s == value) {
            data.remove(i);
            true
        } else {
            false
        }
    }

    /// Sort ascending. No-op when already sorted.
    pub fn sort(&self) {
        let mut data = self.lock();
        if !data.is_sorted() {
            data.sort_unstable();
        }
    }

    /// Check whether a sorted set contains `value`.
    ///
    /// Only the neighbours of the binary-search landing point are compared,
    /// and only for exact equality.
    pub fn contains(&self, value: &str) -> bool {
        let data = self.lock();
        if data.is_empty() {
            return false;
        }

        let i = data.partition_point(|s| s.as_str() < value);
        let start = i.saturating_sub(1);
        let end = (i + 1).min(data.len());

        data[start..end].iter().any(|s| s == value)
    }

    /// Returns the value at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<String> {
        self.lock().get(index).cloned()
    }

    /// Returns the number of stored values, duplicates included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for SortedStringSet {
    fn default() -> Self {
        Self::new()
    }
}
