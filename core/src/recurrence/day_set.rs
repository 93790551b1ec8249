// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use jiff::civil::Date;

use crate::datetime::{day_key, format_day_key};

/// A set of calendar days, keyed `YYYYMMDD`.
///
/// Used for per-instance exceptions and completions. Keys are held sorted,
/// so iteration and export order are deterministic regardless of insertion
/// order; duplicate inserts collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySet {
    keys: BTreeSet<String>,
}

impl DaySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the day `(year, month, day)`.
    pub fn add(&mut self, year: i16, month: i8, day: i8) {
        self.keys.insert(format_day_key(year, month, day));
    }

    /// Inserts a preformatted `YYYYMMDD` key.
    pub fn add_key(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    /// Removes a day by key. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    /// Whether the set holds the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Whether the set holds the day of the given date.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.keys.contains(&day_key(date))
    }

    /// Iterates the keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Number of days in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Removes all days.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for DaySet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
