//! Query Filtering and Ordering
//!
//! Narrows a set of items by caller-supplied `field=value` pairs (usually the
//! request query string) and orders the survivors newest-first.
//!
//! ## Matching
//! - Text fields match when they contain the filter value, ignoring case.
//! - Any other present field matches when its string form equals the value.
//! - A field the item does not have never matches.
//!
//! Entries with an empty key or an empty value are ignored.

use super::types::{FieldValue, Item};
use std::collections::HashMap;

pub type Filters = HashMap<String, String>;

pub fn matches_filter(item: &Item, key: &str, value: &str) -> bool {
    if key.is_empty() || value.is_empty() {
        return true;
    }

    match item.field(key) {
        Some(FieldValue::Text(text)) => text.to_lowercase().contains(&value.to_lowercase()),
        Some(other) => other.render() == value,
        None => false,
    }
}

pub fn matches_all(item: &Item, filters: &Filters) -> bool {
    filters
        .iter()
        .all(|(key, value)| matches_filter(item, key, value))
}

/// Keeps the entries that pass every filter and sorts them by `updatedAt`,
/// most recent first.
///
/// Each entry carries the store's write sequence number, which breaks ties
/// between equal timestamps (latest write first).
pub fn filter_and_sort<'a, I>(entries: I, filters: &Filters) -> Vec<Item>
where
    I: IntoIterator<Item = (u64, &'a Item)>,
{
    let mut matched: Vec<(u64, &Item)> = entries
        .into_iter()
        .filter(|(_, item)| matches_all(item, filters))
        .collect();

    matched.sort_by(|a, b| {
        b.1.updated_at
            .cmp(&a.1.updated_at)
            .then_with(|| b.0.cmp(&a.0))
    });

    matched.into_iter().map(|(_, item)| item.clone()).collect()
}
