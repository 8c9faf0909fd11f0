//! Read-only projections over the item collection.
//!
//! Every view is re-derived from current state on each call; there is no
//! cached or incremental index to invalidate. Ordering is date ascending,
//! then numeric-aware title comparison, then id, which makes the order total
//! and deterministic across repeated reads.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use regex::Regex;

use crate::model::item::ProjectItem;
use crate::store::ItemStore;
use crate::util::natsort;

/// The total display order shared by all projections.
pub fn item_order(a: &ProjectItem, b: &ProjectItem) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| natsort::compare(&a.title, &b.title))
        .then_with(|| a.id.cmp(&b.id))
}

impl ItemStore {
    /// Every item, sorted.
    pub fn all(&self) -> Vec<&ProjectItem> {
        self.sorted(|_| true)
    }

    /// Items not archived, sorted. The default working set.
    pub fn active(&self) -> Vec<&ProjectItem> {
        self.sorted(|i| !i.archived)
    }

    /// Archived items, sorted.
    pub fn archived(&self) -> Vec<&ProjectItem> {
        self.sorted(|i| i.archived)
    }

    /// Completed items regardless of archived state, sorted.
    pub fn completed(&self) -> Vec<&ProjectItem> {
        self.sorted(|i| i.completed)
    }

    /// Items whose title or notes match `pattern`. Archived items are
    /// excluded unless asked for.
    pub fn search(&self, pattern: &Regex, include_archived: bool) -> Vec<&ProjectItem> {
        self.sorted(|i| {
            (include_archived || !i.archived)
                && (pattern.is_match(&i.title) || pattern.is_match(&i.notes))
        })
    }

    fn sorted(&self, keep: impl Fn(&ProjectItem) -> bool) -> Vec<&ProjectItem> {
        let mut items: Vec<&ProjectItem> = self.items.values().filter(|i| keep(i)).collect();
        items.sort_by(|a, b| item_order(a, b));
        items
    }
}

/// Count items per date over whatever subset the caller passes in (typically
/// `active()`, to drive calendar indicators). The map iterates in date order.
pub fn counts_by_date<'a, I>(items: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a ProjectItem>,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.date.clone()).or_insert(0) += 1;
    }
    counts
}
