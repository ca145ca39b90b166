// SeqSleuth - core/catalog.rs
//
// Distinct event names observed across a record set.

use crate::core::model::LogRecord;
use std::collections::{BTreeMap, BTreeSet};

/// Set of distinct event names, iterated in sorted order.
///
/// The sorted order doubles as the deterministic root order for tree
/// extraction.
pub fn unique_event_names<'a, I>(records: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a LogRecord>,
{
    records
        .into_iter()
        .map(|r| r.event.name.clone())
        .collect()
}

/// Same as [`unique_event_names`] over records already grouped by component.
pub fn unique_event_names_by_component(
    groups: &BTreeMap<String, Vec<&LogRecord>>,
) -> BTreeSet<String> {
    unique_event_names(groups.values().flatten().copied())
}
