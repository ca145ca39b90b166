// SeqSleuth - core/frequency.rs
//
// Occurrence counts and percentage shares for report tables.

use crate::core::model::{FrequencyEntry, LogRecord};
use std::collections::BTreeMap;

/// Rank keys by count, highest first; equal counts are ordered by key.
///
/// Percentages are shares of the grand total of all counts. A zero grand
/// total gives 0% everywhere rather than dividing by zero.
pub fn frequencies<K, I>(counts: I) -> Vec<FrequencyEntry>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, usize)>,
{
    let mut entries: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(key, count)| FrequencyEntry {
            key: key.into(),
            count,
            percent: 0.0,
        })
        .collect();

    let total: usize = entries.iter().map(|e| e.count).sum();
    if total > 0 {
        for entry in &mut entries {
            entry.percent = entry.count as f64 / total as f64 * 100.0;
        }
    }

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    entries
}

/// Frequency table over a key-to-items grouping (e.g. records by component).
pub fn group_frequencies<V>(groups: &BTreeMap<String, Vec<V>>) -> Vec<FrequencyEntry> {
    frequencies(groups.iter().map(|(k, v)| (k.as_str(), v.len())))
}

/// Records per component.
pub fn component_frequencies(records: &[LogRecord]) -> Vec<FrequencyEntry> {
    tally(records.iter().map(|r| r.component.as_str()))
}

/// Records per event name.
pub fn event_frequencies(records: &[LogRecord]) -> Vec<FrequencyEntry> {
    tally(records.iter().map(|r| r.event.name.as_str()))
}

fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<FrequencyEntry> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    frequencies(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::{group_by_component, parse_content, ParseConfig};

    #[test]
    fn test_sorted_by_count_then_key() {
        let table = frequencies(vec![("b", 2), ("c", 5), ("a", 2)]);
        let keys: Vec<&str> = table.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let table = frequencies(vec![("x", 1), ("y", 3)]);
        assert_eq!(table[0].percent, 75.0);
        assert_eq!(table[1].percent, 25.0);
        let sum: f64 = table.iter().map(|e| e.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_gives_zero_percent() {
        let table = frequencies(vec![("x", 0)]);
        assert_eq!(table[0].percent, 0.0);
        assert!(frequencies(Vec::<(&str, usize)>::new()).is_empty());
    }

    #[test]
    fn test_component_and_group_frequencies_agree() {
        let content = "20221001-10:00:00:000|Step_LSC|1|a\n\
                       20221001-10:00:01:000|Step_LSC|2|b\n\
                       20221001-10:00:02:000|HiH_Listener|1|a\n";
        let records = parse_content(content, &ParseConfig::default()).records;
        let by_component = component_frequencies(&records);
        assert_eq!(by_component, group_frequencies(&group_by_component(&records)));
        assert_eq!(by_component[0].key, "Step_LSC");
        assert_eq!(by_component[0].count, 2);
    }

    #[test]
    fn test_event_frequencies() {
        let content = "20221001-10:00:00:000|A|1|onStep 1\n\
                       20221001-10:00:01:000|B|2|onStep 2\n\
                       20221001-10:00:02:000|A|1|onStop\n";
        let records = parse_content(content, &ParseConfig::default()).records;
        let table = event_frequencies(&records);
        assert_eq!(table[0].key, "onStep");
        assert_eq!(table[0].count, 2);
        assert_eq!(table[1].key, "onStop");
    }
}
