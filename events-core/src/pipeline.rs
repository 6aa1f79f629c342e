use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use feruca::{Collator, Tailoring};

use crate::{EventGroup, EventRecord};

/// Free-text search and exact autocomplete pick, applied together.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filter<'a> {
    pub search: &'a str,
    pub autocomplete: &'a str,
}

impl Filter<'_> {
    #[must_use]
    pub fn matches(&self, event: &EventRecord) -> bool {
        let matches_search = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            event.name.to_lowercase().contains(&needle)
                || event.category.to_lowercase().contains(&needle)
        };

        let matches_autocomplete = self.autocomplete.is_empty() || event.name == self.autocomplete;

        matches_search && matches_autocomplete
    }
}

pub fn filter_events<'e>(events: &'e [EventRecord], filter: Filter<'_>) -> Vec<&'e EventRecord> {
    events.iter().filter(|event| filter.matches(event)).collect()
}

/// Partitions events by their raw start date, groups in first-seen order.
pub fn group_events<'e, I>(events: I) -> Vec<EventGroup>
where
    I: IntoIterator<Item = &'e EventRecord>,
{
    let mut groups: Vec<EventGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        let idx = *index.entry(event.start_date.as_str()).or_insert_with(|| {
            groups.push(EventGroup::new(event.start_date.clone()));
            groups.len() - 1
        });
        groups[idx].events.push(event.clone());
    }

    groups
}

/// Orders a group by three successive stable sorts: start, end, then name.
///
/// The name pass decides the final order; start and end only survive as
/// tie-breakers between equal names.
pub fn sort_group(events: &mut [EventRecord]) {
    events.sort_by(|a, b| compare_datetimes(a.starts_at(), b.starts_at()));
    events.sort_by(|a, b| compare_datetimes(a.ends_at(), b.ends_at()));
    let mut collator = name_collator();
    events.sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));
}

/// Filters, groups and sorts events into the view's date groups.
pub fn derive_groups(events: &[EventRecord], filter: Filter<'_>) -> Vec<EventGroup> {
    let mut groups = group_events(filter_events(events, filter));
    for group in &mut groups {
        sort_group(&mut group.events);
    }
    groups
}

// Unparseable datetimes sort after every parseable one.
fn compare_datetimes(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// CLDR root collation without shifting: spaces and punctuation still count,
// accents and case only break ties between equal base letters.
fn name_collator() -> Collator {
    Collator::new(Tailoring::default(), false, true)
}

/// Compares event names the way a browser's `localeCompare` does.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    name_collator().collate(a, b)
}
