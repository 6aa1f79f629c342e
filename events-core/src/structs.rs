use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M:%S %p"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One row of the events sheet.
///
/// Date and time columns are kept exactly as received: the raw start date is
/// the grouping key, so it must not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    pub category: String,
    pub start_date: String,
    pub start_time: String,
    pub end_time: String,
    pub availability: u32,
}

impl EventRecord {
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.start_date)
    }

    #[must_use]
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        Some(self.date()?.and_time(parse_time(&self.start_time)?))
    }

    #[must_use]
    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        Some(self.date()?.and_time(parse_time(&self.end_time)?))
    }

    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.availability == 0
    }
}

/// Events sharing one literal start date string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGroup {
    pub key: String,
    pub date: Option<NaiveDate>,
    pub events: Vec<EventRecord>,
}

impl EventGroup {
    pub(crate) fn new(key: String) -> Self {
        Self {
            date: parse_date(&key),
            key,
            events: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}
