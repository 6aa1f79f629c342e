use ics::properties::{Categories, DtEnd, DtStart, Summary};

use crate::EventRecord;

pub const CALENDAR_NAME: &str = "University Reunion Event";

/// Builds a calendar of the given events. Events whose date or times do not
/// parse are left out.
#[must_use]
pub fn export_ics<'a, I>(events: I) -> ics::ICalendar<'a>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut icalendar = ics::ICalendar::new("2.0", CALENDAR_NAME);

    for event in events {
        if let Some(ics_event) = event.to_ics() {
            icalendar.add_event(ics_event);
        }
    }

    icalendar
}

impl EventRecord {
    #[must_use]
    pub fn to_ics(&self) -> Option<ics::Event<'_>> {
        let start = self.starts_at()?.format("%Y%m%dT%H%M%S").to_string();
        let end = self.ends_at()?.format("%Y%m%dT%H%M%S").to_string();

        let id = format!("{}_{}", self.id, start);

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(&self.name));

        if !self.category.is_empty() {
            ics_event.push(Categories::new(&self.category));
        }

        Some(ics_event)
    }
}
