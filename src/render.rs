use std::fmt::{self, Display, Formatter};

use events_core::{EventGroup, EventRecord, LoadState, ViewState};

pub const TITLE: &str = "University Reunion Event";

/// The whole events page: selection summary, then every date group.
pub struct Page<'a>(pub &'a ViewState);

/// The "Selected Events:" line, empty when nothing is selected.
pub struct Selected<'a>(pub &'a ViewState);

struct Group<'a> {
    state: &'a ViewState,
    group: &'a EventGroup,
}

struct Row<'a> {
    event: &'a EventRecord,
    selected: bool,
}

/// `Wednesday, May 1, 2024`, or the raw key when it is not a date.
pub fn format_group_date(group: &EventGroup) -> String {
    match group.date {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => group.key.clone(),
    }
}

impl Display for Page<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.0;

        writeln!(f, "{TITLE}")?;

        let selected = Selected(state).to_string();
        if !selected.is_empty() {
            writeln!(f)?;
            write!(f, "{selected}")?;
        }

        writeln!(f)?;

        match state.load_state() {
            LoadState::Loading => return writeln!(f, "Data is loading..."),
            _ if state.groups().is_empty() => return writeln!(f, "No results found."),
            _ => {}
        }

        for group in state.groups() {
            write!(f, "{}", Group { state, group })?;
        }

        Ok(())
    }
}

impl Display for Selected<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let events = self.0.selected_events();
        if events.is_empty() {
            return Ok(());
        }

        let names: Vec<&str> = events.iter().map(|event| event.name.as_str()).collect();
        writeln!(f, "Selected Events: {}", names.join(", "))
    }
}

impl Display for Group<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Group { state, group } = self;

        writeln!(f, "{}", format_group_date(group))?;
        writeln!(
            f,
            "  {:<10} {:<10} {:<10} {}",
            "Attending", "Start Time", "End Time", "Event Name"
        )?;

        for event in state.visible_events(group) {
            let selected = state.is_selected(&event.id);
            writeln!(f, "  {}", Row { event, selected })?;
        }

        if state.has_more(group) {
            let hidden = group.len() - state.visible_count(&group.key);
            writeln!(f, "  ... {hidden} more, `more {}` to load", group.key)?;
        }

        writeln!(f)
    }
}

impl Display for Row<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let attending = match (self.event.is_sold_out(), self.selected) {
            (true, _) => "Sold Out",
            (false, true) => "[Remove]",
            (false, false) => "[Attend]",
        };

        write!(
            f,
            "{:<10} {:<10} {:<10} {} (#{})",
            attending, self.event.start_time, self.event.end_time, self.event.name, self.event.id
        )
    }
}

/// Autocomplete options, one per line.
pub fn suggestions(state: &ViewState, input: &str) -> String {
    let names = state.suggestions(input);
    if names.is_empty() {
        return "No matching events.".to_string();
    }
    names.join("\n")
}
