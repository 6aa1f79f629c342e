use std::collections::{HashMap, HashSet};

use crate::pipeline::{derive_groups, Filter};
use crate::{EventGroup, EventId, EventRecord};

pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// Everything a user (or the fetch) can do to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchSucceeded(Vec<EventRecord>),
    FetchFailed,
    SearchChanged(String),
    AutocompleteChanged(Option<String>),
    AutocompleteCleared,
    ToggleSelected(EventId),
    LoadMore(String),
}

/// View state of the events page, updated only through [`ViewState::apply`].
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    events: Vec<EventRecord>,
    load_state: LoadState,
    search: String,
    autocomplete: String,
    groups: Vec<EventGroup>,
    visible: HashMap<String, usize>,
    selection: Vec<EventId>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::FetchSucceeded(events) => {
                self.events = events;
                self.load_state = LoadState::Loaded;
                self.regroup();
            }
            Action::FetchFailed => {
                self.events.clear();
                self.load_state = LoadState::Failed;
                self.regroup();
            }
            Action::SearchChanged(search) if search.is_empty() => self.clear_filters(),
            Action::SearchChanged(search) => {
                self.search = search;
                self.regroup();
            }
            Action::AutocompleteChanged(Some(name)) if !name.is_empty() => {
                self.autocomplete = name;
                self.regroup();
            }
            Action::AutocompleteChanged(_) | Action::AutocompleteCleared => self.clear_filters(),
            Action::ToggleSelected(id) => self.toggle_selection(id),
            Action::LoadMore(key) => self.load_more(&key),
        }
    }

    fn clear_filters(&mut self) {
        self.search.clear();
        self.autocomplete.clear();
        self.regroup();
    }

    fn regroup(&mut self) {
        let filter = Filter {
            search: &self.search,
            autocomplete: &self.autocomplete,
        };
        self.groups = derive_groups(&self.events, filter);
        self.visible = self
            .groups
            .iter()
            .map(|group| (group.key.clone(), PAGE_SIZE))
            .collect();
    }

    fn toggle_selection(&mut self, id: EventId) {
        if let Some(pos) = self.selection.iter().position(|selected| *selected == id) {
            self.selection.remove(pos);
        } else {
            self.selection.push(id);
        }
    }

    fn load_more(&mut self, key: &str) {
        if let Some(count) = self.visible.get_mut(key) {
            *count += PAGE_SIZE;
        }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn autocomplete(&self) -> &str {
        &self.autocomplete
    }

    pub fn groups(&self) -> &[EventGroup] {
        &self.groups
    }

    pub fn group(&self, key: &str) -> Option<&EventGroup> {
        self.groups.iter().find(|group| group.key == key)
    }

    /// Selected ids in the order they were picked.
    pub fn selection(&self) -> &[EventId] {
        &self.selection
    }

    pub fn is_selected(&self, id: &EventId) -> bool {
        self.selection.contains(id)
    }

    pub fn visible_count(&self, key: &str) -> usize {
        self.visible.get(key).copied().unwrap_or(PAGE_SIZE)
    }

    /// The leading slice of a group that is currently shown.
    pub fn visible_events<'g>(&self, group: &'g EventGroup) -> &'g [EventRecord] {
        let count = self.visible_count(&group.key).min(group.events.len());
        &group.events[..count]
    }

    pub fn has_more(&self, group: &EventGroup) -> bool {
        group.events.len() > self.visible_count(&group.key)
    }

    /// Selected records in selection order. Ids no longer in the collection
    /// are skipped.
    pub fn selected_events(&self) -> Vec<&EventRecord> {
        self.selection
            .iter()
            .filter_map(|id| self.events.iter().find(|event| event.id == *id))
            .collect()
    }

    /// Autocomplete options: distinct event names containing `input`,
    /// ignoring case, in collection order.
    pub fn suggestions(&self, input: &str) -> Vec<&str> {
        let needle = input.trim().to_lowercase();
        let mut seen = HashSet::new();

        self.events
            .iter()
            .map(|event| event.name.as_str())
            .filter(|name| name.to_lowercase().contains(&needle))
            .filter(|name| seen.insert(*name))
            .collect()
    }
}
