use std::path::PathBuf;

use events_core::{export_ics, Action, ViewState};
use log::debug;

use crate::command::{Command, HELP};
use crate::render::{self, Page, Selected};

/// What the event loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Export {
        path: PathBuf,
        calendar: String,
        count: usize,
    },
    Quit,
}

/// The view state plus the translation of typed commands into actions.
#[derive(Debug, Default)]
pub struct Session {
    state: ViewState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        match &action {
            Action::FetchSucceeded(events) => debug!("Applying fetch result ({} events)", events.len()),
            other => debug!("Applying {other:?}"),
        }
        self.state.apply(action);
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::Show => self.page(),
            Command::Search(text) => {
                self.dispatch(Action::SearchChanged(text));
                self.page()
            }
            Command::Pick(name) => {
                self.dispatch(Action::AutocompleteChanged(Some(name)));
                self.page()
            }
            Command::Clear => {
                self.dispatch(Action::AutocompleteCleared);
                self.page()
            }
            Command::Suggest(input) => Reply::Text(render::suggestions(&self.state, &input)),
            Command::Attend(id) => {
                let Some(event) = self.state.events().iter().find(|event| event.id == id) else {
                    return Reply::Text(format!("No event with id {id}."));
                };
                // Sold-out events cannot be picked, but can still be dropped.
                if event.is_sold_out() && !self.state.is_selected(&id) {
                    return Reply::Text(format!("{} is sold out.", event.name));
                }
                self.dispatch(Action::ToggleSelected(id));
                self.page()
            }
            Command::More(key) => {
                // Typed input is trimmed, raw sheet keys may not be.
                let group = self
                    .state
                    .group(&key)
                    .or_else(|| self.state.groups().iter().find(|group| group.key.trim() == key));
                let Some(group) = group else {
                    return Reply::Text(format!("No event group for {key}."));
                };
                let key = group.key.clone();
                self.dispatch(Action::LoadMore(key));
                self.page()
            }
            Command::Selected => {
                let selected = Selected(&self.state).to_string();
                if selected.is_empty() {
                    Reply::Text("You are not attending any events yet.".to_string())
                } else {
                    Reply::Text(selected.trim_end().to_string())
                }
            }
            Command::Export(path) => {
                let events = self.state.selected_events();
                Reply::Export {
                    path,
                    count: events.len(),
                    calendar: export_ics(events).to_string(),
                }
            }
            Command::Help => Reply::Text(HELP.to_string()),
            Command::Quit => Reply::Quit,
        }
    }

    fn page(&self) -> Reply {
        Reply::Text(Page(&self.state).to_string())
    }
}
