mod parser;
pub mod pipeline;
pub mod state;
mod structs;

#[cfg(feature = "ics")]
mod ics;

#[cfg(feature = "ics")]
pub use self::ics::export_ics;
pub use parser::parse_events;
pub use pipeline::{derive_groups, Filter};
pub use state::{Action, LoadState, ViewState, PAGE_SIZE};
pub use structs::{parse_date, parse_time, EventGroup, EventId, EventRecord};
