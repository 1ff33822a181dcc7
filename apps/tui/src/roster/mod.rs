pub mod error;
pub mod models;
pub mod source;

pub use error::FetchError;
pub use models::{parse_roster, write_merged, RosterEntry};
pub use source::{source_from_location, DirRosterSource, HttpRosterSource, RosterSource};
