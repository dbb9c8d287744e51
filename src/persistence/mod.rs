//! Roster and history storage.
//!
//! - `roster_file`: roster CSV codec
//! - `history`: one-line-per-race history records
//! - `PersistenceGateway`: the files a session reads at start-up and
//!   appends to as races finish
//!
//! Bad data is skipped with a warning rather than aborting the session.

mod gateway;
mod history;
mod roster_file;

pub use gateway::{HistoryLoad, PersistenceError, PersistenceGateway};
pub use history::{HistoryParseError, HistoryRecord};
pub use roster_file::{read_roster, write_default_roster, write_roster, ROSTER_HEADER};
