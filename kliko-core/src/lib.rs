//! Core types and the extraction pipeline for the kliko bin-day light.

/// Bin classification by canonical keyword.
pub mod classify;
/// Turning raw calendar entries into a schedule.
pub mod extract;
/// Domain models shared by the adapters.
pub mod model;
/// Rewriting relative and irregular Dutch date tokens.
pub mod normalize;
/// Selecting the bin for a day and mapping it to a light command.
pub mod notify;
/// Parsing normalized date strings.
pub mod parse;
/// Traits describing the retrieval, device and clock collaborators.
pub mod ports;
/// High-level run facade used by the daemon.
pub mod service;

pub use classify::*;
pub use extract::*;
pub use model::*;
pub use normalize::*;
pub use notify::*;
pub use parse::*;
pub use ports::*;
pub use service::*;
