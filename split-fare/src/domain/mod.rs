//! Domain types for split-ticket fare analysis.
//!
//! This module contains the value types shared by the assembler, the
//! optimizer and the interchange codec. All types enforce their invariants
//! at construction time, so code that receives these types can trust their
//! validity.

mod fare;
mod run_id;
mod stop;
mod time;

pub use fare::{Fare, InvalidFare};
pub use run_id::{InvalidRunId, RunId};
pub use stop::{Segment, Stop, StopIndex};
pub use time::{ClockTime, TimeError, resolve_time_sequence};
