//! Price matrix assembly.
//!
//! Assembly runs in two phases:
//!
//! 1. [`cell_requests`] turns the reference run's stops into one search per
//!    forward stop pair. This is pure and deterministic.
//! 2. [`Assembler`] dispatches those searches against a
//!    [`JourneySearchProvider`](crate::provider::JourneySearchProvider) and
//!    records one outcome per cell. Only fares quoted for the reference run
//!    are accepted (see [`select`]); everything else leaves the cell
//!    unavailable.

mod assemble;
mod config;
mod request;
mod select;


pub use assemble::{Assembler, Assembly, AssemblyError, AssemblyStats, assemble_journey};
pub use config::AssemblerConfig;
pub use request::{CellRequest, cell_requests};
pub use select::{Selection, select};
