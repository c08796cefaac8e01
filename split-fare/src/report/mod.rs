//! Savings verdicts.
//!
//! Compares the cheapest ticket combination with the end-to-end fare and
//! renders the outcome for people. Presentation is left to the caller: a
//! [`SavingsReport`] implements `Display` and exposes its parts.

mod savings;

pub use savings::{SavingsReport, Verdict};
