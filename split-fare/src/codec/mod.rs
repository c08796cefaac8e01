//! Interchange file format.
//!
//! A price matrix is persisted as a tab-separated grid:
//!
//! ```text
//! 24.10.2025  ICE 503  09:03        10:44     12:10
//!                      Berlin Hbf   Leipzig   Bamberg
//! 09:03       Berlin Hbf  0         29,99     49,99
//! 10:44       Leipzig              0          ?
//! 12:10       Bamberg                         0
//! ```
//!
//! The first row carries the travel date, the run label, and the arrival
//! time at every stop. The second row names the stops. Each following row
//! starts with a stop's departure time and name, then holds one cell per
//! stop: empty below the diagonal, `0` on it, and a comma-decimal fare or
//! `?` above it.

mod error;
mod tsv;

pub use error::CodecError;
pub use tsv::{decode, encode, read_file, write_file};
