//! Cheapest ticket combination search.
//!
//! Stops are totally ordered, so the priced forward segments form a DAG and
//! the cheapest way from the first to the last stop is a single pass of
//! dynamic programming in stop order.

mod route;

pub use route::{OptimizeError, Route, optimize};
