//! Split-ticket fare analysis.
//!
//! Answers the question: "is it cheaper to buy several tickets covering
//! parts of this train journey than one ticket for the whole trip?"
//!
//! A [`matrix::PriceMatrix`] of fares for every forward stop pair of one
//! train run is assembled from a journey search provider, persisted in a
//! tab-separated interchange file, and searched for the cheapest ticket
//! combination.

pub mod analyze;
pub mod assembler;
pub mod codec;
pub mod domain;
pub mod matrix;
pub mod optimizer;
pub mod provider;
pub mod report;
