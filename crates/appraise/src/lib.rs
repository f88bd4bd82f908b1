//! appraise: price checking for pasted item text
//!
//! Item text copied from the game client is parsed into a structured item, its modifier
//! lines are matched against the marketplace's modifier catalog, and the result is turned
//! into the JSON query the marketplace search endpoint accepts.
//!
//! The library crates do the work; this crate is the command-line front end.

#![warn(missing_docs)]

pub mod cli;
