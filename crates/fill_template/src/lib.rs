// crates/fill_template/src/lib.rs

//! Command-line front end for the marker templating crates.
//!
//! `main.rs` only parses arguments; everything it calls lives here so the
//! configuration and command logic can be tested without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
