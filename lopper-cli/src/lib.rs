//! # Lopper CLI Library
//!
//! Command-line parsing, logging, and the ratatui front end that drives a
//! [`lopper_core::Session`].

pub mod cli;
pub mod logging;
pub mod output;
pub mod panic;
pub mod tui;
