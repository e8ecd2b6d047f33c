#![forbid(unsafe_code)]

//! Terminal host for the folio command palette.
//!
//! The binary in `main.rs` owns the terminal; [`app::App`] holds the
//! state and turns events into frames so it can be tested headless.

pub mod app;
pub mod cli;
pub mod logging;
