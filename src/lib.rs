//! `mbti-atlas` library crate.
//!
//! The binary (`mbti`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future GUI/notebook frontends)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod mbti;
pub mod plot;
pub mod report;
