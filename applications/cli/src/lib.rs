//! Tune Deck terminal front end
//!
//! The `deck` binary drives the dashboard from a terminal. Audio is not
//! decoded; `deck play` runs the preview deck against a simulated media
//! element so the transport can be exercised over the stored track list.

pub mod commands;
pub mod simulator;
pub mod view;
