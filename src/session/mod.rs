//! Session module for tracking one crawl attempt at a time
//!
//! # Components
//!
//! - `SessionState`/`SessionPhase`: what the display surface renders
//! - `reduce`: the pure transition function behind every state change
//! - `CrawlSession`: the controller that validates, sends, and settles

mod controller;
mod state;

// Re-export main types
pub use controller::{CrawlSession, SessionError, CANCELLED_MESSAGE};
pub use state::{reduce, Event, SessionPhase, SessionState};
