//! Cosmetic progress for a pending crawl
//!
//! The crawl service reports nothing until it is done, so the client shows a
//! synthetic percentage: it climbs by 10 every tick and stops at 90. Only the
//! final response moves it to 100.

mod simulator;

pub use simulator::{next_progress, ProgressGuard, ProgressSimulator};

/// Percentage the simulator never goes beyond
pub const PROGRESS_CAP: u8 = 90;

/// Amount added on every tick
pub const PROGRESS_STEP: u8 = 10;

/// Default time between ticks (milliseconds)
pub const DEFAULT_TICK_MS: u64 = 500;
