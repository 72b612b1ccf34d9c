/// Session state definitions and the transition function
///
/// Every change to a session goes through [`reduce`], which is pure: it takes
/// the current state and one event and returns the next state.
use crate::client::CrawlResult;
use crate::progress::next_progress;
use crate::CrawlError;
use std::fmt;

/// Where a crawl session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    /// Nothing submitted yet
    #[default]
    Idle,

    /// A request is outstanding
    InFlight,

    // ===== Terminal States =====
    /// The service returned a usable result
    Succeeded,

    /// The attempt failed; the reason is in `SessionState::error`
    Failed,
}

impl SessionPhase {
    /// Returns true if this is a terminal state (a new submit is needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InFlight => "in_flight",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything the display surface needs to render a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub phase: SessionPhase,

    /// Percentage shown to the user, 0..=100
    pub progress: u8,

    /// Set only when `phase` is `Failed`
    pub error: Option<String>,

    /// Set only when `phase` is `Succeeded`
    pub result: Option<CrawlResult>,
}

impl SessionState {
    pub fn is_in_flight(&self) -> bool {
        self.phase == SessionPhase::InFlight
    }
}

/// Inputs that move a session between phases
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A request is about to be sent
    Submitted,

    /// The progress simulator ticked
    TickProgress,

    /// The service returned a successful result
    Resolved(CrawlResult),

    /// The attempt failed
    Rejected(CrawlError),
}

/// Applies one event to a session state
///
/// - `Submitted` starts a fresh attempt: in flight, progress 0, no error or
///   result.
/// - `TickProgress` advances progress only while in flight.
/// - `Resolved` completes an in-flight attempt at 100%; outside of an
///   attempt it is ignored.
/// - `Rejected` fails the session from any phase. An in-flight attempt keeps
///   the progress it had reached; an attempt rejected before it was sent
///   shows 0.
pub fn reduce(state: SessionState, event: Event) -> SessionState {
    match event {
        Event::Submitted => SessionState {
            phase: SessionPhase::InFlight,
            progress: 0,
            error: None,
            result: None,
        },

        Event::TickProgress if state.is_in_flight() => SessionState {
            progress: next_progress(state.progress),
            ..state
        },
        Event::TickProgress => state,

        Event::Resolved(result) if state.is_in_flight() => SessionState {
            phase: SessionPhase::Succeeded,
            progress: 100,
            error: None,
            result: Some(result),
        },
        Event::Resolved(_) => state,

        Event::Rejected(error) => SessionState {
            phase: SessionPhase::Failed,
            progress: if state.is_in_flight() { state.progress } else { 0 },
            error: Some(error.to_string()),
            result: None,
        },
    }
}
