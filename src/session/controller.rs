//! Crawl session controller - drives one crawl attempt end to end
//!
//! The controller owns the session state and the editable options. A submit
//! validates the URL, sends exactly one request, runs the progress simulator
//! while the request is pending, and settles the session once the service
//! answers.

use crate::client::{CrawlRequest, CrawlService};
use crate::config::ConfigurationModel;
use crate::export::{self, ExportArtifact, ExportError, ExportFormat};
use crate::progress::ProgressSimulator;
use crate::session::state::{reduce, Event, SessionState};
use crate::CrawlError;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Reasons a submit is refused outright
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A crawl is already in progress")]
    Busy,
}

/// Publishes session state; every write goes through [`reduce`]
#[derive(Debug)]
struct StateCell {
    tx: watch::Sender<SessionState>,
}

impl StateCell {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx }
    }

    fn dispatch(&self, event: Event) {
        self.tx.send_if_modified(|state| {
            let next = reduce(std::mem::take(state), event);
            let changed = *state != next;
            *state = next;
            changed
        });
    }

    /// Applies `event` unless an attempt is pending; false means busy
    ///
    /// The check and the write happen under one lock, so nothing can start
    /// or settle an attempt in between.
    fn apply_unless_in_flight(&self, event: Event) -> bool {
        let mut applied = false;
        self.tx.send_if_modified(|state| {
            if state.is_in_flight() {
                return false;
            }
            *state = reduce(std::mem::take(state), event);
            applied = true;
            true
        });
        applied
    }

    fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }
}

/// Message used when an attempt ends without an answer from the service
pub const CANCELLED_MESSAGE: &str = "request was cancelled";

/// Owns one in-flight attempt until it is settled
///
/// If `submit` is dropped or unwinds before settling, dropping the flight
/// fails the attempt so the session does not stay busy.
struct Flight {
    state: Arc<StateCell>,
    settled: bool,
}

impl Flight {
    fn new(state: Arc<StateCell>) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, event: Event) {
        self.state.dispatch(event);
        self.settled = true;
    }
}

impl Drop for Flight {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Crawl abandoned before the service answered");
            self.state.dispatch(Event::Rejected(CrawlError::Unknown(
                CANCELLED_MESSAGE.to_string(),
            )));
        }
    }
}

/// Orchestrates crawl attempts against a [`CrawlService`]
pub struct CrawlSession<S> {
    service: S,
    config: ConfigurationModel,
    simulator: ProgressSimulator,
    state: Arc<StateCell>,
}

impl<S: CrawlService> CrawlSession<S> {
    /// Creates an idle session
    pub fn new(service: S, config: ConfigurationModel) -> Self {
        Self::with_simulator(service, config, ProgressSimulator::default())
    }

    /// Creates an idle session with a custom progress tick
    pub fn with_simulator(
        service: S,
        config: ConfigurationModel,
        simulator: ProgressSimulator,
    ) -> Self {
        Self {
            service,
            config,
            simulator,
            state: Arc::new(StateCell::new()),
        }
    }

    /// Returns a receiver that sees every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.tx.subscribe()
    }

    /// Returns a copy of the current state
    pub fn state(&self) -> SessionState {
        self.state.snapshot()
    }

    pub fn config(&self) -> &ConfigurationModel {
        &self.config
    }

    /// Options can be edited between (and during) attempts; a request already
    /// sent keeps the options it was built with.
    pub fn config_mut(&mut self) -> &mut ConfigurationModel {
        &mut self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Runs one crawl attempt for `url` and returns the terminal state
    ///
    /// # Flow
    ///
    /// 1. Refuse with [`SessionError::Busy`] while an attempt is in flight
    /// 2. Empty or whitespace URL → failed with a validation message, no request
    /// 3. Otherwise: in flight at 0%, simulator started, one request sent
    /// 4. Simulator stopped, then the response settles the session
    ///
    /// Crawl failures are reported through the returned state, not as `Err`.
    /// If the returned future is dropped, or the service panics, before the
    /// service answers, the attempt fails with [`CANCELLED_MESSAGE`].
    pub async fn submit(&self, url: &str) -> Result<SessionState, SessionError> {
        if url.trim().is_empty() {
            if !self
                .state
                .apply_unless_in_flight(Event::Rejected(CrawlError::Validation))
            {
                tracing::warn!("Ignoring empty submit: a crawl is already in progress");
                return Err(SessionError::Busy);
            }
            tracing::warn!("Rejected submit: empty URL");
            return Ok(self.state.snapshot());
        }

        if !self.state.apply_unless_in_flight(Event::Submitted) {
            tracing::warn!("Ignoring submit for {}: a crawl is already in progress", url);
            return Err(SessionError::Busy);
        }
        let flight = Flight::new(Arc::clone(&self.state));

        let (crawl, extraction) = self.config.snapshot();
        let request = CrawlRequest::new(url, crawl, extraction);
        tracing::info!("Crawling {}", request.url);

        let ticks = Arc::clone(&self.state);
        let progress = self
            .simulator
            .start(move |_| ticks.dispatch(Event::TickProgress));

        let outcome = self
            .service
            .crawl(&request)
            .await
            .and_then(|payload| payload.into_outcome());

        progress.stop().await;

        match outcome {
            Ok(result) => {
                tracing::info!("Crawl of {} succeeded", request.url);
                flight.settle(Event::Resolved(result));
            }
            Err(error) => {
                tracing::warn!("Crawl of {} failed: {}", request.url, error);
                flight.settle(Event::Rejected(error));
            }
        }

        Ok(self.state.snapshot())
    }

    /// Builds an export of the current result; `Ok(None)` when there is none
    pub fn export(&self, format: ExportFormat) -> Result<Option<ExportArtifact>, ExportError> {
        let state = self.state.snapshot();
        export::export(state.result.as_ref(), format)
    }
}
