//! Run Council use case
//!
//! Orchestrates the full deliberation: validate the query, gather the council,
//! then synthesize.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::gather_council::FanOutCoordinator;
use crate::use_cases::synthesize::{SynthesisError, SynthesisInvoker};
use astris_domain::{DomainError, Query, ResultBundle, SynthesisAttempt};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that can end a deliberation
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("{0}")]
    InvalidInput(#[from] DomainError),

    #[error("{0}")]
    ServiceUnavailable(#[from] SynthesisError),

    /// Detail is for server-side logs only
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Full record of one deliberation
#[derive(Debug, Clone, Serialize)]
pub struct Deliberation {
    pub query: Query,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub bundle: ResultBundle,
    /// Synthesis attempts in chain order, the winner last
    pub attempts: Vec<SynthesisAttempt>,
    /// Label of the provider whose synthesis was accepted
    pub provider: String,
    /// The final answer, exactly as the winning provider produced it
    pub response: String,
}

/// Top-level entry point of the council
pub struct DeliberationOrchestrator {
    coordinator: FanOutCoordinator,
    synthesizer: SynthesisInvoker,
}

impl DeliberationOrchestrator {
    pub fn new(coordinator: FanOutCoordinator, synthesizer: SynthesisInvoker) -> Self {
        Self {
            coordinator,
            synthesizer,
        }
    }

    pub fn coordinator(&self) -> &FanOutCoordinator {
        &self.coordinator
    }

    pub fn synthesizer(&self) -> &SynthesisInvoker {
        &self.synthesizer
    }

    /// Upper bound on one deliberation's duration
    pub fn worst_case(&self) -> Duration {
        self.coordinator
            .worst_case()
            .saturating_add(self.synthesizer.worst_case())
    }

    /// Deliberate with default (no-op) progress
    pub async fn deliberate(&self, raw_query: &str) -> Result<Deliberation, RunCouncilError> {
        self.deliberate_with_progress(raw_query, &NoProgress).await
    }

    /// Deliberate with progress callbacks.
    ///
    /// An empty query is rejected before any provider is called. Dropping the
    /// returned future cancels every outstanding provider call.
    pub async fn deliberate_with_progress(
        &self,
        raw_query: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<Deliberation, RunCouncilError> {
        let query = Query::parse(raw_query)?;

        match AssertUnwindSafe(self.run(query, progress))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Deliberation panicked: {}", message);
                Err(RunCouncilError::Internal(message))
            }
        }
    }

    async fn run(
        &self,
        query: Query,
        progress: &dyn ProgressNotifier,
    ) -> Result<Deliberation, RunCouncilError> {
        let started_at = Utc::now();
        let start = Instant::now();
        info!("Starting deliberation");

        let bundle = self.coordinator.gather_with_progress(&query, progress).await;
        if bundle.all_specialists_failed() {
            warn!("No specialist produced an assessment; synthesizing from what remains");
        }

        let synthesis = self
            .synthesizer
            .synthesize(&query, &bundle, progress)
            .await
            .inspect_err(|e| error!("Deliberation failed: {}", e))?;

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            "Deliberation complete in {}ms via {}",
            elapsed_ms, synthesis.provider
        );

        Ok(Deliberation {
            query,
            started_at,
            elapsed_ms,
            bundle,
            attempts: synthesis.attempts,
            provider: synthesis.provider,
            response: synthesis.text,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
