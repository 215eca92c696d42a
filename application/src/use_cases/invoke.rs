//! Specialist and search invokers
//!
//! Each invoker wraps exactly one outbound call, bounded by its own timeout,
//! and always returns a [`SpecialistResult`]. Nothing here retries and
//! nothing here returns an error: provider failures are recovered into data
//! as close to the call as possible.

use crate::config::CouncilParams;
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use crate::ports::search_gateway::SearchGateway;
use astris_domain::{PromptTemplate, Query, Role, SpecialistResult, normalize_generation};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::error::Elapsed;
use tracing::{debug, warn};

/// Placeholder carried by a degraded search result
pub const SEARCH_PLACEHOLDER: &str = "No external research context is available.";

/// Invoker for one specialist role
pub struct SpecialistInvoker {
    role: Role,
    gateway: Arc<dyn LlmGateway>,
    timeout: Duration,
    max_new_tokens: u32,
    temperature: f32,
}

impl SpecialistInvoker {
    pub fn new(role: Role, gateway: Arc<dyn LlmGateway>, params: &CouncilParams) -> Self {
        Self {
            role,
            gateway,
            timeout: params.specialist_timeout,
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ask this specialist about the query
    pub async fn invoke(&self, query: &Query) -> SpecialistResult {
        let request = GenerationRequest::new(
            PromptTemplate::specialist_system(self.role),
            PromptTemplate::specialist_prompt(self.role, query.content()),
        )
        .with_max_new_tokens(self.max_new_tokens)
        .with_temperature(self.temperature);

        let start = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.gateway.generate(&request)).await;

        let rendered = request.rendered();
        let result = settle(
            outcome,
            self.role.placeholder(),
            &[rendered.as_str(), request.prompt.as_str()],
        );

        log_settled(
            self.role.council_name(),
            self.gateway.name(),
            &result,
            start.elapsed(),
        );
        result
    }
}

/// Invoker for the search/summarization provider
pub struct SearchInvoker {
    gateway: Arc<dyn SearchGateway>,
    timeout: Duration,
}

impl SearchInvoker {
    pub fn new(gateway: Arc<dyn SearchGateway>, params: &CouncilParams) -> Self {
        Self {
            gateway,
            timeout: params.search_timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch research context for the query
    pub async fn invoke(&self, query: &Query) -> SpecialistResult {
        let search_query = PromptTemplate::search_query(query.content());

        let start = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, self.gateway.search(&search_query)).await;
        let result = settle(outcome, SEARCH_PLACEHOLDER.to_string(), &[search_query.as_str()]);

        log_settled("search", self.gateway.name(), &result, start.elapsed());
        result
    }
}

/// Turn the raw outcome of one bounded call into a branch result.
fn settle(
    outcome: Result<Result<String, GatewayError>, Elapsed>,
    placeholder: String,
    echoes: &[&str],
) -> SpecialistResult {
    match outcome {
        Err(_) | Ok(Err(GatewayError::Timeout)) => SpecialistResult::failure("timeout"),
        Ok(Err(e)) if e.is_degraded() => SpecialistResult::degraded(placeholder, e.to_string()),
        Ok(Err(e)) => SpecialistResult::failure(e.to_string()),
        Ok(Ok(raw)) => {
            let text = normalize_generation(&raw, echoes);
            if text.is_empty() {
                SpecialistResult::degraded(placeholder, "empty generation")
            } else {
                SpecialistResult::success(text)
            }
        }
    }
}

fn log_settled(branch: &str, provider: &str, result: &SpecialistResult, elapsed: Duration) {
    match result.reason() {
        None => debug!(
            "{} answered via {} in {}ms",
            branch,
            provider,
            elapsed.as_millis()
        ),
        Some(reason) => warn!(
            "{} {} via {} after {}ms: {}",
            branch,
            result.label(),
            provider,
            elapsed.as_millis(),
            reason
        ),
    }
}
