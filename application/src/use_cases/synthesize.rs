//! Synthesize use case
//!
//! Merges a [`ResultBundle`] into one answer by walking an ordered chain of
//! lead providers, one at a time, until one produces a usable text.

use crate::config::CouncilParams;
use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use astris_domain::{
    AttemptOutcome, Phase, PromptTemplate, Query, ResultBundle, SynthesisAttempt,
    classify_synthesis,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end the synthesis stage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesisError {
    #[error("No synthesis providers configured")]
    EmptyChain,

    #[error("synthesis unavailable")]
    ChainExhausted { attempts: Vec<SynthesisAttempt> },
}

impl SynthesisError {
    /// Every attempt made before giving up
    pub fn attempts(&self) -> &[SynthesisAttempt] {
        match self {
            Self::EmptyChain => &[],
            Self::ChainExhausted { attempts } => attempts,
        }
    }
}

/// One link in the synthesis chain
pub struct SynthesisProvider {
    label: String,
    gateway: Arc<dyn LlmGateway>,
    timeout: Duration,
}

impl SynthesisProvider {
    pub fn new(label: impl Into<String>, gateway: Arc<dyn LlmGateway>, timeout: Duration) -> Self {
        Self {
            label: label.into(),
            gateway,
            timeout,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn attempt(&self, request: &GenerationRequest) -> AttemptOutcome {
        let outcome = tokio::time::timeout(self.timeout, self.gateway.generate(request)).await;

        match outcome {
            Err(_) | Ok(Err(GatewayError::Timeout)) => AttemptOutcome::failure("timeout"),
            Ok(Err(e)) if e.is_degraded() => AttemptOutcome::degraded(e.to_string()),
            Ok(Err(e)) => AttemptOutcome::failure(e.to_string()),
            Ok(Ok(raw)) => {
                let rendered = request.rendered();
                classify_synthesis(&raw, &[rendered.as_str(), request.prompt.as_str()])
            }
        }
    }
}

/// The winning synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    /// Label of the provider whose text was accepted
    pub provider: String,
    /// Normalized synthesized text
    pub text: String,
    /// Every attempt in chain order, the winner last
    pub attempts: Vec<SynthesisAttempt>,
}

/// Sequential, early-exit synthesis over a fixed provider chain
pub struct SynthesisInvoker {
    chain: Vec<SynthesisProvider>,
    max_new_tokens: u32,
    temperature: f32,
}

impl SynthesisInvoker {
    /// Build an invoker; an empty chain is rejected.
    pub fn new(chain: Vec<SynthesisProvider>, params: &CouncilParams) -> Result<Self, SynthesisError> {
        if chain.is_empty() {
            return Err(SynthesisError::EmptyChain);
        }
        Ok(Self {
            chain,
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
        })
    }

    /// Provider labels in chain order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.chain.iter().map(SynthesisProvider::label)
    }

    /// Worst-case duration of one synthesis: every provider timing out
    pub fn worst_case(&self) -> Duration {
        self.chain
            .iter()
            .map(SynthesisProvider::timeout)
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    /// Synthesize the bundle into one answer.
    ///
    /// Providers are tried strictly in order and the first classified success
    /// ends the walk; providers after it are never called.
    pub async fn synthesize(
        &self,
        query: &Query,
        bundle: &ResultBundle,
        progress: &dyn ProgressNotifier,
    ) -> Result<SynthesisResult, SynthesisError> {
        info!("Synthesizing with a chain of {}", self.chain.len());
        progress.on_phase_start(&Phase::Synthesis, self.chain.len());

        let request = GenerationRequest::new(
            PromptTemplate::synthesis_system(),
            PromptTemplate::synthesis_prompt(query.content(), bundle),
        )
        .with_max_new_tokens(self.max_new_tokens)
        .with_temperature(self.temperature);

        let mut attempts = Vec::with_capacity(self.chain.len());

        for provider in &self.chain {
            let start = Instant::now();
            let outcome = provider.attempt(&request).await;
            let elapsed = start.elapsed().as_millis();

            progress.on_task_complete(&Phase::Synthesis, provider.label(), outcome.is_success());

            if let AttemptOutcome::Success { text } = &outcome {
                debug!("Synthesis by {} accepted after {}ms", provider.label(), elapsed);
                let text = text.clone();
                attempts.push(SynthesisAttempt::new(provider.label(), outcome));
                progress.on_phase_complete(&Phase::Synthesis);

                return Ok(SynthesisResult {
                    provider: provider.label().to_string(),
                    text,
                    attempts,
                });
            }

            warn!(
                "Synthesis by {} {} after {}ms: {}",
                provider.label(),
                outcome.label(),
                elapsed,
                outcome.reason().unwrap_or_default()
            );
            attempts.push(SynthesisAttempt::new(provider.label(), outcome));
        }

        progress.on_phase_complete(&Phase::Synthesis);
        warn!("Synthesis chain exhausted after {} attempts", attempts.len());
        Err(SynthesisError::ChainExhausted { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::test_support::{CallLog, RecordingProgress, ScriptedGateway};
    use astris_domain::{Role, SpecialistResult};

    fn query() -> Query {
        Query::parse("How do I ask for a raise?").unwrap()
    }

    fn bundle() -> ResultBundle {
        ResultBundle::assemble(
            Role::ALL
                .into_iter()
                .map(|role| (role, SpecialistResult::success(format!("{} says hi", role)))),
            Some(SpecialistResult::success("Salaries rose 4% this year.")),
        )
    }

    fn provider(label: &str, gateway: ScriptedGateway) -> SynthesisProvider {
        SynthesisProvider::new(label, Arc::new(gateway), Duration::from_secs(45))
    }

    fn invoker(chain: Vec<SynthesisProvider>) -> SynthesisInvoker {
        SynthesisInvoker::new(chain, &CouncilParams::default()).unwrap()
    }

    fn logged(log: &CallLog) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_empty_chain_is_rejected() {
        let result = SynthesisInvoker::new(Vec::new(), &CouncilParams::default());
        assert!(matches!(result, Err(SynthesisError::EmptyChain)));
    }

    #[tokio::test]
    async fn test_stops_at_first_success() {
        let log = CallLog::default();
        let chain = vec![
            provider(
                "a",
                ScriptedGateway::error("a", GatewayError::Connection("refused".to_string()))
                    .with_log(&log),
            ),
            provider("b", ScriptedGateway::text("b", "Answer from B").with_log(&log)),
            provider("c", ScriptedGateway::text("c", "Answer from C").with_log(&log)),
        ];

        let result = invoker(chain)
            .synthesize(&query(), &bundle(), &NoProgress)
            .await
            .unwrap();

        assert_eq!(logged(&log), vec!["a", "b"]);
        assert_eq!(result.provider, "b");
        assert_eq!(result.text, "Answer from B");
        assert_eq!(result.attempts.len(), 2);
        assert!(!result.attempts[0].outcome.is_success());
    }

    #[tokio::test]
    async fn test_exhausted_chain_never_calls_past_end() {
        let log = CallLog::default();
        let chain = vec![
            provider(
                "a",
                ScriptedGateway::error(
                    "a",
                    GatewayError::HttpStatus {
                        status: 503,
                        body: "overloaded".to_string(),
                    },
                )
                .with_log(&log),
            ),
            provider("b", ScriptedGateway::text("b", "   ").with_log(&log)),
        ];

        let err = invoker(chain)
            .synthesize(&query(), &bundle(), &NoProgress)
            .await
            .unwrap_err();

        assert_eq!(logged(&log), vec!["a", "b"]);
        assert_eq!(err.to_string(), "synthesis unavailable");
        assert_eq!(err.attempts().len(), 2);
        assert_eq!(
            err.attempts()[1].outcome,
            AttemptOutcome::degraded("empty synthesis")
        );
    }

    #[tokio::test]
    async fn test_unavailability_text_falls_through() {
        let chain = vec![
            provider(
                "primary",
                ScriptedGateway::text("primary", "The model is currently loading, retry later."),
            ),
            provider("secondary", ScriptedGateway::text("secondary", "  Ask with data.  ")),
        ];

        let result = invoker(chain)
            .synthesize(&query(), &bundle(), &NoProgress)
            .await
            .unwrap();

        assert_eq!(result.provider, "secondary");
        assert_eq!(result.text, "Ask with data.");
        assert!(matches!(
            result.attempts[0].outcome,
            AttemptOutcome::Degraded { .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out_and_falls_through() {
        let slow = SynthesisProvider::new(
            "slow",
            Arc::new(ScriptedGateway::text("slow", "late").with_delay(Duration::from_secs(120))),
            Duration::from_secs(10),
        );
        let chain = vec![slow, provider("fast", ScriptedGateway::text("fast", "On time."))];

        let result = invoker(chain)
            .synthesize(&query(), &bundle(), &NoProgress)
            .await
            .unwrap();

        assert_eq!(result.text, "On time.");
        assert_eq!(result.attempts[0].outcome, AttemptOutcome::failure("timeout"));
    }

    #[tokio::test]
    async fn test_request_marks_missing_councillors() {
        let gateway = Arc::new(ScriptedGateway::text("lead", "Merged."));
        let chain = vec![SynthesisProvider::new(
            "lead",
            gateway.clone(),
            Duration::from_secs(45),
        )];
        let bundle = ResultBundle::assemble(
            [(Role::RiskAssessment, SpecialistResult::failure("timeout"))],
            Some(SpecialistResult::success("Salaries rose 4% this year.")),
        );

        invoker(chain)
            .synthesize(&query(), &bundle, &NoProgress)
            .await
            .unwrap();

        let request = gateway.last_request().unwrap();
        assert!(request.prompt.contains("[NO INPUT: The Sentinel failed: timeout]"));
        assert!(request.prompt.contains("Salaries rose 4% this year."));
        assert!(request.prompt.contains("How do I ask for a raise?"));
    }

    #[tokio::test]
    async fn test_echoed_prompt_is_not_an_answer() {
        let chain = vec![
            provider(
                "echo",
                ScriptedGateway::respond("echo", |request| Ok(request.rendered())),
            ),
            provider("real", ScriptedGateway::text("real", "Real answer.")),
        ];

        let result = invoker(chain)
            .synthesize(&query(), &bundle(), &NoProgress)
            .await
            .unwrap();

        assert_eq!(result.provider, "real");
    }

    #[tokio::test]
    async fn test_progress_reports_every_attempt() {
        let progress = RecordingProgress::default();
        let chain = vec![
            provider("a", ScriptedGateway::error("a", GatewayError::Timeout)),
            provider("b", ScriptedGateway::text("b", "Fine.")),
        ];

        invoker(chain)
            .synthesize(&query(), &bundle(), &progress)
            .await
            .unwrap();

        assert_eq!(
            progress.events(),
            vec![
                "start synthesis 2",
                "done synthesis a false",
                "done synthesis b true",
                "end synthesis",
            ]
        );
    }

    #[test]
    fn test_worst_case_sums_timeouts() {
        let chain = vec![
            provider("a", ScriptedGateway::text("a", "x")),
            provider("b", ScriptedGateway::text("b", "y")),
        ];
        let invoker = invoker(chain);
        assert_eq!(invoker.worst_case(), Duration::from_secs(90));
        assert_eq!(invoker.labels().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_worst_case_saturates() {
        let chain = vec![
            SynthesisProvider::new("a", Arc::new(ScriptedGateway::text("a", "x")), Duration::MAX),
            SynthesisProvider::new("b", Arc::new(ScriptedGateway::text("b", "y")), Duration::MAX),
        ];
        let invoker = invoker(chain);
        assert_eq!(invoker.worst_case(), Duration::MAX);
    }
}
