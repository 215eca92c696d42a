//! Scripted gateways shared by the use case tests.

use crate::ports::llm_gateway::{GatewayError, GenerationRequest, LlmGateway};
use crate::ports::progress::ProgressNotifier;
use crate::ports::search_gateway::SearchGateway;
use astris_domain::Phase;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared record of which gateways were called, in call order
pub(crate) type CallLog = Arc<Mutex<Vec<String>>>;

type Reply = Box<dyn Fn(&GenerationRequest) -> Result<String, GatewayError> + Send + Sync>;

pub(crate) struct ScriptedGateway {
    name: String,
    reply: Reply,
    delay: Duration,
    calls: AtomicUsize,
    completed: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
    log: Option<CallLog>,
}

impl ScriptedGateway {
    pub(crate) fn respond(
        name: &str,
        reply: impl Fn(&GenerationRequest) -> Result<String, GatewayError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            reply: Box::new(reply),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            log: None,
        }
    }

    pub(crate) fn text(name: &str, text: &str) -> Self {
        let text = text.to_string();
        Self::respond(name, move |_| Ok(text.clone()))
    }

    pub(crate) fn error(name: &str, error: GatewayError) -> Self {
        Self::respond(name, move |_| Err(error.clone()))
    }

    pub(crate) fn panicking(name: &str) -> Self {
        Self::respond(name, |_| panic!("scripted provider panic"))
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn with_log(mut self, log: &CallLog) -> Self {
        self.log = Some(Arc::clone(log));
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.log {
            log.lock().unwrap().push(self.name.clone());
        }
        self.requests.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let reply = (self.reply)(request);
        self.completed.fetch_add(1, Ordering::SeqCst);
        reply
    }
}

pub(crate) struct ScriptedSearch {
    name: String,
    reply: Result<String, GatewayError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedSearch {
    pub(crate) fn text(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            reply: Ok(text.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn error(name: &str, error: GatewayError) -> Self {
        Self {
            name: name.to_string(),
            reply: Err(error),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchGateway for ScriptedSearch {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, _query: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }
}

/// Progress notifier that records every callback as a short line
#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {} {}", phase.as_str(), total_tasks));
    }

    fn on_task_complete(&self, phase: &Phase, label: &str, success: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {} {} {}", phase.as_str(), label, success));
    }

    fn on_phase_complete(&self, phase: &Phase) {
        self.events
            .lock()
            .unwrap()
            .push(format!("end {}", phase.as_str()));
    }
}
