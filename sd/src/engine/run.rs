//! Generation run orchestration
//!
//! One run walks the section plan in order, one request in flight at a
//! time. Each completed batch appends its sections and advances progress;
//! a transport or backend error aborts the run; a partial fallback stops it
//! early without marking failure. Callers never see a thrown error - they
//! observe [`RunState`] transitions and the returned [`RunOutcome`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::backend::{GenerateRequest, GenerationBackend};
use crate::form::Questionnaire;
use crate::plan::SectionPlan;

use super::document::{AccumulatedDocument, DocumentSection};
use super::reconcile::BatchOutcome;

/// Observable state of the current (or last) generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub is_running: bool,
    /// 0..=100, recomputed after each completed batch
    pub progress: u8,
    /// Human-readable label of what the run is doing right now
    pub current_status: String,
    /// Non-empty exactly when the run aborted
    pub error_message: String,
}

impl RunState {
    fn idle() -> Self {
        Self {
            is_running: false,
            progress: 0,
            current_status: String::new(),
            error_message: String::new(),
        }
    }

    fn started() -> Self {
        Self {
            is_running: true,
            ..Self::idle()
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every batch succeeded
    Completed,
    /// Aborted on a transport, backend-declared or malformed-response error
    Failed,
    /// Stopped early on a partial-output signal; content so far is kept
    PartialStop,
    /// The caller invalidated the run; in-flight output was discarded
    Cancelled,
}

/// Progress notifications for a preview surface
#[derive(Debug, Clone)]
pub enum RunEvent {
    Status(String),
    Progress(u8),
    Finished(RunOutcome),
}

/// Handle for aborting a run from outside the engine
///
/// Checked before each batch starts and again when a response arrives, so
/// a response that lands after cancellation is discarded rather than
/// applied to a stale run.
#[derive(Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// Drives sequential batch generation against the backend
///
/// The engine exclusively owns the run state and the accumulated document;
/// `run` takes `&mut self`, so no two runs of one engine can interleave.
pub struct GenerationEngine {
    backend: Arc<dyn GenerationBackend>,
    plan: SectionPlan,
    placeholder: String,
    state: RunState,
    document: AccumulatedDocument,
    cancel: Arc<AtomicBool>,
    events: Option<mpsc::Sender<RunEvent>>,
}

impl GenerationEngine {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        plan: SectionPlan,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            plan,
            placeholder: placeholder.into(),
            state: RunState::idle(),
            document: AccumulatedDocument::new(),
            cancel: Arc::new(AtomicBool::new(false)),
            events: None,
        }
    }

    /// Attach a channel that receives status and progress notifications
    pub fn set_event_sink(&mut self, tx: mpsc::Sender<RunEvent>) {
        self.events = Some(tx);
    }

    /// Obtain a handle that can abort a run from another task
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancel),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn document(&self) -> &AccumulatedDocument {
        &self.document
    }

    /// Run generation over the whole plan
    ///
    /// Resets state and document first, then processes groups strictly in
    /// order - a batch never starts before the previous response has been
    /// fully applied.
    pub async fn run(&mut self, questionnaire: &Questionnaire) -> RunOutcome {
        let total = self.plan.len();
        info!(batches = total, "run: starting generation run");

        self.cancel.store(false, Ordering::SeqCst);
        self.state = RunState::started();
        self.document.clear();

        let groups = self.plan.groups().to_vec();
        for (index, group) in groups.iter().enumerate() {
            let batch = index + 1;

            if self.cancelled() {
                return self.finish_cancelled().await;
            }

            self.set_status(format!(
                "Generating batch {}/{}: {}",
                batch, total, group.label
            ))
            .await;

            let request = GenerateRequest::generate_tz(questionnaire, &group.sections);
            let result = self.backend.generate(request).await;

            if self.cancelled() {
                debug!(batch, "run: response discarded, run was cancelled");
                return self.finish_cancelled().await;
            }

            let body = match result {
                Ok(body) => body,
                Err(err) => {
                    return self
                        .fail(format!("batch {}/{} ({}): {}", batch, total, group.label, err))
                        .await;
                }
            };

            match BatchOutcome::from_response(body, &self.placeholder) {
                BatchOutcome::BackendError(message) => {
                    return self
                        .fail(format!(
                            "batch {}/{} ({}): {}",
                            batch, total, group.label, message
                        ))
                        .await;
                }
                BatchOutcome::Malformed => {
                    return self
                        .fail(format!(
                            "batch {}/{} ({}): malformed response",
                            batch, total, group.label
                        ))
                        .await;
                }
                BatchOutcome::PartialFallback(raw) => {
                    warn!(batch, "run: partial output, stopping early");
                    self.document.push(DocumentSection::unparsed(raw));
                    self.state.is_running = false;
                    self.set_status(format!(
                        "Stopped after partial output in batch {}/{}",
                        batch, total
                    ))
                    .await;
                    self.emit(RunEvent::Finished(RunOutcome::PartialStop)).await;
                    return RunOutcome::PartialStop;
                }
                BatchOutcome::Sections(sections) => {
                    debug!(batch, appended = sections.len(), "run: batch applied");
                    self.document.extend(sections);
                    self.state.progress = progress_for(batch, total);
                    self.emit(RunEvent::Progress(self.state.progress)).await;
                }
            }
        }

        info!("run: all batches complete");
        self.state.is_running = false;
        self.set_status("Generation complete".to_string()).await;
        self.emit(RunEvent::Finished(RunOutcome::Completed)).await;
        RunOutcome::Completed
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    async fn finish_cancelled(&mut self) -> RunOutcome {
        info!("run: cancelled");
        self.state.is_running = false;
        self.set_status("Run cancelled".to_string()).await;
        self.emit(RunEvent::Finished(RunOutcome::Cancelled)).await;
        RunOutcome::Cancelled
    }

    async fn fail(&mut self, message: String) -> RunOutcome {
        warn!(%message, "run: aborted");
        self.state.is_running = false;
        self.state.error_message = message;
        self.emit(RunEvent::Finished(RunOutcome::Failed)).await;
        RunOutcome::Failed
    }

    async fn set_status(&mut self, status: String) {
        debug!(%status, "run: status");
        self.state.current_status = status.clone();
        self.emit(RunEvent::Status(status)).await;
    }

    async fn emit(&self, event: RunEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event).await;
        }
    }
}

/// Progress after `completed` of `total` batches, rounded half up
fn progress_for(completed: usize, total: usize) -> u8 {
    ((completed as f64 / total as f64) * 100.0).round() as u8
}
