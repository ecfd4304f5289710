use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    backend::SummaryBackend,
    error::{SubmitRejected, SummarizeError},
    lifecycle::{LifecycleEvent, LifecycleState, reduce},
    types::{SummaryRequest, SummaryResult},
};

/// Owns the lifecycle state of one summarize flow and the backend it talks to.
///
/// Submission is split in three steps so a UI can render `Loading` before the
/// call resolves: [`begin_submit`](Self::begin_submit) transitions
/// synchronously and hands back an [`InFlight`] future, which the caller runs
/// on whatever executor it has, and [`complete`](Self::complete) applies the
/// outcome. [`submit`](Self::submit) chains all three.
pub struct RequestLifecycleController<B> {
    backend: B,
    state: LifecycleState,
    in_flight: Option<Uuid>,
}

/// A dispatched request. Owns everything it needs, so it can be moved into a task.
pub struct InFlight<B> {
    pub id: Uuid,
    pub request: SummaryRequest,
    backend: B,
}

/// Outcome of an [`InFlight`] request, tagged with the request it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub id: Uuid,
    pub outcome: Result<SummaryResult, SummarizeError>,
}

impl<B: SummaryBackend> InFlight<B> {
    /// Performs exactly one backend call. No retries.
    pub async fn run(self) -> Completion {
        let outcome = self.backend.summarize(&self.request).await;
        Completion {
            id: self.id,
            outcome,
        }
    }
}

impl<B: SummaryBackend> RequestLifecycleController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: LifecycleState::Ready,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn result(&self) -> Option<&SummaryResult> {
        match &self.state {
            LifecycleState::Done(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            LifecycleState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn begin_submit(&mut self, video_url: &str) -> Result<InFlight<B>, SubmitRejected> {
        let video_url = video_url.trim();
        if video_url.is_empty() {
            warn!("rejected submit: empty video URL");
            return Err(SubmitRejected::EmptyUrl);
        }
        match &self.state {
            LifecycleState::Loading => {
                warn!("rejected submit: request already in flight");
                return Err(SubmitRejected::Busy);
            }
            LifecycleState::Done(_) => {
                warn!("rejected submit: reset required");
                return Err(SubmitRejected::ResultShown);
            }
            LifecycleState::Ready | LifecycleState::Error(_) => {}
        }

        let id = Uuid::new_v4();
        self.transition(LifecycleEvent::Submitted);
        self.in_flight = Some(id);
        debug!(%id, video_url, "summarize request dispatched");

        Ok(InFlight {
            id,
            request: SummaryRequest::new(video_url),
            backend: self.backend.clone(),
        })
    }

    /// Applies a completion. Returns `false` when it is stale, i.e. not for the
    /// request currently in flight.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if !self.is_loading() || self.in_flight != Some(completion.id) {
            debug!(id = %completion.id, "discarding stale completion");
            return false;
        }
        self.in_flight = None;

        let event = match completion.outcome {
            Ok(result) => LifecycleEvent::Succeeded(result),
            Err(err) => {
                warn!(id = %completion.id, error = %err, "summarize request failed");
                LifecycleEvent::Failed(err.to_string())
            }
        };
        self.transition(event);
        true
    }

    pub async fn submit(&mut self, video_url: &str) -> Result<&LifecycleState, SubmitRejected> {
        let in_flight = self.begin_submit(video_url)?;
        let completion = in_flight.run().await;
        self.complete(completion);
        Ok(&self.state)
    }

    /// Back to `Ready`, dropping any result, error or in-flight request.
    pub fn reset(&mut self) {
        if let Some(id) = self.in_flight.take() {
            debug!(%id, "abandoning in-flight request");
        }
        self.transition(LifecycleEvent::Reset);
    }

    fn transition(&mut self, event: LifecycleEvent) {
        let from = self.state.name();
        self.state = reduce(std::mem::take(&mut self.state), event);
        if from != self.state.name() {
            info!(from, to = self.state.name(), "lifecycle transition");
        }
    }
}
