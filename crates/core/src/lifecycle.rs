use crate::types::SummaryResult;

/// Phase of the UI relative to an outstanding summarize request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Ready,
    Loading,
    Done(SummaryResult),
    Error(String),
}

impl LifecycleState {
    /// Submissions are only accepted from `Ready` and `Error`.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Self::Ready | Self::Error(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Loading => "loading",
            Self::Done(_) => "done",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Submitted,
    Succeeded(SummaryResult),
    Failed(String),
    Reset,
}

/// Pure transition function. Pairs not listed in the state machine keep the
/// current state:
///
/// ```text
/// Ready   --Submitted--> Loading
/// Error   --Submitted--> Loading
/// Loading --Succeeded--> Done
/// Loading --Failed-->    Error
/// any     --Reset-->     Ready
/// ```
pub fn reduce(state: LifecycleState, event: LifecycleEvent) -> LifecycleState {
    match (state, event) {
        (_, LifecycleEvent::Reset) => LifecycleState::Ready,
        (state, LifecycleEvent::Submitted) if state.accepts_submit() => LifecycleState::Loading,
        (LifecycleState::Loading, LifecycleEvent::Succeeded(result)) => {
            LifecycleState::Done(result)
        }
        (LifecycleState::Loading, LifecycleEvent::Failed(message)) => {
            LifecycleState::Error(message)
        }
        (state, _) => state,
    }
}
