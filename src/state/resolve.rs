use super::calls::CallTracker;
use crate::error::ApiError;
use crate::normalize::{log_error, user_message};
use crate::resolve::{MatchResult, ResolveClient, ResolveRequest, ResolveResponse};
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveState {
    pub loading: bool,
    /// Localized message of the last failure.
    pub error: Option<String>,
    pub result: Option<ResolveResponse>,
    /// Candidates of the last result, cached for cycling.
    pub alternatives: Vec<MatchResult>,
    pub current_alternative: usize,
}

/// State binding for [`ResolveClient`]: `Idle -> Loading -> Idle`.
pub struct ResolveController {
    client: ResolveClient,
    state: watch::Sender<ResolveState>,
    calls: CallTracker,
}

impl ResolveController {
    pub fn new(client: ResolveClient) -> Self {
        let (state, _) = watch::channel(ResolveState::default());
        Self {
            client,
            state,
            calls: CallTracker::new(),
        }
    }

    pub fn state(&self) -> ResolveState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResolveState> {
        self.state.subscribe()
    }

    /// Resolve an issue, record the outcome and hand it back.
    ///
    /// `loading` is cleared on every exit path of the latest call.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<ResolveResponse, ApiError> {
        if self.calls.is_cancelled() {
            return Err(CallTracker::cancelled_error());
        }
        let seq = self.calls.begin();
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let outcome = self.calls.run(self.client.resolve(request)).await;

        if self.calls.is_cancelled() {
            if self.calls.is_latest(seq) {
                self.state.send_if_modified(|s| std::mem::take(&mut s.loading));
            }
            return outcome;
        }
        if !self.calls.is_latest(seq) {
            debug!(seq, "discarding stale resolve result");
            return outcome;
        }

        match &outcome {
            Ok(resp) => {
                let alternatives = resp.candidates();
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.result = Some(resp.clone());
                    s.alternatives = alternatives;
                    s.current_alternative = 0;
                });
            }
            Err(err) => {
                log_error(err, "resolve_controller");
                let message = user_message(err);
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(message);
                });
            }
        }
        outcome
    }

    /// The candidate currently selected.
    pub fn current_match(&self) -> Option<MatchResult> {
        let s = self.state.borrow();
        s.alternatives.get(s.current_alternative).cloned()
    }

    /// Step to the next cached candidate, wrapping around.
    ///
    /// Returns `None` when there is nothing to cycle to.
    pub fn next_alternative(&self) -> Option<MatchResult> {
        let mut next = None;
        self.state.send_if_modified(|s| {
            if s.alternatives.len() < 2 {
                return false;
            }
            s.current_alternative = (s.current_alternative + 1) % s.alternatives.len();
            next = s.alternatives.get(s.current_alternative).cloned();
            true
        });
        next
    }

    /// Back to the initial state. Calls still in flight will not write.
    pub fn reset(&self) {
        self.calls.invalidate();
        self.state.send_replace(ResolveState::default());
    }

    /// Cancel in-flight calls and refuse new ones.
    ///
    /// A cancelled call only clears `loading`; result and error are left as
    /// they were.
    pub fn shutdown(&self) {
        self.calls.cancel();
    }
}
