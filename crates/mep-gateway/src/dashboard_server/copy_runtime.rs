//! Per-session copy feedback and the copy endpoint used by the share modal.

use super::*;

#[derive(Default)]
struct CopySessions {
    next_stamp: u64,
    by_key: HashMap<String, (u64, Arc<CopyFeedback>)>,
    /// Last-copy stamp to session key, oldest first.
    by_stamp: BTreeMap<u64, String>,
}

/// Copy feedback flags keyed by sanitized session key.
///
/// Holds at most `max_sessions` entries; copying in a new session past the cap
/// evicts the session whose last copy is oldest.
pub(super) struct CopyFeedbackRegistry {
    reset_after: Duration,
    max_sessions: usize,
    sessions: Mutex<CopySessions>,
}

impl CopyFeedbackRegistry {
    pub(super) fn new(reset_after: Duration) -> Self {
        Self::with_max_sessions(reset_after, MAX_COPY_FEEDBACK_SESSIONS)
    }

    pub(super) fn with_max_sessions(reset_after: Duration, max_sessions: usize) -> Self {
        Self {
            reset_after,
            max_sessions: max_sessions.max(1),
            sessions: Mutex::new(CopySessions::default()),
        }
    }

    pub(super) fn is_copied(&self, session_key: &str) -> bool {
        self.sessions
            .lock()
            .ok()
            .and_then(|sessions| {
                sessions
                    .by_key
                    .get(session_key)
                    .map(|(_, feedback)| feedback.is_copied())
            })
            .unwrap_or(false)
    }

    pub(super) fn mark_copied(&self, session_key: &str) {
        let feedback = {
            let Ok(mut guard) = self.sessions.lock() else {
                return;
            };
            let sessions = &mut *guard;
            let stamp = sessions.next_stamp;
            sessions.next_stamp = sessions.next_stamp.wrapping_add(1);

            let feedback = match sessions.by_key.remove(session_key) {
                Some((previous_stamp, feedback)) => {
                    sessions.by_stamp.remove(&previous_stamp);
                    feedback
                }
                None => {
                    while sessions.by_key.len() >= self.max_sessions {
                        let Some((_, evicted)) = sessions.by_stamp.pop_first() else {
                            break;
                        };
                        sessions.by_key.remove(&evicted);
                        tracing::debug!(session_key = %evicted, "evicted copy feedback session");
                    }
                    Arc::new(CopyFeedback::new(self.reset_after))
                }
            };
            sessions
                .by_key
                .insert(session_key.to_string(), (stamp, Arc::clone(&feedback)));
            sessions.by_stamp.insert(stamp, session_key.to_string());
            feedback
        };
        feedback.mark_copied();
    }

    #[cfg(test)]
    pub(super) fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .map(|sessions| sessions.by_key.len())
            .unwrap_or(0)
    }
}

#[derive(Debug, Deserialize, Default)]
pub(super) struct CopyRequest {
    #[serde(default)]
    session_key: String,
}

#[derive(Debug, Serialize)]
struct CopyResponse {
    session_key: String,
    copied: bool,
    reset_after_ms: u64,
    payload: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct CopyStatusResponse {
    session_key: String,
    copied: bool,
}

fn parse_copy_request(body: &Bytes) -> Result<CopyRequest, DashboardApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CopyRequest::default());
    }
    serde_json::from_slice::<CopyRequest>(body).map_err(|error| {
        DashboardApiError::bad_request(
            "malformed_json",
            format!("failed to parse copy request body: {error}"),
        )
    })
}

pub(super) async fn handle_copy_mark(
    State(state): State<Arc<DashboardServerState>>,
    body: Bytes,
) -> Response {
    let request = match parse_copy_request(&body) {
        Ok(request) => request,
        Err(error) => return error.into_response(),
    };
    let session_key = sanitize_session_key(&request.session_key);
    state.copy_feedback.mark_copied(&session_key);
    tracing::debug!(session_key = %session_key, "diagram definition copy recorded");
    Json(CopyResponse {
        copied: state.copy_feedback.is_copied(&session_key),
        session_key,
        reset_after_ms: state.copy_reset_ms(),
        payload: DIAGRAM_DEFINITION,
    })
    .into_response()
}

pub(super) async fn handle_copy_status(
    State(state): State<Arc<DashboardServerState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<CopyStatusResponse> {
    let pairs = query_pairs(query);
    let session = last_query_value(&pairs, "session").unwrap_or_default();
    let session_key = sanitize_session_key(session);
    Json(CopyStatusResponse {
        copied: state.copy_feedback.is_copied(&session_key),
        session_key,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_copy_request, CopyFeedbackRegistry};
    use axum::body::Bytes;
    use std::time::Duration;

    #[test]
    fn unit_parse_copy_request_accepts_empty_body_as_default_session() {
        let request = parse_copy_request(&Bytes::from_static(b"  ")).expect("empty body");
        assert!(request.session_key.is_empty());
    }

    #[test]
    fn regression_parse_copy_request_rejects_malformed_json() {
        let error = parse_copy_request(&Bytes::from_static(b"{not json")).expect_err("malformed");
        assert_eq!(error.code, "malformed_json");
    }

    #[tokio::test]
    async fn functional_registry_tracks_sessions_independently() {
        let registry = CopyFeedbackRegistry::new(Duration::from_millis(200));
        registry.mark_copied("alpha");
        assert!(registry.is_copied("alpha"));
        assert!(!registry.is_copied("beta"));
        registry.mark_copied("alpha");
        assert_eq!(registry.session_count(), 1);
    }

    #[tokio::test]
    async fn regression_registry_caps_active_sessions_and_evicts_oldest() {
        let registry = CopyFeedbackRegistry::with_max_sessions(Duration::from_secs(2), 3);
        for key in ["a", "b", "c"] {
            registry.mark_copied(key);
        }
        registry.mark_copied("a");
        registry.mark_copied("d");
        assert_eq!(registry.session_count(), 3);
        assert!(!registry.is_copied("b"));
        assert!(registry.is_copied("a"));
        assert!(registry.is_copied("c"));
        assert!(registry.is_copied("d"));

        let bounded = CopyFeedbackRegistry::new(Duration::from_secs(2));
        for index in 0..1_500 {
            bounded.mark_copied(&format!("session-{index}"));
        }
        assert_eq!(bounded.session_count(), super::MAX_COPY_FEEDBACK_SESSIONS);
        assert!(bounded.is_copied("session-1499"));
        assert!(!bounded.is_copied("session-0"));
    }
}
