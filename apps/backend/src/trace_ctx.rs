//! Trace context propagation using tokio task-local storage.
//!
//! The request trace middleware wraps every request future in
//! [`with_trace_id`], so anything running inside a handler (including
//! error rendering) can recover the current trace id without threading
//! it through call signatures.

tokio::task_local! {
    static TRACE_ID: String;
}

/// Runs `f` with the given trace id installed for the duration of the future.
pub async fn with_trace_id<F, R>(trace_id: String, f: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, f).await
}

/// Returns the current trace id, or `"unknown"` when called outside a
/// request scope (e.g. from a detached task).
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "unknown".to_string())
}
