use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A gated request was turned away by the session gate.
pub fn auth_rejected(reason: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %trace_id,
        reason,
        path,
        "Authentication failure"
    );
}

/// An authenticated caller asked for a resource owned by someone else.
pub fn access_forbidden(subject: &str, requested: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ACCESS_FORBIDDEN",
        %trace_id,
        subject = %Redacted(subject),
        requested = %requested.map(Redacted).unwrap_or(Redacted("")),
        "Ownership check failed"
    );
}
