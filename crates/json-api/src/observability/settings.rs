//! Values the request middleware reads on every request.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::telemetry::TelemetryConfig;

static SLOW_REQUEST_MS: AtomicU64 = AtomicU64::new(1_000);
static CONTINUE_REMOTE_PARENTS: AtomicBool = AtomicBool::new(false);

pub(super) fn configure(config: &TelemetryConfig) {
    SLOW_REQUEST_MS.store(config.slow_request_ms, Ordering::Relaxed);
    CONTINUE_REMOTE_PARENTS.store(config.export.continues_remote_parents(), Ordering::Relaxed);
}

pub(super) fn slow_request_ms() -> u64 {
    SLOW_REQUEST_MS.load(Ordering::Relaxed)
}

pub(super) fn continue_remote_parents() -> bool {
    CONTINUE_REMOTE_PARENTS.load(Ordering::Relaxed)
}
