//! Injected logging capability for the cipher engine.
//!
//! The engine receives a [`Logger`] explicitly rather than reaching for a
//! process-wide sink. Messages are best-effort and never change a result.
//!
//! # Invariants
//!
//! - **No plaintext or key material** is ever passed to a logger.

/// Tracing target used by [`TracingLogger`].
pub const TRACING_TARGET: &str = "seal::cipher";

/// Sink for human-readable engine messages.
#[cfg_attr(test, mockall::automock)]
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards messages to the `tracing` subscriber installed by the host process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: TRACING_TARGET, "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: TRACING_TARGET, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: TRACING_TARGET, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: TRACING_TARGET, "{message}");
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
