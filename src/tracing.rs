//! Structured logging for the validator, built on `tracing`.
//!
//! The validator itself emits spans/events via the `tracing` crate macros
//! wherever it calls `chain`/`pool`; [`Tracer`] additionally fans each
//! [`TraceEvent`] out to any handlers a caller registers, for callers who
//! want structured events rather than textual logs (e.g. metrics export).

pub mod tracers;

use tracing_subscriber::EnvFilter;

pub use tracers::{TraceEvent, Tracer};

/// Initializes the global `tracing` subscriber and holds the validator's
/// event [`Tracer`]. One instance per process.
pub struct Tracing {
    pub tracer: Tracer,
}

impl Tracing {
    /// Installs the `tracing_subscriber` global default, reading filter
    /// directives from `RUST_LOG`.
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
        Self { tracer: Tracer::default() }
    }

    pub fn validation_started(&self, tx_hash: &str) {
        self.tracer.trace(TraceEvent::ValidationStarted(tx_hash.to_string()));
        tracing::debug!(tx_hash, "validation started");
    }

    pub fn validation_accepted(&self, tx_hash: &str, unconfirmed_inputs: usize) {
        self.tracer.trace(TraceEvent::ValidationAccepted {
            tx_hash: tx_hash.to_string(),
            unconfirmed_inputs,
        });
        tracing::info!(tx_hash, unconfirmed_inputs, "validation accepted");
    }

    pub fn validation_rejected(&self, tx_hash: &str, error: &str) {
        self.tracer.trace(TraceEvent::ValidationRejected {
            tx_hash: tx_hash.to_string(),
            error: error.to_string(),
        });
        tracing::warn!(tx_hash, error, "validation rejected");
    }
}

impl Default for Tracing {
    fn default() -> Self {
        Self::new()
    }
}
