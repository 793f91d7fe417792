//! Structured trace events emitted by the validation pipeline.

use std::sync::{Arc, Mutex};

/// Pipeline-relevant trace events. Each validation run emits a bounded
/// sequence of these; callers subscribe via [`Tracer::register_tracer`] the
/// same way a log appender subscribes to a logger.
#[derive(Debug, Clone)]
pub enum TraceEvent {
    /// A validation run started for this transaction hash.
    ValidationStarted(String),
    /// The run was accepted; carries the unconfirmed-input count.
    ValidationAccepted { tx_hash: String, unconfirmed_inputs: usize },
    /// The run was rejected; carries the error's `Display` rendering.
    ValidationRejected { tx_hash: String, error: String },
    /// A single input finished `connect_input`.
    InputConnected { tx_hash: String, input_index: usize },
    /// Nova-gated rule activation state observed for a run.
    NovaGate { active: bool, chain_height: u64 },
    /// Emitted metric (name, value), fee totals, pipeline latency, etc.
    Metric(String, f64),
}

impl TraceEvent {
    pub fn description(&self) -> String {
        match self {
            TraceEvent::ValidationStarted(hash) => format!("validation started: {hash}"),
            TraceEvent::ValidationAccepted { tx_hash, unconfirmed_inputs } => {
                format!("validation accepted: {tx_hash} (unconfirmed_inputs={unconfirmed_inputs})")
            }
            TraceEvent::ValidationRejected { tx_hash, error } => format!("validation rejected: {tx_hash}: {error}"),
            TraceEvent::InputConnected { tx_hash, input_index } => {
                format!("input connected: {tx_hash}[{input_index}]")
            }
            TraceEvent::NovaGate { active, chain_height } => format!("nova gate: active={active} height={chain_height}"),
            TraceEvent::Metric(name, value) => format!("metric {name} = {value}"),
        }
    }
}

/// Fan-out tracer: any number of handlers may subscribe to the same event
/// stream.
#[derive(Clone, Default)]
pub struct Tracer {
    handlers: Arc<Mutex<Vec<Box<dyn Fn(&TraceEvent) + Send + Sync>>>>,
}

impl Tracer {
    pub fn trace(&self, event: TraceEvent) {
        let handlers = self.handlers.lock().unwrap();
        for handler in handlers.iter() {
            handler(&event);
        }
    }

    pub fn register_tracer<T: Fn(&TraceEvent) + Send + Sync + 'static>(&self, handler: T) {
        self.handlers.lock().unwrap().push(Box::new(handler));
    }

    pub fn clear_handlers(&self) {
        self.handlers.lock().unwrap().clear();
    }
}
