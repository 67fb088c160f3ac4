use crate::event::EventEnvelope;

/// Downstream handler for normalized lifecycle events, supplied by the
/// embedding application at initialization.
///
/// Implementations must not block: the relay emits from synchronous
/// signal handlers inside the host's processing cycle.
pub trait EventSink: Send + Sync {
    fn emit(&self, envelope: EventEnvelope);
}
