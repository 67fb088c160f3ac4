use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::event::EventEnvelope;
use crate::sink::EventSink;

/// Channel sink connecting the relay to an async sync pipeline.
///
/// The relay side sends synchronously (unbounded, never blocks inside a
/// signal handler); the pipeline consumes from the paired receiver.
pub struct RelayBus {
    tx: mpsc::UnboundedSender<EventEnvelope>,
}

impl RelayBus {
    /// Create the bus and hand back the pipeline's receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<EventEnvelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        info!("Relay bus initialized");
        (Self { tx }, rx)
    }
}

impl EventSink for RelayBus {
    fn emit(&self, envelope: EventEnvelope) {
        debug!(event = %envelope.event, "Forwarding event to sync pipeline");
        if self.tx.send(envelope).is_err() {
            warn!("Sync pipeline receiver dropped; event discarded");
        }
    }
}
