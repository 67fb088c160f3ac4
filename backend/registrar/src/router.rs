use tracing::debug;

use pluginsync_host::CycleEndQueue;
use pluginsync_relay::{CycleContext, CycleTask, LifecycleRelay};

use crate::signal::HostSignal;

/// Binds typed host signals to the relay's handler methods.
///
/// This is the only layer that knows signal names and payload shapes;
/// the relay behind it is fully typed. One router serves the process;
/// the driver owns a fresh [`CycleContext`] and [`CycleEndQueue`] per
/// processing cycle and calls [`SignalRouter::end_cycle`] before
/// tearing them down.
pub struct SignalRouter {
    relay: LifecycleRelay,
}

impl SignalRouter {
    pub fn new(relay: LifecycleRelay) -> Self {
        Self { relay }
    }

    pub fn relay(&self) -> &LifecycleRelay {
        &self.relay
    }

    pub fn dispatch(
        &self,
        ctx: &mut CycleContext,
        queue: &mut CycleEndQueue<CycleTask>,
        signal: HostSignal,
    ) {
        debug!(signal = signal.name(), "Dispatching host signal");
        match signal {
            HostSignal::Activated {
                identifier,
                network_wide,
            } => self.relay.on_activated(&identifier, network_wide),
            HostSignal::Deactivated {
                identifier,
                network_wide,
            } => self.relay.on_deactivated(&identifier, network_wide),
            HostSignal::AboutToDelete { identifier } => {
                self.relay.on_about_to_delete(ctx, &identifier);
            }
            HostSignal::Deleted {
                identifier,
                success,
            } => self.relay.on_deleted(ctx, &identifier, success),
            HostSignal::PreInstall { identifier } => self.relay.on_pre_install(ctx, &identifier),
            HostSignal::OperationComplete { details, report } => {
                self.relay.on_operation_complete(ctx, queue, &details, &report);
            }
            HostSignal::EditRequest(request) => self.relay.on_edit_request(&request),
        }
    }

    /// Drain the cycle-end queue and run the relay's deferred tasks.
    /// The host driver calls this once, after all other handlers, right
    /// before cycle teardown.
    pub fn end_cycle(&self, ctx: &mut CycleContext, queue: &mut CycleEndQueue<CycleTask>) {
        for task in queue.drain() {
            self.relay.run_cycle_task(ctx, task);
        }
    }
}
