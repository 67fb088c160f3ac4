use std::sync::Arc;

use tracing::{debug, error, info, warn};

use pluginsync_core::{
    EventEnvelope, EventSink, InstallerReport, OperationAction, OperationDetails, OperationTarget,
    PluginMetadata, PluginRecord, RelayError, RelayEvent,
};
use pluginsync_host::{CycleEndQueue, HostEnv, HostRegistry};

use crate::classifier;
use crate::context::{CycleContext, UpdateBatchState};

/// Priority of the deferred flush on the cycle-end queue. High enough
/// that it runs after the host's own teardown tasks have settled.
const FLUSH_PRIORITY: i32 = 10;

/// Tasks the relay enqueues on the host's cycle-end queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleTask {
    FlushUpdateBatch,
}

/// The lifecycle event aggregation and normalization relay.
///
/// One instance serves the whole process; all per-cycle state lives in
/// the [`CycleContext`] the driver passes into each handler. Handlers
/// never return errors — malformed input degrades to a logged no-op.
pub struct LifecycleRelay {
    registry: Arc<dyn HostRegistry>,
    env: Arc<dyn HostEnv>,
    sink: Arc<dyn EventSink>,
}

impl LifecycleRelay {
    pub fn new(
        registry: Arc<dyn HostRegistry>,
        env: Arc<dyn HostEnv>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            registry,
            env,
            sink,
        }
    }

    pub(crate) fn env(&self) -> &dyn HostEnv {
        self.env.as_ref()
    }

    pub(crate) fn registry(&self) -> &dyn HostRegistry {
        self.registry.as_ref()
    }

    pub(crate) fn emit(&self, event: RelayEvent) {
        debug!(event = %event, "Emitting lifecycle event");
        self.sink.emit(EventEnvelope::new(event));
    }

    /// Resolve a plugin snapshot: live registry first, then the
    /// cycle-scoped cache, then a bare identifier-only record.
    pub fn plugin_info(&self, ctx: &CycleContext, identifier: &str) -> PluginRecord {
        if let Some((_, metadata)) = self
            .registry
            .all_plugins()
            .into_iter()
            .find(|(id, _)| id == identifier)
        {
            return PluginRecord::from_metadata(identifier, &metadata);
        }
        if let Some(snapshot) = ctx.snapshots.get(identifier) {
            return snapshot.clone();
        }
        PluginRecord::bare(identifier)
    }

    /// Fresh name/version for activation/deactivation payloads, looked
    /// up at emission time. Empty when the registry entry is gone.
    pub(crate) fn registry_metadata(&self, identifier: &str) -> PluginMetadata {
        self.registry
            .all_plugins()
            .into_iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, metadata)| metadata)
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Activation / deactivation pass-through with enrichment
    // ------------------------------------------------------------------

    pub fn on_activated(&self, identifier: &str, network_wide: bool) {
        self.emit(RelayEvent::PluginActivated {
            identifier: identifier.to_string(),
            network_wide,
            metadata: self.registry_metadata(identifier),
        });
    }

    pub fn on_deactivated(&self, identifier: &str, network_wide: bool) {
        self.emit(RelayEvent::PluginDeactivated {
            identifier: identifier.to_string(),
            network_wide,
            metadata: self.registry_metadata(identifier),
        });
    }

    // ------------------------------------------------------------------
    // Metadata capture points
    // ------------------------------------------------------------------

    /// Capture a snapshot of the plugin about to be overwritten, so the
    /// completion handler can still name it if the registry row is
    /// unreadable by then.
    pub fn on_pre_install(&self, ctx: &mut CycleContext, identifier: &str) {
        if let Some(metadata) = self.registry.read_metadata(identifier) {
            debug!(plugin = %identifier, "Captured pre-install snapshot");
            ctx.snapshots
                .record(PluginRecord::from_metadata(identifier, &metadata));
        }
    }

    /// Phase one of the delete protocol: the files still exist, so read
    /// live metadata now. Falls back to a placeholder record.
    pub fn on_about_to_delete(&self, ctx: &mut CycleContext, identifier: &str) {
        let record = match self.registry.read_metadata(identifier) {
            Some(metadata) => PluginRecord::from_metadata(identifier, &metadata),
            None => PluginRecord::placeholder(identifier),
        };
        debug!(plugin = %identifier, name = %record.name, "Captured pre-delete snapshot");
        ctx.snapshots.record(record);
    }

    /// Phase two: the resource is gone; emit using the captured snapshot.
    ///
    /// A missing snapshot means the host broke its signal-ordering
    /// contract. Downstream still expects exactly one deletion event, so
    /// release builds emit a placeholder instead of dropping it.
    pub fn on_deleted(&self, ctx: &mut CycleContext, identifier: &str, success: bool) {
        let record = match ctx.snapshots.take(identifier) {
            Some(record) => record,
            None => {
                let err = RelayError::SnapshotMissing(identifier.to_string());
                debug_assert!(false, "{err}");
                error!(plugin = %identifier, %err, "Emitting placeholder deletion record");
                PluginRecord::placeholder(identifier)
            }
        };
        self.emit(RelayEvent::PluginDeleted {
            identifier: identifier.to_string(),
            success,
            record,
        });
    }

    // ------------------------------------------------------------------
    // Batch reducer
    // ------------------------------------------------------------------

    /// Reduce an "installer finished" signal into either an immediate
    /// emission (install, or per-plugin failures) or a staged batch
    /// flushed once at cycle end (successful bulk update).
    pub fn on_operation_complete(
        &self,
        ctx: &mut CycleContext,
        queue: &mut CycleEndQueue<CycleTask>,
        details: &OperationDetails,
        report: &InstallerReport,
    ) {
        if details.target != Some(OperationTarget::Plugin) {
            return;
        }
        let Some(action) = details.action else {
            return;
        };
        let identifiers = match resolve_identifiers(details, report) {
            Ok(identifiers) => identifiers,
            Err(err) => {
                debug!(%err, "Dropping completion signal");
                return;
            }
        };

        match action {
            OperationAction::Update => self.reduce_update(ctx, queue, &identifiers, report),
            OperationAction::Install => {
                let records = identifiers
                    .iter()
                    .map(|identifier| self.plugin_info(ctx, identifier))
                    .collect();
                self.emit(RelayEvent::PluginInstalled { records });
            }
        }
    }

    fn reduce_update(
        &self,
        ctx: &mut CycleContext,
        queue: &mut CycleEndQueue<CycleTask>,
        identifiers: &[String],
        report: &InstallerReport,
    ) {
        let is_autoupdate = self.env.autoupdate_in_progress();

        if let Some(detail) = classifier::classify(report) {
            // The whole batch failed together: one classified outcome,
            // one event per affected plugin, nothing staged.
            for identifier in identifiers {
                let record = self.plugin_info(ctx, identifier);
                self.emit(RelayEvent::update_failed(record, &detail, is_autoupdate));
            }
            return;
        }

        let records: Vec<PluginRecord> = identifiers
            .iter()
            .map(|identifier| self.plugin_info(ctx, identifier))
            .collect();
        if let Some(previous) = &ctx.update_batch {
            warn!(
                discarded = previous.records.len(),
                "Second bulk update completed before flush; replacing staged batch"
            );
        }
        ctx.update_batch = Some(UpdateBatchState {
            is_autoupdate,
            records,
        });
        self.ensure_flush_scheduled(ctx, queue);
    }

    // ------------------------------------------------------------------
    // Deferred emission scheduler
    // ------------------------------------------------------------------

    /// Register the flush task at most once per cycle.
    pub fn ensure_flush_scheduled(
        &self,
        ctx: &mut CycleContext,
        queue: &mut CycleEndQueue<CycleTask>,
    ) {
        if ctx.flush_scheduled {
            return;
        }
        queue.schedule(FLUSH_PRIORITY, CycleTask::FlushUpdateBatch);
        ctx.flush_scheduled = true;
        debug!("Deferred update flush scheduled");
    }

    /// Run a drained cycle-end task. Called by the driver.
    pub fn run_cycle_task(&self, ctx: &mut CycleContext, task: CycleTask) {
        match task {
            CycleTask::FlushUpdateBatch => self.flush_updates(ctx),
        }
    }

    /// Emit the staged batch as one aggregated event. No-op when nothing
    /// was staged (the task is only scheduled when staging occurs, but a
    /// stray invocation must not crash).
    pub fn flush_updates(&self, ctx: &mut CycleContext) {
        let Some(batch) = ctx.update_batch.take() else {
            return;
        };
        info!(
            count = batch.records.len(),
            autoupdate = batch.is_autoupdate,
            "Flushing aggregated plugin updates"
        );
        self.emit(RelayEvent::PluginsUpdated {
            records: batch.records,
            is_autoupdate: batch.is_autoupdate,
        });
    }
}

/// Prefer the explicit plural list, then the singular field, then the
/// installer skin's "what was installed" accessor.
fn resolve_identifiers(
    details: &OperationDetails,
    report: &InstallerReport,
) -> Result<Vec<String>, RelayError> {
    if !details.plugins.is_empty() {
        return Ok(details.plugins.clone());
    }
    if let Some(single) = details.plugin.as_deref() {
        if !single.is_empty() {
            return Ok(vec![single.to_string()]);
        }
    }
    if let Some(installed) = report.installed.as_deref() {
        if !installed.is_empty() {
            return Ok(vec![installed.to_string()]);
        }
    }
    Err(RelayError::NoIdentifiers)
}
