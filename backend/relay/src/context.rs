use std::collections::HashMap;

use pluginsync_core::PluginRecord;

/// Request-scoped snapshot cache.
///
/// Populated at signal points where plugin metadata is still readable
/// (pre-install, about-to-delete) and consulted later, when the
/// underlying resource may already be gone from the registry.
#[derive(Debug, Default)]
pub struct MetadataCache {
    entries: HashMap<String, PluginRecord>,
}

impl MetadataCache {
    pub fn record(&mut self, snapshot: PluginRecord) {
        self.entries.insert(snapshot.identifier.clone(), snapshot);
    }

    pub fn get(&self, identifier: &str) -> Option<&PluginRecord> {
        self.entries.get(identifier)
    }

    /// Return and remove the stored snapshot. At most one consumption
    /// per identifier per cycle; used by the delete path.
    pub fn take(&mut self, identifier: &str) -> Option<PluginRecord> {
        self.entries.remove(identifier)
    }
}

/// Aggregated state for one bulk update, staged between the completion
/// signal and the deferred flush. At most one instance live per cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBatchState {
    pub is_autoupdate: bool,
    pub records: Vec<PluginRecord>,
}

/// All mutable relay state for one processing cycle.
///
/// Owned by the cycle driver, passed into every handler, and dropped at
/// cycle end. Nothing in here survives into the next cycle.
#[derive(Debug, Default)]
pub struct CycleContext {
    pub snapshots: MetadataCache,
    pub update_batch: Option<UpdateBatchState>,
    pub flush_scheduled: bool,
}

impl CycleContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_take_removes_entry() {
        let mut cache = MetadataCache::default();
        cache.record(PluginRecord::new("foo/foo.php", "Foo", "1.0"));

        let taken = cache.take("foo/foo.php").unwrap();
        assert_eq!(taken.name, "Foo");
        assert!(cache.take("foo/foo.php").is_none());
    }

    #[test]
    fn test_cache_get_is_non_consuming() {
        let mut cache = MetadataCache::default();
        cache.record(PluginRecord::new("foo/foo.php", "Foo", "1.0"));

        assert!(cache.get("foo/foo.php").is_some());
        assert!(cache.get("foo/foo.php").is_some());
    }

    #[test]
    fn test_cache_record_overwrites() {
        let mut cache = MetadataCache::default();
        cache.record(PluginRecord::new("foo/foo.php", "Foo", "1.0"));
        cache.record(PluginRecord::new("foo/foo.php", "Foo", "2.0"));

        assert_eq!(cache.get("foo/foo.php").unwrap().version, "2.0");
    }

    #[test]
    fn test_fresh_context_has_no_state() {
        let ctx = CycleContext::new();
        assert!(ctx.update_batch.is_none());
        assert!(!ctx.flush_scheduled);
        assert!(ctx.snapshots.get("anything").is_none());
    }
}
