//! Fake collaborators shared by the relay's unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use pluginsync_core::{EventEnvelope, EventSink, PluginMetadata, RelayEvent};
use pluginsync_host::{HostEnv, HostRegistry};

use crate::relay::LifecycleRelay;

#[derive(Default)]
pub(crate) struct FakeRegistry {
    listed: Vec<(String, PluginMetadata)>,
    on_disk: HashMap<String, PluginMetadata>,
    files: HashMap<String, Vec<PathBuf>>,
}

impl FakeRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Plugin visible in the registry listing and readable from disk.
    pub(crate) fn with_plugin(mut self, identifier: &str, name: &str, version: &str) -> Self {
        let metadata = PluginMetadata::new(name, version);
        self.listed.push((identifier.to_string(), metadata.clone()));
        self.on_disk.insert(identifier.to_string(), metadata);
        self
    }

    /// Metadata readable from the plugin file only, not listed (the
    /// registry row is already gone or not yet refreshed).
    pub(crate) fn with_file_metadata(mut self, identifier: &str, name: &str, version: &str) -> Self {
        self.on_disk
            .insert(identifier.to_string(), PluginMetadata::new(name, version));
        self
    }

    pub(crate) fn with_files(mut self, identifier: &str, files: &[&str]) -> Self {
        self.files.insert(
            identifier.to_string(),
            files.iter().map(PathBuf::from).collect(),
        );
        self
    }
}

impl HostRegistry for FakeRegistry {
    fn all_plugins(&self) -> Vec<(String, PluginMetadata)> {
        self.listed.clone()
    }

    fn read_metadata(&self, identifier: &str) -> Option<PluginMetadata> {
        self.on_disk.get(identifier).cloned()
    }

    fn plugin_files(&self, identifier: &str) -> Vec<PathBuf> {
        self.files.get(identifier).cloned().unwrap_or_default()
    }
}

#[derive(Clone)]
pub(crate) struct FakeEnv {
    capabilities_granted: bool,
    tokens_accepted: bool,
    autoupdate: bool,
    touch_fails: bool,
    existing: Vec<PathBuf>,
    touched: Arc<Mutex<Vec<PathBuf>>>,
}

impl Default for FakeEnv {
    fn default() -> Self {
        Self {
            capabilities_granted: true,
            tokens_accepted: true,
            autoupdate: false,
            touch_fails: false,
            existing: Vec::new(),
            touched: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeEnv {
    pub(crate) fn autoupdating(mut self) -> Self {
        self.autoupdate = true;
        self
    }

    pub(crate) fn deny_capabilities(mut self) -> Self {
        self.capabilities_granted = false;
        self
    }

    pub(crate) fn reject_tokens(mut self) -> Self {
        self.tokens_accepted = false;
        self
    }

    pub(crate) fn fail_touch(mut self) -> Self {
        self.touch_fails = true;
        self
    }

    pub(crate) fn with_existing(mut self, path: &str) -> Self {
        self.existing.push(PathBuf::from(path));
        self
    }

    pub(crate) fn touched(&self) -> Vec<PathBuf> {
        self.touched.lock().unwrap().clone()
    }
}

impl HostEnv for FakeEnv {
    fn actor_can(&self, _capability: &str) -> bool {
        self.capabilities_granted
    }

    fn verify_token(&self, _token: &str, _scope: &str) -> bool {
        self.tokens_accepted
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.existing.iter().any(|p| p == path)
    }

    fn touch(&self, path: &Path) -> Result<()> {
        if self.touch_fails {
            bail!("permission denied: {}", path.display());
        }
        self.touched.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn autoupdate_in_progress(&self) -> bool {
        self.autoupdate
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    envelopes: Mutex<Vec<EventEnvelope>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<RelayEvent> {
        self.envelopes
            .lock()
            .unwrap()
            .iter()
            .map(|envelope| envelope.event.clone())
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, envelope: EventEnvelope) {
        self.envelopes.lock().unwrap().push(envelope);
    }
}

pub(crate) fn relay_with(
    registry: FakeRegistry,
    env: FakeEnv,
) -> (LifecycleRelay, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let relay = LifecycleRelay::new(Arc::new(registry), Arc::new(env), sink.clone());
    (relay, sink)
}
