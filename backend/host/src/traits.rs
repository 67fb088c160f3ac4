use std::path::{Path, PathBuf};

use anyhow::Result;

use pluginsync_core::PluginMetadata;

/// Read-only view of the host application's plugin registry.
///
/// Implemented by the embedding application; the relay only queries it
/// and never mutates host state through it.
pub trait HostRegistry: Send + Sync {
    /// All installed plugins with their metadata, keyed by identifier.
    fn all_plugins(&self) -> Vec<(String, PluginMetadata)>;

    /// Read metadata straight from the plugin's main file.
    ///
    /// Returns `None` once the file is gone, which is how the relay
    /// detects that a resource has already been removed.
    fn read_metadata(&self, identifier: &str) -> Option<PluginMetadata>;

    /// Files belonging to the given plugin.
    fn plugin_files(&self, identifier: &str) -> Vec<PathBuf>;
}

/// Host-side primitives the relay consumes as black boxes: capability
/// checks, request-token verification, file probes, and process flags.
pub trait HostEnv: Send + Sync {
    /// Whether the current actor holds the named capability.
    fn actor_can(&self, capability: &str) -> bool;

    /// Verify a request nonce against an action scope.
    fn verify_token(&self, token: &str, scope: &str) -> bool;

    fn file_exists(&self, path: &Path) -> bool;

    /// Open the file for writing and close it again (the edit flow's
    /// only filesystem side effect).
    fn touch(&self, path: &Path) -> Result<()>;

    /// Process-wide "an autoupdate is in progress" flag, read at the
    /// moment a completion signal is reduced.
    fn autoupdate_in_progress(&self) -> bool;
}
