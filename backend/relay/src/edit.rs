use std::path::{Component, Path, PathBuf};

use tracing::debug;

use pluginsync_core::{EditRejection, EditRequest, RelayEvent};

use crate::relay::LifecycleRelay;

/// Capability required to edit plugin files.
pub const EDIT_CAPABILITY: &str = "edit_plugins";
/// Token scope the edit form's nonce is bound to.
pub const EDIT_TOKEN_SCOPE: &str = "edit-plugin";

impl LifecycleRelay {
    /// Handle an admin-ajax edit request.
    ///
    /// Every failed gate aborts silently with no event and no error
    /// surfaced to the caller, mirroring the host's own convention for
    /// this request type. Success touches the target file and emits one
    /// `plugin-edited` event.
    pub fn on_edit_request(&self, request: &EditRequest) {
        if let Err(rejection) = self.try_edit(request) {
            debug!(plugin = %request.identifier, %rejection, "Edit request rejected");
        }
    }

    fn try_edit(&self, request: &EditRequest) -> Result<(), EditRejection> {
        if request.identifier.is_empty() {
            return Err(EditRejection::MissingField("identifier"));
        }
        if request.file.is_empty() {
            return Err(EditRejection::MissingField("file"));
        }
        if request.token.is_empty() {
            return Err(EditRejection::MissingField("token"));
        }
        if !self.env().verify_token(&request.token, EDIT_TOKEN_SCOPE) {
            return Err(EditRejection::BadToken);
        }
        if !self.env().actor_can(EDIT_CAPABILITY) {
            return Err(EditRejection::CapabilityDenied(EDIT_CAPABILITY.to_string()));
        }

        let target = self.resolve_target(request)?;
        if !self.env().file_exists(&target) {
            return Err(EditRejection::NotWritable(request.file.clone()));
        }
        if self.env().touch(&target).is_err() {
            return Err(EditRejection::NotWritable(request.file.clone()));
        }

        self.emit(RelayEvent::PluginEdited {
            identifier: request.identifier.clone(),
            metadata: self.registry_metadata(&request.identifier),
        });
        Ok(())
    }

    /// Map the submitted relative path onto the plugin's own file list.
    /// Absolute paths and parent-directory components are rejected
    /// before the list is even consulted.
    fn resolve_target(&self, request: &EditRequest) -> Result<PathBuf, EditRejection> {
        let submitted = Path::new(&request.file);
        if submitted.is_absolute()
            || submitted
                .components()
                .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(EditRejection::PathTraversal(request.file.clone()));
        }

        self.registry()
            .plugin_files(&request.identifier)
            .into_iter()
            .find(|candidate| candidate.ends_with(submitted))
            .ok_or_else(|| EditRejection::ForeignFile {
                file: request.file.clone(),
                plugin: request.identifier.clone(),
            })
    }
}
