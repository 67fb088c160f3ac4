pub mod classifier;
pub mod context;
pub mod edit;
pub mod relay;

#[cfg(test)]
mod testutil;

pub use context::{CycleContext, MetadataCache, UpdateBatchState};
pub use edit::{EDIT_CAPABILITY, EDIT_TOKEN_SCOPE};
pub use relay::{CycleTask, LifecycleRelay};
