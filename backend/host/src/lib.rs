pub mod cycle;
pub mod traits;

pub use cycle::CycleEndQueue;
pub use traits::{HostEnv, HostRegistry};
