pub mod router;
pub mod signal;

pub use router::SignalRouter;
pub use signal::{HostSignal, SIGNAL_NAMES};
