pub mod bus;
pub mod error;
pub mod event;
pub mod operation;
pub mod record;
pub mod sink;

pub use bus::RelayBus;
pub use error::{EditRejection, RelayError};
pub use event::{EventEnvelope, RelayEvent};
pub use operation::{
    EditRequest, ErrorDetail, InstallerReport, OperationAction, OperationDetails, OperationTarget,
    ReportResult,
};
pub use record::{PluginMetadata, PluginRecord};
pub use sink::EventSink;
