pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, LifeOsError};
pub use events::{ChatEvent, EventBus};
pub use id::{new_id, MessageId, SessionId};
pub use types::{Message, MessageKind, ReportPayload, Role, REPORT_LABEL};

pub type Result<T> = std::result::Result<T, LifeOsError>;
