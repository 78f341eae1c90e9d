pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, WidgetError};
pub use events::{Event, EventBus};
pub use id::{new_id, ConversationId, SessionId};
pub use types::{ChatMessage, Color, Role};

pub type Result<T> = std::result::Result<T, WidgetError>;
