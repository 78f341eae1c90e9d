//! Configuration schema types for the chat widget.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the widget's stock defaults.

mod api;
mod customer;
mod system;
mod widget;

pub use api::*;
pub use customer::*;
pub use system::*;
pub use widget::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for one widget instance.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WidgetConfig {
    pub widget: WidgetSection,
    pub api: ApiConfig,
    pub customer: CustomerConfig,
    pub events: EventsConfig,
    pub logging: LoggingConfig,
}
