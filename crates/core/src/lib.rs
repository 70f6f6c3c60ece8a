//! Cockpit core types and utilities
//!
//! Settings, durable key/value storage, the client-side route table and
//! logging setup shared by the HTTP client crate and the console binary.

pub mod config;
pub mod error;
pub mod routes;
pub mod storage;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use config::{LoggingSettings, ServerSettings, Settings, StorageSettings};
pub use error::{CoreError, CoreResult};
pub use routes::{ResolvedRoute, RouteDescriptor, RouteMeta, RouteTable, Router, View};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

/// Display name of the application, appended to every page title
pub const APP_NAME: &str = "Agent 智能座舱";
