//! Core library surface for the Store Directory Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces.

pub mod error;
pub mod logging;
pub mod models;
pub mod paths;
pub mod publish;
pub mod store;
pub mod ui;

/// Convenience re-exports for the persistence layer, typically used by
/// `main.rs` to bring the record document into memory.
pub use store::{RecordId, RecordStore};

/// The primary domain type that other layers manipulate.
pub use models::Record;

/// The publish step and its outcome.
pub use publish::{PublishOutcome, Publisher};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
