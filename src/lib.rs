//! Core library surface for the survival backpack organizer.
//!
//! The record store is usable on its own; the `ui` module wraps it in the
//! interactive menu the binary runs.
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

pub use config::{Cli, Settings};
pub use error::{Field, RecordError};
pub use models::{validate_name, FieldLimit, Record, FIELD_CAPACITY};
pub use store::RecordStore;
pub use ui::{run_app, App};
