//! In-memory record store split across logical submodules.

mod record_store;
mod sort;

pub use record_store::RecordStore;
