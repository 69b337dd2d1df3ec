//! Persistent user preferences

pub mod store;

pub use store::{FileStore, MemoryStore, PreferenceStore};
