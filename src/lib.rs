//! Album Catalog Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod album_store;
pub mod config;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use album_store::{Album, AlbumStore, AlbumStoreError, SqliteAlbumStore};
pub use server::{run_server, RequestsLoggingLevel};
