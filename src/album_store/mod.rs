//! Album persistence: record model, storage capability and its SQLite backend.

mod models;
mod schema;
mod store;
mod trait_def;

pub use models::{round_price, Album, AlbumBody};
pub use store::{SqliteAlbumStore, DEFAULT_READ_POOL_SIZE};
#[cfg(test)]
pub use trait_def::MockAlbumStore;
pub use trait_def::{AlbumStore, AlbumStoreError, AlbumStoreResult};
