//! AlbumStore trait definition and the persistence error taxonomy.

use super::models::Album;
use thiserror::Error;

/// Failure of a persistence operation.
///
/// `NotFound` is only produced by single-row lookups by id. Everything else a
/// storage backend can fail with is a `StorageFailure`.
#[derive(Debug, Error)]
pub enum AlbumStoreError {
    #[error("album not found")]
    NotFound,

    #[error("storage failure: {0}")]
    StorageFailure(#[source] anyhow::Error),
}

impl From<rusqlite::Error> for AlbumStoreError {
    fn from(err: rusqlite::Error) -> Self {
        AlbumStoreError::StorageFailure(err.into())
    }
}

pub type AlbumStoreResult<T> = std::result::Result<T, AlbumStoreError>;

/// Storage capability for albums.
///
/// Every operation is a single round trip with no transaction spanning more
/// than one statement. Implementations must be usable concurrently from
/// independent request tasks.
#[cfg_attr(test, mockall::automock)]
pub trait AlbumStore: Send + Sync {
    /// Up to `limit` albums in storage order, skipping the first `offset`.
    /// No rows is an empty vector, not an error.
    fn list_albums(&self, offset: usize, limit: usize) -> AlbumStoreResult<Vec<Album>>;

    /// Up to `limit` albums whose artist is exactly `artist`.
    /// No rows is an empty vector, not an error.
    fn list_albums_by_artist(&self, artist: &str, limit: usize) -> AlbumStoreResult<Vec<Album>>;

    /// The album with the given id, or `AlbumStoreError::NotFound`.
    fn get_album(&self, id: &str) -> AlbumStoreResult<Album>;

    /// Insert `album` (its id is ignored) and write the storage-assigned id
    /// back into it.
    fn create_album(&self, album: &mut Album) -> AlbumStoreResult<()>;

    /// Overwrite title, artist and price of the row with `album.id`.
    ///
    /// Succeeds even when no row has that id.
    fn update_album(&self, album: &Album) -> AlbumStoreResult<()>;

    /// Remove the row with the given id.
    ///
    /// Succeeds even when no row has that id.
    fn delete_album(&self, id: &str) -> AlbumStoreResult<()>;
}
