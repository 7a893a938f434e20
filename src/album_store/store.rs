//! SQLite-backed album store.

use super::models::{round_price, Album};
use super::schema::ALBUM_VERSIONED_SCHEMAS;
use super::trait_def::{AlbumStore, AlbumStoreError, AlbumStoreResult};
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{anyhow, bail, Context, Result};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// SQLite album store with one write connection and a round-robin pool of
/// read-only connections.
#[derive(Clone)]
pub struct SqliteAlbumStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

fn prepare_schema(conn: &Connection) -> Result<()> {
    let latest_version = ALBUM_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &ALBUM_VERSIONED_SCHEMAS[latest_version];

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!("Creating album db schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if db_version < BASE_DB_VERSION as i64 {
        bail!(
            "Database has user_version {}, it was not created by this server",
            db_version
        );
    }
    let version = (db_version - BASE_DB_VERSION as i64) as usize;
    if version != latest_version {
        bail!(
            "Album db is at schema version {}, this server expects version {}",
            version,
            latest_version
        );
    }

    latest_schema
        .validate(conn)
        .context("Album db schema validation failed")
}

fn lock(conn: &Mutex<Connection>) -> AlbumStoreResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| AlbumStoreError::StorageFailure(anyhow!("connection lock poisoned")))
}

impl SqliteAlbumStore {
    /// Open (creating if needed) the album database at `db_path`.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `read_pool_size` - Number of read-only connections, at least 1
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path = db_path.as_ref();

        let write_conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open album database {:?}", db_path))?;

        prepare_schema(&write_conn)?;
        write_conn.pragma_update(None, "journal_mode", "WAL")?;

        let album_count: i64 =
            write_conn.query_row("SELECT COUNT(*) FROM album", [], |r| r.get(0))?;
        info!("Opened album db {:?} with {} albums", db_path, album_count);

        let read_pool_size = read_pool_size.max(1);
        let mut read_pool = Vec::with_capacity(read_pool_size);
        for _ in 0..read_pool_size {
            let read_conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        Ok(SqliteAlbumStore {
            read_pool,
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_index: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn query_albums<P: rusqlite::Params>(&self, sql: &str, params: P) -> AlbumStoreResult<Vec<Album>> {
        let conn = self.get_read_conn();
        let conn = lock(&conn)?;
        let mut stmt = conn.prepare_cached(sql)?;
        let albums = stmt
            .query_map(params, Album::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(albums)
    }
}

impl AlbumStore for SqliteAlbumStore {
    fn list_albums(&self, offset: usize, limit: usize) -> AlbumStoreResult<Vec<Album>> {
        self.query_albums(
            "SELECT id, title, artist, price FROM album ORDER BY id LIMIT ?1 OFFSET ?2",
            params![limit as i64, offset as i64],
        )
    }

    fn list_albums_by_artist(&self, artist: &str, limit: usize) -> AlbumStoreResult<Vec<Album>> {
        self.query_albums(
            "SELECT id, title, artist, price FROM album WHERE artist = ?1 ORDER BY id LIMIT ?2",
            params![artist, limit as i64],
        )
    }

    fn get_album(&self, id: &str) -> AlbumStoreResult<Album> {
        let conn = self.get_read_conn();
        let conn = lock(&conn)?;
        let result = conn.query_row(
            "SELECT title, artist, price FROM album WHERE id = ?1",
            params![id],
            |row| {
                Ok(Album {
                    id: id.to_string(),
                    title: row.get(0)?,
                    artist: row.get(1)?,
                    price: row.get(2)?,
                })
            },
        );
        match result {
            Ok(album) => Ok(album),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(AlbumStoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    fn create_album(&self, album: &mut Album) -> AlbumStoreResult<()> {
        album.price = round_price(album.price);
        let conn = lock(&self.write_conn)?;
        conn.execute(
            "INSERT INTO album (title, artist, price) VALUES (?1, ?2, ?3)",
            params![album.title, album.artist, album.price],
        )?;
        album.id = conn.last_insert_rowid().to_string();
        debug!("Created album {}", album.id);
        Ok(())
    }

    fn update_album(&self, album: &Album) -> AlbumStoreResult<()> {
        let conn = lock(&self.write_conn)?;
        let updated = conn.execute(
            "UPDATE album SET title = ?1, artist = ?2, price = ?3 WHERE id = ?4",
            params![album.title, album.artist, round_price(album.price), album.id],
        )?;
        debug!("Updated album {} ({} rows)", album.id, updated);
        Ok(())
    }

    fn delete_album(&self, id: &str) -> AlbumStoreResult<()> {
        let conn = lock(&self.write_conn)?;
        let deleted = conn.execute("DELETE FROM album WHERE id = ?1", params![id])?;
        debug!("Deleted album {} ({} rows)", id, deleted);
        Ok(())
    }
}
