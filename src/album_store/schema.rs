//! SQLite schema for the album database.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

/// Albums table. Bounds mirror a `VARCHAR(128)` title, a `VARCHAR(255)`
/// artist and a `DECIMAL(5,2)` price.
const ALBUM_TABLE: Table = Table {
    name: "album",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_autoincrement = true
        ),
        sqlite_column!(
            "title",
            &SqlType::Text,
            non_null = true,
            check = Some("length(title) <= 128")
        ),
        sqlite_column!(
            "artist",
            &SqlType::Text,
            non_null = true,
            check = Some("length(artist) <= 255")
        ),
        sqlite_column!(
            "price",
            &SqlType::Real,
            non_null = true,
            check = Some("abs(price) < 1000")
        ),
    ],
    indices: &[("idx_album_artist", "artist")],
};

pub const ALBUM_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[ALBUM_TABLE],
}];
