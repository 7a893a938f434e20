//! Album record and its wire/storage shapes.

use serde::{Deserialize, Serialize};

/// Prices are kept to cents.
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// An album row, as stored and as returned to clients.
///
/// Storage column order is `id, title, artist, price`. The id is an
/// auto-increment integer in storage and always travels as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl Album {
    /// Build an album with the given id from a client-submitted body.
    pub fn with_id(id: impl Into<String>, body: AlbumBody) -> Self {
        Album {
            id: id.into(),
            title: body.title,
            artist: body.artist,
            price: round_price(body.price),
        }
    }

    /// Parse a row selected as `id, title, artist, price`.
    pub(super) fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Album> {
        Ok(Album {
            id: row.get::<_, i64>(0)?.to_string(),
            title: row.get(1)?,
            artist: row.get(2)?,
            price: row.get(3)?,
        })
    }
}

/// Request body for creating or updating an album. Any `id` in the body is
/// ignored; ids come from storage on create and from the path on update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlbumBody {
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl AlbumBody {
    /// Required-field check: a field holding its zero value counts as missing.
    pub fn has_required_fields(&self) -> bool {
        !self.title.is_empty() && !self.artist.is_empty() && self.price != 0.0
    }
}
