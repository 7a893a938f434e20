//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per album route.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET /albums
    pub async fn list_albums(&self) -> Response {
        self.client
            .get(format!("{}/albums", self.base_url))
            .send()
            .await
            .expect("List albums request failed")
    }

    /// GET /albums/artist/{name}
    pub async fn list_albums_by_artist(&self, name: &str) -> Response {
        let url = reqwest::Url::parse(&self.base_url)
            .and_then(|base| base.join("/albums/artist/"))
            .map(|mut url| {
                url.path_segments_mut()
                    .expect("Base URL cannot be a base")
                    .pop_if_empty()
                    .push(name);
                url
            })
            .expect("Invalid artist URL");
        self.client
            .get(url)
            .send()
            .await
            .expect("List albums by artist request failed")
    }

    /// GET /albums/{id}
    pub async fn get_album(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/albums/{}", self.base_url, id))
            .send()
            .await
            .expect("Get album request failed")
    }

    /// POST /albums
    pub async fn create_album(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/albums", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Create album request failed")
    }

    /// POST /albums, asserting success, returning the created album.
    pub async fn create_album_ok(&self, title: &str, artist: &str, price: f64) -> Value {
        let response = self
            .create_album(&json!({"title": title, "artist": artist, "price": price}))
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Invalid album JSON")
    }

    /// PATCH /albums/{id}
    pub async fn update_album(&self, id: &str, body: &Value) -> Response {
        self.client
            .patch(format!("{}/albums/{}", self.base_url, id))
            .json(body)
            .send()
            .await
            .expect("Update album request failed")
    }

    /// DELETE /albums/{id}
    pub async fn delete_album(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/albums/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete album request failed")
    }
}
