//! `/albums` routes: map requests onto album store operations and store
//! outcomes onto HTTP statuses.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error};

use super::state::{GuardedAlbumStore, ServerState};
use crate::album_store::{Album, AlbumBody, AlbumStore, AlbumStoreError, AlbumStoreResult};

const LIST_OFFSET: usize = 0;
const LIST_LIMIT: usize = 10;

const MSG_NOT_FOUND: &str = "album not found";
const MSG_BAD_BODY: &str = "Cannot parse the req body";
const MSG_LIST_FAILED: &str = "Error while retrieving data";
const MSG_GET_FAILED: &str = "err while retrieving data";
const MSG_CREATE_FAILED: &str = "Error while creating data";
const MSG_UPDATE_FAILED: &str = "Error while updating data";
const MSG_DELETE_FAILED: &str = "Error while deleting data";
const MSG_DELETED: &str = "Delete data success!";

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

fn message(status: StatusCode, message: &'static str) -> Response {
    (status, Json(MessageBody { message })).into_response()
}

fn storage_failure(context: &str, err: AlbumStoreError, msg: &'static str) -> Response {
    error!("{} failed: {}", context, err);
    message(StatusCode::BAD_GATEWAY, msg)
}

/// Runs a store operation off the async workers, the SQLite calls block.
async fn with_store<T, F>(store: GuardedAlbumStore, op: F) -> AlbumStoreResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn AlbumStore) -> AlbumStoreResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || op(store.as_ref())).await {
        Ok(result) => result,
        Err(join_err) => Err(AlbumStoreError::StorageFailure(join_err.into())),
    }
}

/// Decodes and checks a create/update body.
fn parse_body(body: Result<Json<AlbumBody>, JsonRejection>) -> Result<AlbumBody, Response> {
    match body {
        Ok(Json(body)) if body.has_required_fields() => Ok(body),
        Ok(Json(body)) => {
            debug!("Album body is missing required fields: {:?}", body);
            Err(message(StatusCode::BAD_REQUEST, MSG_BAD_BODY))
        }
        Err(rejection) => {
            debug!("Rejected album body: {}", rejection.body_text());
            Err(message(StatusCode::BAD_REQUEST, MSG_BAD_BODY))
        }
    }
}

async fn list_albums(State(store): State<GuardedAlbumStore>) -> Response {
    match with_store(store, |s| s.list_albums(LIST_OFFSET, LIST_LIMIT)).await {
        Ok(albums) => Json(albums).into_response(),
        Err(err) => storage_failure("Listing albums", err, MSG_LIST_FAILED),
    }
}

/// Unlike the unfiltered list, no match here is a 404.
async fn list_albums_by_artist(
    State(store): State<GuardedAlbumStore>,
    Path(name): Path<String>,
) -> Response {
    match with_store(store, move |s| s.list_albums_by_artist(&name, LIST_LIMIT)).await {
        Ok(albums) if albums.is_empty() => message(StatusCode::NOT_FOUND, MSG_NOT_FOUND),
        Ok(albums) => Json(albums).into_response(),
        Err(err) => storage_failure("Listing albums by artist", err, MSG_LIST_FAILED),
    }
}

async fn get_album(State(store): State<GuardedAlbumStore>, Path(id): Path<String>) -> Response {
    match with_store(store, move |s| s.get_album(&id)).await {
        Ok(album) => Json(album).into_response(),
        Err(AlbumStoreError::NotFound) => message(StatusCode::NOT_FOUND, MSG_NOT_FOUND),
        Err(err) => storage_failure("Getting album", err, MSG_GET_FAILED),
    }
}

async fn create_album(
    State(store): State<GuardedAlbumStore>,
    body: Result<Json<AlbumBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let result = with_store(store, move |s| {
        let mut album = Album::with_id(String::new(), body);
        s.create_album(&mut album).map(|_| album)
    })
    .await;

    match result {
        Ok(album) => (StatusCode::CREATED, Json(album)).into_response(),
        Err(err) => storage_failure("Creating album", err, MSG_CREATE_FAILED),
    }
}

/// Full overwrite of the album at `id`. An id matching no row still answers
/// 200 with the submitted record.
async fn update_album(
    State(store): State<GuardedAlbumStore>,
    Path(id): Path<String>,
    body: Result<Json<AlbumBody>, JsonRejection>,
) -> Response {
    let body = match parse_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let album = Album::with_id(id, body);
    let to_store = album.clone();
    match with_store(store, move |s| s.update_album(&to_store)).await {
        Ok(()) => Json(album).into_response(),
        Err(err) => storage_failure("Updating album", err, MSG_UPDATE_FAILED),
    }
}

/// Like update, deleting an id matching no row is still a success.
async fn delete_album(State(store): State<GuardedAlbumStore>, Path(id): Path<String>) -> Response {
    match with_store(store, move |s| s.delete_album(&id)).await {
        Ok(()) => message(StatusCode::OK, MSG_DELETED),
        Err(err) => storage_failure("Deleting album", err, MSG_DELETE_FAILED),
    }
}

pub fn make_album_routes(state: ServerState) -> Router {
    Router::new()
        .route("/albums", get(list_albums).post(create_album))
        .route("/albums/artist/{name}", get(list_albums_by_artist))
        .route(
            "/albums/{id}",
            get(get_album).patch(update_album).delete(delete_album),
        )
        .with_state(state)
}
