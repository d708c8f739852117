use std::sync::Arc;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use educonnect_core::db::Database;
use educonnect_core::{search, BlobStore, Note, NoteId, NoteService, User, UserService};

use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    users: UserService,
    notes: NoteService,
    blobs: Arc<BlobStore>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: Arc<Database>, blobs: Arc<BlobStore>) -> Self {
        Self {
            users: UserService::new(db.clone()),
            notes: NoteService::new(db, blobs.clone()),
            blobs,
            config,
        }
    }
}

pub fn app_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/users", post(register_user))
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/{id}", delete(delete_note))
        .route("/api/files/{name}", get(fetch_file))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    username: String,
    standard: i64,
}

async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state
        .users
        .register(&request.username, request.standard)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
struct ListNotesQuery {
    q: Option<String>,
}

async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<Vec<Note>>, AppError> {
    let notes = state.notes.list().await?;
    let notes = match query.q.as_deref() {
        Some(q) => search::filter(q, &notes),
        None => notes,
    };
    Ok(Json(notes))
}

async fn create_note(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let mut title = String::new();
    let mut subject = String::new();
    let mut author = String::new();
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = read_text_field(field, "title").await?,
            "subject" => subject = read_text_field(field, "subject").await?,
            "author" => author = read_text_field(field, "author").await?,
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(format!("could not read file: {e}")))?;
                file = Some((file_name, bytes.to_vec()));
            }
            // Unknown fields are dropped without reading them
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| AppError::bad_request("file is required"))?;
    let note = state
        .notes
        .create(&title, &subject, &author, &file_name, &bytes)
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::bad_request(format!("could not read {name}: {e}")))
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.notes.delete(NoteId::new(id)).await?;
    Ok(Json(DeleteResponse { success: true }))
}

async fn fetch_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let file = state.blobs.reader(&name).await?;
    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    async fn test_state() -> (TempDir, AppState) {
        let tmp = tempdir().unwrap();
        let config = Arc::new(AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            db_path: ":memory:".into(),
            uploads_dir: tmp.path().join("uploads"),
            max_upload_bytes: 1 << 20,
        });
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        let blobs = Arc::new(BlobStore::open(&config.uploads_dir).await.unwrap());
        (tmp, AppState::new(config, db, blobs))
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = app_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const BOUNDARY: &str = "educonnect-test-boundary";

    fn upload_request(title: &str, subject: &str, author: &str, file_name: &str) -> Request<Body> {
        let mut body = String::new();
        for (name, value) in [("title", title), ("subject", subject), ("author", author)] {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\npdf bytes\r\n--{BOUNDARY}--\r\n"
        ));

        Request::builder()
            .method("POST")
            .uri("/api/notes")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn healthz_reports_ok() {
        let (_tmp, state) = test_state().await;

        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&state, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn register_then_duplicate_conflicts() {
        let (_tmp, state) = test_state().await;

        let body = serde_json::json!({"username": "anita", "standard": 9});
        let (status, json) = send(&state, json_request("POST", "/api/users", body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["username"], "anita");
        assert_eq!(json["standard"], 9);

        let (status, json) = send(&state, json_request("POST", "/api/users", body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(json["error"].as_str().unwrap().contains("anita"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn upload_list_search_and_delete() {
        let (_tmp, state) = test_state().await;

        let (status, created) = send(
            &state,
            upload_request("Algebra Basics", "Math", "anita", "algebra.pdf"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["title"], "Algebra Basics");
        assert_eq!(created["fileName"], "algebra.pdf");

        let (status, _) = send(
            &state,
            upload_request("Biology", "Science", "ben", "cells.pdf"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let request = Request::builder()
            .uri("/api/notes")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 2);

        let request = Request::builder()
            .uri("/api/notes?q=alg")
            .body(Body::empty())
            .unwrap();
        let (_, json) = send(&state, request).await;
        let hits = json.as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["title"], "Algebra Basics");

        let id = created["id"].as_i64().unwrap();
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/notes/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);

        let request = Request::builder()
            .uri("/api/notes")
            .body(Body::empty())
            .unwrap();
        let (_, json) = send(&state, request).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn upload_without_title_is_rejected() {
        let (_tmp, state) = test_state().await;

        let (status, json) = send(
            &state,
            upload_request("", "Math", "anita", "algebra.pdf"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("title"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn delete_missing_note_is_not_found() {
        let (_tmp, state) = test_state().await;

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/notes/999999")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetch_uploaded_file_streams_bytes() {
        let (_tmp, state) = test_state().await;

        let (status, _) = send(
            &state,
            upload_request("Algebra Basics", "Math", "anita", "algebra.pdf"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let request = Request::builder()
            .uri("/api/files/algebra.pdf")
            .body(Body::empty())
            .unwrap();
        let response = app_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"pdf bytes");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetch_missing_file_is_not_found() {
        let (_tmp, state) = test_state().await;

        let request = Request::builder()
            .uri("/api/files/missing.pdf")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
