use std::sync::Arc;

use super::*;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::error::{ApiError, ErrorCode};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::Mutex,
};

#[derive(Clone, Default)]
struct ServerState {
    list_queries: Arc<Mutex<Vec<ListArtistsQuery>>>,
    drafts: Arc<Mutex<Vec<(Option<i64>, ArtistDraft)>>>,
}

async fn handle_list(
    State(state): State<ServerState>,
    Query(query): Query<ListArtistsQuery>,
) -> Json<ArtistPage> {
    state.list_queries.lock().await.push(query.clone());
    Json(ArtistPage {
        results: vec![Artist::new(ArtistId(1), "Band")],
        count: 7,
        // Clamp like the real service does for out-of-range pages.
        current_page: query.page.min(3),
    })
}

async fn handle_create(
    State(state): State<ServerState>,
    Json(draft): Json<ArtistDraft>,
) -> Json<Artist> {
    state.drafts.lock().await.push((None, draft.clone()));
    Json(Artist::new(ArtistId(99), draft.name))
}

async fn handle_get(Path(id): Path<i64>) -> Result<Json<Artist>, (StatusCode, Json<ApiError>)> {
    if id == 404 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new(ErrorCode::NotFound, "artist not found")),
        ));
    }
    Ok(Json(Artist::new(ArtistId(id), "Existing")))
}

async fn handle_update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(draft): Json<ArtistDraft>,
) -> Json<Artist> {
    state.drafts.lock().await.push((Some(id), draft.clone()));
    Json(Artist::new(ArtistId(id), draft.name))
}

async fn spawn_artists_server() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/artists", get(handle_list).post(handle_create))
        .route("/api/artists/:id", get(handle_get).put(handle_update))
        .route("/broken/artists", get(|| async { "not json" }))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

#[tokio::test]
async fn list_omits_empty_search_and_decodes_page() {
    let (server_url, state) = spawn_artists_server().await;
    let client = HttpArtistsClient::new(format!("{server_url}/api/")).expect("client");

    let page = client
        .list_artists(&ListArtistsQuery::new("", 1))
        .await
        .expect("list");

    assert_eq!(page.count, 7);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.results[0].name, "Band");
    let queries = state.list_queries.lock().await;
    assert_eq!(queries.as_slice(), &[ListArtistsQuery { search: None, page: 1 }]);
}

#[tokio::test]
async fn list_forwards_search_and_reports_clamped_page() {
    let (server_url, state) = spawn_artists_server().await;
    let client = HttpArtistsClient::new(format!("{server_url}/api")).expect("client");

    let page = client
        .list_artists(&ListArtistsQuery::new("band", 9))
        .await
        .expect("list");

    assert_eq!(page.current_page, 3);
    let queries = state.list_queries.lock().await;
    assert_eq!(queries[0].search.as_deref(), Some("band"));
    assert_eq!(queries[0].page, 9);
}

#[tokio::test]
async fn create_and_update_send_draft_bodies() {
    let (server_url, state) = spawn_artists_server().await;
    let client = HttpArtistsClient::new(format!("{server_url}/api")).expect("client");

    let created = client
        .create_artist(&ArtistDraft::new("Nowy"))
        .await
        .expect("create");
    assert_eq!(created.id_artist, ArtistId(99));

    let updated = client
        .update_artist(ArtistId(5), &ArtistDraft::new("Zmieniony"))
        .await
        .expect("update");
    assert_eq!(updated.name, "Zmieniony");

    let drafts = state.drafts.lock().await;
    assert_eq!(drafts[0], (None, ArtistDraft::new("Nowy")));
    assert_eq!(drafts[1], (Some(5), ArtistDraft::new("Zmieniony")));
}

#[tokio::test]
async fn non_success_status_carries_api_error() {
    let (server_url, _) = spawn_artists_server().await;
    let client = HttpArtistsClient::new(format!("{server_url}/api")).expect("client");

    let err = client.get_artist(ArtistId(404)).await.expect_err("missing");
    match err {
        ClientError::Status {
            status,
            code,
            ref message,
        } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(code, Some(ErrorCode::NotFound));
            assert_eq!(message, "artist not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (server_url, _) = spawn_artists_server().await;
    let client = HttpArtistsClient::new(format!("{server_url}/broken")).expect("client");

    let err = client
        .list_artists(&ListArtistsQuery::new("", 1))
        .await
        .expect_err("decode");
    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpArtistsClient::with_timeout(format!("http://{addr}"), Duration::from_secs(2))
        .expect("client");
    let err = client
        .list_artists(&ListArtistsQuery::new("", 1))
        .await
        .expect_err("refused");
    assert!(err.is_transport(), "got {err:?}");
}

#[test]
fn plain_text_error_body_becomes_message() {
    let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream down\n");
    assert!(matches!(
        err,
        ClientError::Status { status, code: None, .. } if status == StatusCode::BAD_GATEWAY
    ));
    assert_eq!(err.to_string(), "server responded with 502 Bad Gateway: upstream down");
}

#[tokio::test]
async fn truncated_error_body_still_reports_status() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let read = socket.read(&mut buf).await.expect("read request");
            if read == 0 {
                return;
            }
            request.extend_from_slice(&buf[..read]);
        }
        // Promise more body than is sent, then hang up.
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  content-type: text/plain\r\n\
                  content-length: 64\r\n\r\n\
                  partial",
            )
            .await
            .expect("write response");
    });

    let client = HttpArtistsClient::with_timeout(format!("http://{addr}"), Duration::from_secs(2))
        .expect("client");
    let err = client
        .list_artists(&ListArtistsQuery::new("", 1))
        .await
        .expect_err("server error");

    match err {
        ClientError::Status { status, code, message } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(code, None);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}
