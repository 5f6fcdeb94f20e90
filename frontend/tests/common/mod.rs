#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::sync::Notify;

/// How the mock answers `GET /id/{id}/info` for one id.
#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Raw(&'static str),
    /// Waits for the gate before answering with the JSON body.
    Gated(Arc<Notify>, Value),
}

#[derive(Default)]
struct Picsum {
    replies: HashMap<String, Reply>,
    hits: AtomicUsize,
}

pub struct MockPicsum {
    pub base: String,
    state: Arc<Picsum>,
}

impl MockPicsum {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

pub fn info(id: &str, author: &str, width: u32, height: u32) -> Value {
    json!({
        "id": id,
        "author": author,
        "width": width,
        "height": height,
        "url": format!("https://unsplash.com/photos/{id}"),
        "download_url": format!("https://picsum.photos/id/{id}/{width}/{height}"),
    })
}

async fn image_info(Path(id): Path<String>, State(picsum): State<Arc<Picsum>>) -> Response {
    picsum.hits.fetch_add(1, Ordering::SeqCst);
    match picsum.replies.get(&id).cloned() {
        Some(Reply::Json(body)) => Json(body).into_response(),
        Some(Reply::Raw(body)) => (StatusCode::OK, body).into_response(),
        Some(Reply::Gated(gate, body)) => {
            gate.notified().await;
            Json(body).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Image does not exist\n").into_response(),
    }
}

/// Serves the metadata endpoint on an ephemeral localhost port.
pub async fn serve<K: Into<String>>(replies: impl IntoIterator<Item = (K, Reply)>) -> MockPicsum {
    let state = Arc::new(Picsum {
        replies: replies
            .into_iter()
            .map(|(id, reply)| (id.into(), reply))
            .collect(),
        hits: AtomicUsize::new(0),
    });
    let app = Router::new()
        .route("/id/:id/info", get(image_info))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockPicsum {
        base: format!("http://{addr}"),
        state,
    }
}

/// Answers 404 for every id.
pub async fn serve_none() -> MockPicsum {
    serve(Vec::<(String, Reply)>::new()).await
}

/// A base URL nothing listens on.
pub async fn dead_base() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
