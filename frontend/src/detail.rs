//! Metadata lookup for the detail screen.
//!
//! Every call to [`DetailResolver::resolve`] bumps a generation counter and a
//! response only lands if its generation is still current, so a slow reply
//! for an earlier id can never overwrite the reply for a later one.

use std::sync::Arc;

use egui::mutex::RwLock;
use shared::{DetailParams, ImageMetadata};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api::PicsumClient;
use crate::error::FailureKind;

pub const NOT_FOUND_MESSAGE: &str = "No details found for this image.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Loading,
    Resolved(ImageMetadata),
    /// Covers unknown ids, unreachable hosts and unreadable bodies alike.
    NotFound,
}

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    id: Option<String>,
    state: DetailState,
    last_failure: Option<FailureKind>,
}

pub struct DetailResolver {
    client: PicsumClient,
    inner: Arc<RwLock<Inner>>,
}

impl DetailResolver {
    pub fn new(client: PicsumClient) -> Self {
        Self {
            client,
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    /// Resets to [`DetailState::Loading`] and fetches metadata for `id`.
    ///
    /// Earlier requests are not cancelled; their results are dropped when
    /// they arrive.
    pub fn resolve(&self, id: &str, rt: &Handle, ctx: &egui::Context) -> JoinHandle<()> {
        let generation = {
            let mut inner = self.inner.write();
            inner.generation += 1;
            inner.id = Some(id.to_string());
            inner.state = DetailState::Loading;
            inner.generation
        };

        let client = self.client.clone();
        let inner = Arc::clone(&self.inner);
        let id = id.to_string();
        let ctx = ctx.clone();
        rt.spawn(async move {
            let outcome = client.image_info(&id).await;
            if let Err(error) = &outcome {
                tracing::warn!(%id, kind = ?error.kind(), %error, "failed to fetch image details");
            }

            let mut inner = inner.write();
            if inner.generation != generation {
                tracing::debug!(
                    %id,
                    generation,
                    current = inner.generation,
                    "discarding superseded metadata response"
                );
                return;
            }
            match outcome {
                Ok(metadata) => {
                    tracing::debug!(%id, author = %metadata.author, "image details resolved");
                    inner.state = DetailState::Resolved(metadata);
                    inner.last_failure = None;
                }
                Err(error) => {
                    inner.state = DetailState::NotFound;
                    inner.last_failure = Some(error.kind());
                }
            }
            drop(inner);
            ctx.request_repaint();
        })
    }

    pub fn state(&self) -> DetailState {
        self.inner.read().state.clone()
    }

    pub fn active_id(&self) -> Option<String> {
        self.inner.read().id.clone()
    }

    /// What went wrong in the last committed lookup. Diagnostics only: the
    /// screen shows the same empty state for every kind.
    pub fn last_failure(&self) -> Option<FailureKind> {
        self.inner.read().last_failure
    }
}

/// What the detail screen draws for a given state.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Spinner,
    Empty {
        message: &'static str,
    },
    Image {
        /// `None` when neither the navigation params nor the metadata carry
        /// a URL; only the text overlay is drawn then.
        source_url: Option<String>,
        /// Pixel size of `source_url` when known. Grid URLs are square.
        source_size: Option<(u32, u32)>,
        lines: Vec<String>,
    },
}

impl DetailView {
    pub fn new(state: &DetailState, params: &DetailParams) -> Self {
        match state {
            DetailState::Loading => DetailView::Spinner,
            DetailState::NotFound => DetailView::Empty {
                message: NOT_FOUND_MESSAGE,
            },
            DetailState::Resolved(metadata) => {
                let (source_url, source_size) = match &params.image_url {
                    Some(url) if !url.is_empty() => (Some(url.clone()), None),
                    _ => match &metadata.download_url {
                        Some(url) if !url.is_empty() => {
                            (Some(url.clone()), Some((metadata.width, metadata.height)))
                        }
                        _ => (None, None),
                    },
                };
                let mut lines = vec![
                    format!("Author: {}", metadata.author),
                    format!("Width: {}", metadata.width),
                    format!("Height: {}", metadata.height),
                ];
                lines.extend(source_url.clone());
                DetailView::Image {
                    source_url,
                    source_size,
                    lines,
                }
            }
        }
    }
}

/// One visit to the detail screen: its entry parameters and its resolver.
pub struct DetailScreen {
    params: DetailParams,
    resolver: DetailResolver,
}

impl DetailScreen {
    /// Creates the screen in `Loading` and starts the lookup for `params.id`.
    pub fn mount(
        params: DetailParams,
        client: PicsumClient,
        rt: &Handle,
        ctx: &egui::Context,
    ) -> (Self, JoinHandle<()>) {
        let resolver = DetailResolver::new(client);
        let task = resolver.resolve(&params.id, rt, ctx);
        (Self { params, resolver }, task)
    }

    pub fn resolver(&self) -> &DetailResolver {
        &self.resolver
    }

    pub fn view(&self) -> DetailView {
        DetailView::new(&self.resolver.state(), &self.params)
    }
}
