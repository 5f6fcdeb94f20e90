//! The grid's appendable image list and its single in-flight flag.
//!
//! Pages come from a [`PageGenerator`]. The only generator shipped is
//! [`LocalPageGenerator`], which invents ids on the client: there is no server
//! cursor, and an id need not match the picture its URL serves.
//!
//! A generator whose page is ready on the first poll is appended in place, so
//! local generation runs start to finish inside the request. Only a generator
//! that is still pending is handed to the runtime.

use std::sync::Arc;

use egui::mutex::RwLock;
use futures_util::future::{self, BoxFuture, FutureExt};
use rand::Rng;
use shared::{DetailParams, ImageRef};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api;
use crate::config::Config;

pub trait PageGenerator: Send + Sync + 'static {
    fn next_page(&self, len: usize) -> BoxFuture<'static, Vec<ImageRef>>;
}

/// Generates pages without any I/O: random ids and cache-busting image URLs.
#[derive(Debug, Clone)]
pub struct LocalPageGenerator {
    base: String,
    size: u32,
    max_random_id: u32,
}

impl LocalPageGenerator {
    pub fn new(base: impl Into<String>, size: u32, max_random_id: u32) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            size,
            max_random_id: max_random_id.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base, config.image_size, config.max_random_id)
    }

    /// Entry `i` gets token `now_ms + i`, so URLs within a batch never collide.
    pub fn generate(&self, len: usize, now_ms: i64) -> Vec<ImageRef> {
        let mut rng = rand::rng();
        (0..len)
            .map(|index| ImageRef {
                id: rng.random_range(1..=self.max_random_id).to_string(),
                image_url: api::image_url(&self.base, self.size, now_ms + index as i64),
            })
            .collect()
    }
}

impl PageGenerator for LocalPageGenerator {
    fn next_page(&self, len: usize) -> BoxFuture<'static, Vec<ImageRef>> {
        future::ready(self.generate(len, chrono::Utc::now().timestamp_millis())).boxed()
    }
}

#[derive(Debug, Default)]
pub struct FeedState {
    pub images: Vec<ImageRef>,
    pub loading: bool,
}

/// Outcome of [`GridFeed::request_next_page`].
#[derive(Debug)]
pub enum PageRequest {
    /// A page was already in flight; nothing changed.
    Busy,
    /// The page was ready at once and is already appended.
    Appended,
    /// The page is still being produced on the runtime.
    Pending(JoinHandle<()>),
}

impl PageRequest {
    pub fn is_busy(&self) -> bool {
        matches!(self, PageRequest::Busy)
    }

    /// Waits until the requested page, if any, has been appended.
    pub async fn finished(self) {
        if let PageRequest::Pending(task) = self {
            if let Err(error) = task.await {
                tracing::error!(%error, "page task failed");
            }
        }
    }
}

pub struct GridFeed<G> {
    state: Arc<RwLock<FeedState>>,
    generator: G,
    page_size: usize,
}

impl<G: PageGenerator> GridFeed<G> {
    pub fn new(generator: G, page_size: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(FeedState::default())),
            generator,
            page_size,
        }
    }

    /// Appends one page unless a page is already being produced.
    ///
    /// The flag is checked and set before the generator runs, so every call
    /// made while a page is in flight returns [`PageRequest::Busy`] and adds
    /// nothing.
    pub fn request_next_page(&self, rt: &Handle, ctx: &egui::Context) -> PageRequest {
        {
            let mut state = self.state.write();
            if state.loading {
                tracing::trace!("page already in flight");
                return PageRequest::Busy;
            }
            state.loading = true;
        }

        let mut page = self.generator.next_page(self.page_size);
        if let Some(page) = (&mut page).now_or_never() {
            append_page(&self.state, page, ctx);
            return PageRequest::Appended;
        }

        let state = Arc::clone(&self.state);
        let ctx = ctx.clone();
        PageRequest::Pending(rt.spawn(async move {
            let page = page.await;
            append_page(&state, page, &ctx);
        }))
    }

    /// Runs `f` with the feed locked for reading. Do not request pages from
    /// inside `f`.
    pub fn with_state<R>(&self, f: impl FnOnce(&FeedState) -> R) -> R {
        f(&*self.state.read())
    }

    pub fn len(&self) -> usize {
        self.state.read().images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn images(&self) -> Vec<ImageRef> {
        self.state.read().images.clone()
    }

    /// Navigation parameters for the entry at `index`. Leaves the feed as is.
    pub fn select(&self, index: usize) -> Option<DetailParams> {
        let state = self.state.read();
        let image = state.images.get(index)?;
        tracing::debug!(index, id = %image.id, "image selected");
        Some(DetailParams::from(image))
    }
}

/// Scroll position of the grid, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub content_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    /// Remaining scrollable distance measured in viewport heights.
    pub fn distance_from_end_ratio(&self) -> f32 {
        if self.viewport_height <= 0.0 {
            return 0.0;
        }
        let remaining = (self.content_height - self.offset - self.viewport_height).max(0.0);
        remaining / self.viewport_height
    }
}

fn append_page(state: &RwLock<FeedState>, page: Vec<ImageRef>, ctx: &egui::Context) {
    let added = page.len();
    let total = {
        let mut state = state.write();
        state.images.extend(page);
        state.loading = false;
        state.images.len()
    };
    tracing::debug!(added, total, "appended page");
    ctx.request_repaint();
}

pub fn should_request_more(metrics: ScrollMetrics, threshold: f32) -> bool {
    metrics.distance_from_end_ratio() <= threshold
}
