//! Infinite picsum image grid with a metadata detail screen.
//!
//! [`feed::GridFeed`] owns the grid entries and the page-in-flight flag,
//! [`detail::DetailResolver`] owns the metadata lookup for the screen being
//! shown. [`app::Gallery`] wires both into an eframe window.

pub mod api;
pub mod app;
pub mod config;
pub mod detail;
pub mod error;
pub mod feed;
pub mod logging;
pub mod navigation;
pub mod ui;

pub use api::PicsumClient;
pub use config::Config;
pub use detail::{DetailResolver, DetailScreen, DetailState, DetailView};
pub use error::{ConfigError, FailureKind, FetchError};
pub use feed::{GridFeed, LocalPageGenerator, PageGenerator, PageRequest, ScrollMetrics};
pub use navigation::{Navigator, Route};
pub use shared::{DetailParams, ImageMetadata, ImageRef};
