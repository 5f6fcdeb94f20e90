use eframe::App;
use shared::DetailParams;
use tokio::runtime::Runtime;

use crate::api::PicsumClient;
use crate::config::Config;
use crate::detail::DetailScreen;
use crate::feed::{GridFeed, LocalPageGenerator};
use crate::navigation::{Navigator, Route};
use crate::ui;

pub struct Gallery {
    rt: Runtime,
    config: Config,
    client: PicsumClient,
    feed: GridFeed<LocalPageGenerator>,
    navigator: Navigator,
    detail: Option<DetailScreen>,
}

impl Gallery {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, rt: Runtime) -> Self {
        Self::with_context(&cc.egui_ctx, config, rt)
    }

    /// Sets up `ctx` and mounts the grid, which requests its first page.
    pub fn with_context(ctx: &egui::Context, config: Config, rt: Runtime) -> Self {
        egui_extras::install_image_loaders(ctx);
        ctx.all_styles_mut(|style| {
            style.wrap_mode = Some(egui::TextWrapMode::Extend);
        });

        let feed = GridFeed::new(LocalPageGenerator::from_config(&config), config.page_size);
        let gallery = Gallery {
            client: PicsumClient::new(&config.api_base),
            feed,
            navigator: Navigator::default(),
            detail: None,
            config,
            rt,
        };
        gallery.feed.request_next_page(gallery.rt.handle(), ctx);
        gallery
    }

    pub fn feed(&self) -> &GridFeed<LocalPageGenerator> {
        &self.feed
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Lays out one frame.
    pub fn show(&mut self, ctx: &egui::Context) {
        let mut back = ctx.input(|input| input.key_pressed(egui::Key::Escape));
        let mut selected = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            back |= ui::header(ui, &self.navigator);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.navigator.current() {
            Route::Grid => {
                selected = ui::grid(
                    ui,
                    &self.feed,
                    self.config.columns,
                    self.config.near_end_threshold,
                    self.rt.handle(),
                );
            }
            Route::Detail(_) => {
                if let Some(screen) = &self.detail {
                    ui::detail(ui, &screen.view());
                }
            }
        });

        if back {
            self.go_back();
        } else if let Some(params) = selected {
            self.open_detail(params, ctx);
        }
    }

    fn open_detail(&mut self, params: DetailParams, ctx: &egui::Context) {
        self.navigator.push(Route::Detail(params.clone()));
        // dropping the handle detaches the lookup; it finishes even if we leave
        let (screen, _task) = DetailScreen::mount(params, self.client.clone(), self.rt.handle(), ctx);
        self.detail = Some(screen);
    }

    fn go_back(&mut self) {
        if self.navigator.back() {
            self.detail = None;
        }
    }
}

impl App for Gallery {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
