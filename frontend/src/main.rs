use anyhow::Context;
use gallery::{app::Gallery, config, logging};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load()
        .context("could not load settings")?
        .with_env_overrides()
        .context("invalid settings")?;
    logging::init(config.log_filter.as_deref());
    tracing::info!(api_base = %config.api_base, page_size = config.page_size, "starting gallery");

    let rt = tokio::runtime::Runtime::new().context("could not start async runtime")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 900.0])
            .with_resizable(true),
        ..Default::default()
    };
    eframe::run_native(
        "Gallery",
        native_options,
        Box::new(|cc| Ok(Box::new(Gallery::new(cc, config, rt)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
