//! egui drawing for the header, the grid and the detail screen.
//!
//! Nothing in here owns state. Each function reads what it is given and reports
//! clicks back to the caller.

use egui::{
    Align2, Color32, FontId, Image, Pos2, Rect, ScrollArea, Sense, StrokeKind, Vec2,
};
use shared::DetailParams;
use tokio::runtime::Handle;

use crate::detail::DetailView;
use crate::feed::{GridFeed, PageGenerator, ScrollMetrics, should_request_more};
use crate::navigation::Navigator;

const GRID_SPACING: f32 = 10.0;
const DETAIL_FRACTION: f32 = 0.85;
const OVERLAY_MIN_FRACTION: f32 = 0.38;
const OVERLAY_FONT_SIZE: f32 = 12.0;
const OVERLAY_LINE_GAP: f32 = 3.0;
const OVERLAY_PADDING: f32 = 10.0;

/// Title bar. Returns `true` when the back button was clicked.
pub fn header(ui: &mut egui::Ui, navigator: &Navigator) -> bool {
    ui.horizontal(|ui| {
        let back = navigator.can_go_back() && ui.link("Back").clicked();
        ui.heading(navigator.current().title());
        back
    })
    .inner
}

/// Square thumbnails in `columns` columns inside a vertical scroll area.
///
/// Requests the next page whenever the remaining scroll distance falls to
/// `threshold` viewport heights. Returns navigation params for a clicked cell.
pub fn grid<G: PageGenerator>(
    ui: &mut egui::Ui,
    feed: &GridFeed<G>,
    columns: usize,
    threshold: f32,
    rt: &Handle,
) -> Option<DetailParams> {
    let columns = columns.max(1);
    let cell = ((ui.available_width() - GRID_SPACING * (columns as f32 + 1.0)) / columns as f32)
        .max(1.0);
    let mut clicked = None;

    let metrics = feed.with_state(|state| {
        if state.images.is_empty() {
            if state.loading {
                ui.vertical_centered(|ui| ui.spinner());
            }
            return None;
        }

        ui.spacing_mut().item_spacing = Vec2::splat(GRID_SPACING);
        let row_count = state.images.len().div_ceil(columns);
        let output = ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, cell, row_count, |ui, rows| {
                for row in rows {
                    ui.horizontal(|ui| {
                        ui.add_space(GRID_SPACING / 2.0);
                        for column in 0..columns {
                            let index = row * columns + column;
                            let Some(image) = state.images.get(index) else {
                                break;
                            };
                            let response = ui.add(
                                Image::new(&image.image_url)
                                    .fit_to_exact_size(Vec2::splat(cell))
                                    .maintain_aspect_ratio(false)
                                    .sense(Sense::click()),
                            );
                            if response.clicked() {
                                clicked = Some(index);
                            }
                        }
                    });
                }
                if state.loading {
                    ui.vertical_centered(|ui| ui.spinner());
                }
            });

        Some(ScrollMetrics {
            offset: output.state.offset.y,
            content_height: output.content_size.y,
            viewport_height: output.inner_rect.height(),
        })
    });

    if metrics.is_some_and(|metrics| should_request_more(metrics, threshold)) {
        feed.request_next_page(rt, ui.ctx());
    }

    clicked.and_then(|index| feed.select(index))
}

pub fn detail(ui: &mut egui::Ui, view: &DetailView) {
    match view {
        DetailView::Spinner => {
            ui.centered_and_justified(|ui| ui.spinner());
        }
        DetailView::Empty { message } => {
            ui.centered_and_justified(|ui| ui.label(*message));
        }
        DetailView::Image {
            source_url,
            source_size,
            lines,
        } => {
            let side = ui.available_width().min(ui.available_height()) * DETAIL_FRACTION;
            ui.vertical_centered(|ui| {
                ui.add_space((ui.available_height() - side).max(0.0) / 2.0);
                let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());

                if let Some(source_url) = source_url {
                    let uv = match source_size {
                        Some((width, height)) => calc_cover_uv(
                            rect.size(),
                            Vec2::new(*width as f32, *height as f32),
                        ),
                        None => Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    };
                    Image::new(source_url.as_str())
                        .uv(uv)
                        .corner_radius(egui::CornerRadius::same(10))
                        .paint_at(ui, rect);
                }

                paint_overlay(ui, rect, lines);
            });
        }
    }
}

/// Right-aligned white text on a translucent box in the image's bottom-right corner.
fn paint_overlay(ui: &egui::Ui, image_rect: Rect, lines: &[String]) {
    let painter = ui.painter_at(image_rect);
    let font = FontId::proportional(OVERLAY_FONT_SIZE);
    let galleys: Vec<_> = lines
        .iter()
        .map(|line| painter.layout_no_wrap(line.clone(), font.clone(), Color32::WHITE))
        .collect();

    let text_width = galleys
        .iter()
        .map(|galley| galley.size().x)
        .fold(0.0_f32, f32::max);
    let text_height: f32 = galleys
        .iter()
        .map(|galley| galley.size().y + OVERLAY_LINE_GAP)
        .sum();

    let width = (text_width + OVERLAY_PADDING * 2.0)
        .max(image_rect.width() * OVERLAY_MIN_FRACTION)
        .min(image_rect.width());
    let height = (text_height + OVERLAY_PADDING * 1.5).min(image_rect.height());
    let overlay = Rect::from_min_max(
        Pos2::new(image_rect.right() - width, image_rect.bottom() - height),
        image_rect.right_bottom(),
    );
    painter.rect(
        overlay,
        egui::CornerRadius {
            nw: 10,
            se: 10,
            ..Default::default()
        },
        Color32::from_black_alpha(128),
        egui::Stroke::NONE,
        StrokeKind::Inside,
    );

    let mut y = overlay.top() + OVERLAY_PADDING;
    for galley in galleys {
        let line_height = galley.size().y;
        let pos = Align2::RIGHT_TOP
            .align_size_within_rect(
                galley.size(),
                Rect::from_min_max(
                    Pos2::new(overlay.left(), y),
                    Pos2::new(overlay.right() - OVERLAY_PADDING, y + line_height),
                ),
            )
            .min;
        painter.galley(pos, galley, Color32::WHITE);
        y += line_height + OVERLAY_LINE_GAP;
    }
}

/// UV rect that crops `image_source_size` to fill `available_size`, centered.
pub fn calc_cover_uv(available_size: Vec2, image_source_size: Vec2) -> Rect {
    let mut min = Pos2::ZERO;
    let mut max = Pos2::new(1.0, 1.0);

    let image_source_aspect = image_source_size.x / image_source_size.y;
    let available_aspect = available_size.x / available_size.y;

    if available_aspect >= image_source_aspect {
        let height_ratio = image_source_aspect / available_aspect;
        min.y = (1.0 - height_ratio) / 2.0;
        max.y = height_ratio / 2.0 + 0.5;
    } else {
        let width_ratio = available_aspect / image_source_aspect;
        min.x = (1.0 - width_ratio) / 2.0;
        max.x = width_ratio / 2.0 + 0.5;
    }

    Rect { min, max }
}
