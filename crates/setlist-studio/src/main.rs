//! Headless setlist studio.
//!
//! Drives a `PlaylistView` through a scripted show (playback, scrolling,
//! clicks, a drag and a theme switch), then writes the last presented frame
//! to a PNG.
//!
//! Usage: `setlist-studio [OUT.png] [--light|--stage] [--classic]`

mod show;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use setlist_engine::logging::{init_logging, LoggingConfig};
use setlist_engine::raster::PixelBuffer;
use setlist_engine::surface::MemorySurface;
use setlist_engine::text::{FixedAdvanceText, FontSystem, TextRasterizer};
use setlist_view::prelude::*;

const FRAMES: u32 = 360;
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
/// Show seconds per wall-clock second.
const PLAYBACK_SPEED: f64 = 60.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut out = PathBuf::from("setlist-frame.png");
    let mut config = ViewConfig::default().with_preset(ItemHeightPreset::Medium);
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--light" => config = config.with_theme(ThemeVariant::Light),
            "--stage" => config = config.with_theme(ThemeVariant::Stage).with_preset(ItemHeightPreset::Large),
            "--classic" => config = config.with_modern_rendering(false),
            path => out = PathBuf::from(path),
        }
    }

    let mut view = PlaylistView::new(config, Rect::new(0.0, 0.0, 480.0, 640.0), text_system());
    let mut items = show::sample_setlist(120);
    view.set_items(items.clone());

    let mut playback = show::PlaybackSim::new(items.clone(), PLAYBACK_SPEED);
    let mut surface = MemorySurface::new();
    let start = Instant::now();
    let dt = FRAME_INTERVAL.as_secs_f64();

    for frame in 0..FRAMES {
        let now = start + FRAME_INTERVAL * frame;
        if frame == 180 {
            playback.lose_sync(8.0);
        }
        view.set_playback(playback.advance(dt));

        for event in show::operator_input(frame) {
            let response = view.handle_event_at(&event, now);
            let Some(intent) = response.intent else { continue };
            log::info!("frame {frame}: {intent:?}");
            if let PlaylistIntent::MoveItem { from, to } = intent {
                items = show::reorder(&items, from, to);
                view.set_items(items.clone());
                playback.set_items(items.clone());
            }
            playback.apply(intent);
        }

        if frame == 300 {
            view.apply_theme_overrides([("accent_blue", "#4FC3F7")])
                .context("applying palette override")?;
        }

        if view.needs_redraw() {
            if let FrameOutcome::Skipped(reason) = view.render_at(&mut surface, now) {
                log::warn!("frame {frame} skipped: {reason:?}");
            }
        }
    }

    let stats = view.stats();
    log::info!(
        "{} frame(s) presented, {} skipped, {} row(s) painted, {:.1} redraws/s at the end",
        stats.frames_presented,
        stats.frames_skipped,
        stats.rows_painted,
        stats.redraw_rate,
    );

    let frame = surface.last_frame().context("no frame was presented")?;
    save_png(frame, &out)?;
    log::info!("wrote {}", out.display());
    Ok(())
}

/// A real font when one is installed, the monospace stand-in otherwise.
fn text_system() -> Box<dyn TextRasterizer> {
    let Some(bytes) = load_font() else {
        log::warn!("no system font found; drawing text as blocks");
        return Box::new(FixedAdvanceText::default());
    };
    let mut fonts = FontSystem::new();
    match fonts.load_font(&bytes) {
        Ok(_) => Box::new(fonts),
        Err(e) => {
            log::warn!("{e}; drawing text as blocks");
            Box::new(FixedAdvanceText::default())
        }
    }
}

fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\segoeui.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}

fn save_png(frame: &PixelBuffer, path: &Path) -> Result<()> {
    let (w, h) = frame.dimensions();
    let image = image::RgbaImage::from_raw(w, h, frame.to_rgba8()).context("frame buffer size mismatch")?;
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))
}
