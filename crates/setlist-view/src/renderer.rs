//! Stateless drawing of a single setlist row.
//!
//! Layout, left to right: status icon slot, ordinal, name (truncated with an
//! ellipsis), loop badge, duration. Draw order is icon, ordinal, name,
//! duration, badge. The classic style drops the rounded background, icons
//! and badge.

use std::borrow::Cow;

use setlist_engine::coords::{Rect, Vec2};
use setlist_engine::paint::Color;
use setlist_engine::text::TextMeasurer;

use crate::context::RenderContext;
use crate::item::PlayableItem;
use crate::painter::Painter;
use crate::resources::{FontRole, IconKind, Resource, ResourceKind};
use crate::state::{Emphasis, VisualState};
use crate::theme::{Palette, ThemeStore};

pub const ELLIPSIS: &str = "…";

/// Paints one row into `row` (buffer coordinates).
///
/// Everything is clipped to `row`. Invalid items become a single flat
/// placeholder rect.
pub fn draw_item(
    painter: &mut Painter<'_>,
    row: Rect,
    item: &PlayableItem,
    state: &VisualState,
    ctx: &mut RenderContext,
) {
    painter.push_clip(row);
    draw_row(painter, row, item, state, ctx);
    painter.pop_clip();
}

fn draw_row(
    painter: &mut Painter<'_>,
    row: Rect,
    item: &PlayableItem,
    state: &VisualState,
    ctx: &mut RenderContext,
) {
    let palette = *ctx.theme.palette();
    let style = ctx.style;
    painter.fill_rect(row, palette.background);

    let bg_rect = if style.modern {
        Rect::new(
            row.left() + style.gap,
            row.top() + style.gap * 0.5,
            (row.size.x - 2.0 * style.gap).max(0.0),
            (row.size.y - style.gap).max(0.0),
        )
    } else {
        row
    };

    if !item.is_valid() {
        log::trace!("row {}: invalid item data, drawing placeholder", item.ordinal);
        painter.fill_rect(bg_rect, palette.border);
        return;
    }

    let emphasis = state.emphasis();
    let (bg, fg) = row_colors(state, &palette, &ctx.theme);
    if emphasis != Emphasis::Normal {
        painter.fill_rounded_rect(bg_rect, style.corner_radius, bg);
    }
    if !style.modern {
        let sep = Rect::new(row.left(), row.bottom() - 1.0, row.size.x, 1.0);
        painter.fill_rect(sep, palette.border);
    }

    let fonts = *ctx.theme.fonts();
    let mut content = bg_rect;
    content.origin.x += style.padding;
    content.size.x = (content.size.x - 2.0 * style.padding).max(0.0);
    let center_y = row.center().y;

    // ── layout ────────────────────────────────────────────────────────────
    // Fixed-width columns are carved off first; the name gets what is left.
    let icon_px = (row.size.y * 0.45).round() as u32;
    let icon_slot = if style.modern {
        let (slot, rest) = content.split_left(icon_px as f32 + style.padding);
        content = rest;
        Some(slot)
    } else {
        None
    };

    let ordinal = item.ordinal.to_string();
    let ordinal_w = ctx.text.text_width("000", fonts.ordinal).max(ctx.text.text_width(&ordinal, fonts.ordinal));
    let (ord_col, rest) = content.split_left(ordinal_w + style.padding);
    content = rest;

    let duration = format_duration(item.duration());
    let dur_w = ctx.text.text_width(&duration, fonts.duration);
    let (rest, dur_col) = content.split_right(dur_w);
    content = rest;

    let badge = if !style.modern {
        None
    } else if state.has_infinite_loop {
        let badge_px = (row.size.y * 0.4).round() as u32;
        let (rest, col) = content.split_right(badge_px as f32 + style.padding);
        content = rest;
        Some((col, Badge::Infinite(badge_px)))
    } else if state.loop_count > 1 {
        let label = format!("×{}", state.loop_count);
        let w = ctx.text.text_width(&label, fonts.badge);
        let (rest, col) = content.split_right(w + style.padding);
        content = rest;
        Some((col, Badge::Count(label)))
    } else {
        None
    };

    let name_w = (content.size.x - style.padding).max(0.0);
    let name = truncate_with_ellipsis(&item.name, name_w, fonts.name, &*ctx.text);

    // ── draw ──────────────────────────────────────────────────────────────
    if let (Some(slot), Some(kind)) = (icon_slot, status_icon(item, state)) {
        let origin = Vec2::new(slot.left(), center_y - icon_px as f32 / 2.0);
        draw_icon(painter, ctx, kind, icon_px, origin, fg);
    }

    let ord_color = if matches!(emphasis, Emphasis::Normal | Emphasis::Hovered) { palette.dimmed_text } else { fg };
    draw_text_line(painter, ctx, FontRole::Ordinal, &ordinal, fonts.ordinal, ord_col.left(), center_y, ord_color);

    if !name.is_empty() {
        draw_text_line(painter, ctx, FontRole::Name, &name, fonts.name, content.left(), center_y, fg);
    }

    let dur_color = if emphasis == Emphasis::Normal { palette.dimmed_text } else { fg };
    draw_text_line(painter, ctx, FontRole::Duration, &duration, fonts.duration, dur_col.left(), center_y, dur_color);

    match badge {
        Some((col, Badge::Infinite(px))) => {
            let origin = Vec2::new(col.left(), center_y - px as f32 / 2.0);
            draw_icon(painter, ctx, IconKind::LoopInfinite, px, origin, fg);
        }
        Some((col, Badge::Count(label))) => {
            draw_text_line(painter, ctx, FontRole::Badge, &label, fonts.badge, col.left(), center_y, fg);
        }
        None => {}
    }
}

/// Loop marker shown right of the name.
enum Badge {
    Infinite(u32),
    Count(String),
}

fn row_colors(state: &VisualState, p: &Palette, theme: &ThemeStore) -> (Color, Color) {
    match state.emphasis() {
        Emphasis::SyncLoss => (ThemeStore::blend(p.current_bg, p.warning, 0.35), p.current_text),
        Emphasis::Playing => (p.current_bg, p.current_text),
        Emphasis::Next => (p.next_bg, p.next_text),
        Emphasis::Selected if state.is_hovered => (theme.hover_color(p.selected_bg), p.selected_text),
        Emphasis::Selected => (p.selected_bg, p.selected_text),
        Emphasis::Hovered => (p.hover_bg, p.text),
        Emphasis::Normal => (p.background, p.text),
    }
}

fn status_icon(item: &PlayableItem, state: &VisualState) -> Option<IconKind> {
    if state.is_sync_loss {
        Some(IconKind::SyncLoss)
    } else if state.is_playing {
        Some(IconKind::Play)
    } else if state.is_next {
        Some(IconKind::Next)
    } else if item.is_short() {
        Some(IconKind::Warning)
    } else {
        None
    }
}

fn draw_icon(painter: &mut Painter<'_>, ctx: &mut RenderContext, kind: IconKind, px: u32, origin: Vec2, fallback: Color) {
    let res = ctx
        .resources
        .get_or_create(ResourceKind::Icon(kind), px, &ctx.theme, &*ctx.text);
    match res {
        Resource::Icon(icon) => painter.image(icon, origin),
        _ => {
            let s = px as f32 * 0.5;
            painter.fill_rect(Rect::new(origin.x + s * 0.5, origin.y + s * 0.5, s, s), fallback);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text_line(
    painter: &mut Painter<'_>,
    ctx: &mut RenderContext,
    role: FontRole,
    text: &str,
    size: f32,
    x: f32,
    center_y: f32,
    color: Color,
) {
    let line_h = ctx
        .resources
        .get_or_create(ResourceKind::Font(role), size.round() as u32, &ctx.theme, &*ctx.text)
        .as_font()
        .map_or(size * 1.2, |f| f.line_height);
    let origin = Vec2::new(x, (center_y - line_h / 2.0).round());
    painter.text(&mut *ctx.text, text, size, color, origin);
}

/// Fits `text` into `max_width`, replacing the tail with "…" when needed.
///
/// Uses a binary search over char boundaries, so the measurer is called
/// O(log n) times. Returns an empty string when not even the ellipsis fits.
pub fn truncate_with_ellipsis<'t, M: TextMeasurer + ?Sized>(
    text: &'t str,
    max_width: f32,
    size: f32,
    measurer: &M,
) -> Cow<'t, str> {
    if text.is_empty() || max_width <= 0.0 {
        return Cow::Borrowed("");
    }
    if measurer.text_width(text, size) <= max_width {
        return Cow::Borrowed(text);
    }
    if measurer.text_width(ELLIPSIS, size) > max_width {
        return Cow::Borrowed("");
    }

    // Byte offset of the end of each char-count prefix; `ends[k]` keeps k chars.
    let ends: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let mut lo = 0;
    let mut hi = ends.len() - 1;
    let mut candidate = String::with_capacity(text.len() + ELLIPSIS.len());

    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        candidate.clear();
        candidate.push_str(&text[..ends[mid]]);
        candidate.push_str(ELLIPSIS);
        if measurer.text_width(&candidate, size) <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    Cow::Owned(format!("{}{ELLIPSIS}", text[..ends[lo]].trim_end()))
}

/// `M:SS`, minutes unbounded. Negative and non-finite input reads as zero.
pub fn format_duration(secs: f64) -> String {
    let total = if secs.is_finite() { secs.max(0.0).floor() as u64 } else { 0 };
    format!("{}:{:02}", total / 60, total % 60)
}
