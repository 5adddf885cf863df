//! GameView: maps a session snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::banner::MessageBanner;
use crate::core::{GameSnapshot, Mode};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Rect, WIN_THRESHOLD_X};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const SKY: Rgb = Rgb::new(70, 150, 200);
const STATUS_ROWS: u16 = 1;
const MIN_PLAY_W: u16 = 12;
const MIN_PLAY_H: u16 = 4;

/// Renders the single-screen level scaled to the terminal.
pub struct GameView {
    /// How many columns make one row visually square (terminal glyphs are
    /// roughly twice as tall as they are wide).
    cell_aspect: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_aspect: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

/// World-to-cell mapping for one frame.
#[derive(Debug, Clone, Copy)]
struct Projection {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    world: Rect,
}

impl Projection {
    fn col_f(&self, x: f32) -> f32 {
        (x - self.world.min.x) * self.cols as f32 / self.world.size.x
    }

    fn row_f(&self, y: f32) -> f32 {
        (y - self.world.min.y) * self.rows as f32 / self.world.size.y
    }

    /// Cell span `[start, end)` covered by `[lo, hi)`, clipped; at least one
    /// cell wide when the box is visible at all.
    fn span(lo: f32, hi: f32, limit: u16) -> Option<(u16, u16)> {
        let limit = limit as f32;
        if hi <= 0.0 || lo >= limit {
            return None;
        }
        let start = lo.max(0.0).floor();
        let end = hi.min(limit).ceil().max(start + 1.0);
        Some((start as u16, end as u16))
    }

    fn cells(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        let max = rect.max();
        let (x0, x1) = Self::span(self.col_f(rect.min.x), self.col_f(max.x), self.cols)?;
        let (y0, y1) = Self::span(self.row_f(rect.min.y), self.row_f(max.y), self.rows)?;
        Some((self.left + x0, self.top + y0, x1 - x0, y1 - y0))
    }

    fn fill(&self, fb: &mut FrameBuffer, rect: Rect, ch: char, style: CellStyle) {
        if let Some((x, y, w, h)) = self.cells(rect) {
            fb.fill_rect(x, y, w, h, ch, style);
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Playfield size in cells (without border) for a viewport.
    pub fn play_size(&self, snap: &GameSnapshot, viewport: Viewport) -> (u16, u16) {
        let avail_w = viewport.width.saturating_sub(2);
        let avail_h = viewport.height.saturating_sub(2 + STATUS_ROWS);
        if snap.world.size.x <= 0.0 || snap.world.size.y <= 0.0 {
            return (avail_w, avail_h);
        }
        let ratio = snap.world.size.x / snap.world.size.y * self.cell_aspect as f32;
        let rows = (avail_h as f32).min(avail_w as f32 / ratio).floor();
        let cols = (rows * ratio).round().min(avail_w as f32);
        (cols as u16, rows as u16)
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        banner: &MessageBanner,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (cols, rows) = self.play_size(snap, viewport);
        if cols < MIN_PLAY_W || rows < MIN_PLAY_H {
            fb.put_str(0, 0, "terminal too small", CellStyle::default().bold());
            return;
        }

        let frame_w = cols + 2;
        let frame_h = rows + 2;
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h + STATUS_ROWS) / 2,
            AnchorY::Top => 0,
        };

        let proj = Projection {
            left: start_x + 1,
            top: start_y + 1,
            cols,
            rows,
            world: snap.world,
        };

        let sky = CellStyle::new(Rgb::new(110, 180, 220), SKY);
        fb.fill_rect(proj.left, proj.top, cols, rows, ' ', sky);

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        self.draw_finish_line(fb, &proj);

        let obstacle = CellStyle::new(Rgb::new(90, 190, 70), SKY).bold();
        for rect in &snap.obstacles {
            proj.fill(fb, *rect, '█', obstacle);
        }

        if let Some(ground) = snap.ground {
            let style = CellStyle::new(Rgb::new(150, 110, 60), Rgb::new(110, 80, 40));
            proj.fill(fb, ground, '▓', style);
        }

        let actor_fg = match snap.mode {
            Mode::Crashed(_) => Rgb::new(230, 70, 60),
            _ => Rgb::new(250, 220, 60),
        };
        proj.fill(fb, snap.actor, '█', CellStyle::new(actor_fg, SKY).bold());

        draw_banner(fb, &proj, banner);

        self.draw_status(fb, snap, viewport, start_x, start_y + frame_h);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, banner: &MessageBanner, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, banner, viewport, &mut fb);
        fb
    }

    fn draw_finish_line(&self, fb: &mut FrameBuffer, proj: &Projection) {
        let col = proj.col_f(WIN_THRESHOLD_X);
        if col < 0.0 || col >= proj.cols as f32 {
            return;
        }
        let style = CellStyle::new(Rgb::new(230, 230, 230), SKY).dim();
        let x = proj.left + col as u16;
        for dy in 0..proj.rows {
            fb.put_char(x, proj.top + dy, '┆', style);
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, x: u16, y: u16) {
        if y >= viewport.height {
            return;
        }
        let label = CellStyle::default().bold();
        let value = CellStyle::default();
        let hint = CellStyle::default().dim();

        let mut cx = fb.put_str(x, y, mode_label(snap.mode), label);
        cx = fb.put_str(cx, y, "  EP ", hint);
        cx = fb.put_u32(cx, y, snap.episode_id, value);
        fb.put_str(cx, y, "  space start  ↑ flap  r restart  q quit", hint);
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::NotStarted(_) => "READY",
        Mode::Running => "FLYING",
        Mode::Crashed(_) => "CRASHED",
        Mode::Won(_) => "WON",
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Banner anchored bottom-centre inside the playfield, on a grey fill.
fn draw_banner(fb: &mut FrameBuffer, proj: &Projection, banner: &MessageBanner) {
    let lines = banner.line_count();
    if lines == 0 || lines + 1 > proj.rows {
        return;
    }
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(128, 128, 128)).bold();
    let box_w = (banner.width() + 2).min(proj.cols);
    let box_x = proj.left + (proj.cols - box_w) / 2;
    let box_y = proj.top + proj.rows - 1 - lines;

    fb.fill_rect(box_x, box_y, box_w, lines, ' ', style);
    for (i, line) in banner.lines().enumerate() {
        let w = (line.chars().count() as u16).min(box_w);
        let x = box_x + (box_w - w) / 2;
        let limit = box_x + box_w;
        for (dx, ch) in line.chars().enumerate() {
            let cx = x + dx as u16;
            if cx >= limit {
                break;
            }
            fb.put_char(cx, box_y + i as u16, ch, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec2;

    fn proj(cols: u16, rows: u16) -> Projection {
        Projection {
            left: 1,
            top: 1,
            cols,
            rows,
            world: Rect::new(Vec2::ZERO, Vec2::new(900.0, 600.0)),
        }
    }

    #[test]
    fn projection_maps_world_corners() {
        let p = proj(90, 30);
        assert_eq!(
            p.cells(Rect::new(Vec2::ZERO, Vec2::new(900.0, 600.0))),
            Some((1, 1, 90, 30))
        );
        assert_eq!(
            p.cells(Rect::new(Vec2::new(450.0, 300.0), Vec2::new(10.0, 20.0))),
            Some((46, 16, 1, 1))
        );
    }

    #[test]
    fn projection_clips_offscreen_boxes() {
        let p = proj(90, 30);
        assert_eq!(
            p.cells(Rect::new(Vec2::new(-200.0, 0.0), Vec2::new(100.0, 100.0))),
            None
        );
        // Half above the top edge: clipped to row 0.
        let (_, y, _, h) = p
            .cells(Rect::from_center(Vec2::new(200.0, 0.0), Vec2::new(40.0, 180.0)))
            .unwrap();
        assert_eq!(y, 1);
        assert_eq!(h, 5);
    }

    #[test]
    fn tiny_boxes_still_cover_a_cell() {
        let p = proj(90, 30);
        let (_, _, w, h) = p
            .cells(Rect::new(Vec2::new(100.0, 100.0), Vec2::new(0.5, 0.5)))
            .unwrap();
        assert_eq!((w, h), (1, 1));
    }
}
