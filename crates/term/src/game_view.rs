//! GameView: draws a grid and a view snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-testable. Only the visible rows are
//! drawn: the hidden buffer above the danger row never appears on screen, and
//! neither do active or ghost cells that sit inside it.

use crate::core::pieces::{occupied_cells, Shape};
use crate::core::{Grid, PiecePreview, ViewSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, HIDDEN_ROWS};

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

/// Everything one frame shows
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Locked cells, including the hidden rows
    pub grid: &'a Grid,
    pub view: &'a ViewSnapshot,
    /// Driver-side pause flag
    pub paused: bool,
    /// Points from a recent clear, shown as `+N` under the score
    pub bonus: Option<u32>,
}

/// Short-lived `+N` shown after a line clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusNotice {
    points: u32,
    remaining_ms: u32,
}

impl BonusNotice {
    pub const SHOW_MS: u32 = 2000;

    pub fn show(&mut self, points: u32) {
        self.points = points;
        self.remaining_ms = Self::SHOW_MS;
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
    }

    pub fn clear(&mut self) {
        self.remaining_ms = 0;
    }

    /// The points to display, while the notice is still up
    pub fn points(&self) -> Option<u32> {
        (self.remaining_ms > 0).then_some(self.points)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 12;

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered well for a grid, in terminal cells
    pub fn frame_size(&self, grid: &Grid) -> (u16, u16) {
        let w = (grid.width() as u64 * u64::from(self.cell_w) + 2).min(u64::from(u16::MAX));
        let h = (visible_rows(grid) as u64 + 2).min(u64::from(u16::MAX));
        (w as u16, h as u16)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, frame: Frame<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size(frame.grid);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let well = Well {
            x: start_x,
            y: start_y,
            cell_w: self.cell_w,
            cols: frame.grid.width(),
            rows: visible_rows(frame.grid),
        };

        draw_border(fb, start_x, start_y, frame_w, frame_h, CellStyle::default());

        for (y, row) in frame.grid.rows().enumerate().skip(HIDDEN_ROWS) {
            for (x, &cell) in row.iter().enumerate() {
                match PieceKind::from_id(cell) {
                    Some(kind) => well.fill(fb, x as i32, y as i32, '█', block_style(kind)),
                    None => well.fill(
                        fb,
                        x as i32,
                        y as i32,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim(),
                    ),
                }
            }
        }

        let view = frame.view;
        if !view.game_over {
            let ghost = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
            for (x, y) in view.ghost_cells() {
                well.fill(fb, x, y, '░', ghost);
            }
            for (x, y) in view.active_cells() {
                well.fill(fb, x, y, '█', block_style(view.kind));
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, view, frame.bonus, viewport, panel_x, start_y);

        if frame.paused {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if view.game_over {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: Frame<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        view: &ViewSnapshot,
        bonus: Option<u32>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        for (name, n) in [
            ("SCORE", view.score),
            ("LEVEL", view.level),
            ("LINES", view.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        if let Some(points) = bonus {
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_char(panel_x, start_y + 2, '+', style);
            fb.put_u32(panel_x + 1, start_y + 2, points, style);
        }

        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        match view.held {
            Some(held) => self.draw_preview(fb, panel_x, y, &held, !view.can_hold),
            None => fb.put_str(panel_x, y, "-", value),
        }
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for preview in &view.next {
            if y >= viewport.height {
                break;
            }
            self.draw_preview(fb, panel_x, y, preview, false);
            y += 3;
        }
    }

    /// Draw a spawn shape compactly: empty leading rows are skipped.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, preview: &PiecePreview, dim: bool) {
        let top = top_row(&preview.shape);
        let mut style = block_style(preview.kind);
        if dim {
            style = style.dim();
        }
        style.bg = Rgb::new(0, 0, 0);
        for (col, row) in occupied_cells(&preview.shape) {
            let px = x.saturating_add((col as u16).saturating_mul(self.cell_w));
            let py = y.saturating_add((row - top) as u16);
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }
}

/// Placement of the well's interior on screen
struct Well {
    x: u16,
    y: u16,
    cell_w: u16,
    cols: usize,
    rows: usize,
}

impl Well {
    /// Fill grid cell `(gx, gy)`; cells outside the visible area are skipped.
    fn fill(&self, fb: &mut FrameBuffer, gx: i32, gy: i32, ch: char, style: CellStyle) {
        let vy = gy - HIDDEN_ROWS as i32;
        if gx < 0 || vy < 0 || gx as usize >= self.cols || vy as usize >= self.rows {
            return;
        }
        let px = u32::from(self.x) + 1 + gx as u32 * u32::from(self.cell_w);
        let py = u32::from(self.y) + 1 + vy as u32;
        // Off-screen cells of an oversized well
        let (Ok(px), Ok(py)) = (u16::try_from(px), u16::try_from(py)) else {
            return;
        };
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }
}

fn visible_rows(grid: &Grid) -> usize {
    grid.height().saturating_sub(HIDDEN_ROWS)
}

fn top_row(shape: &Shape) -> i32 {
    occupied_cells(shape).map(|(_, row)| row).min().unwrap_or(0)
}

fn block_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    };
    CellStyle::new(fg, WELL_BG).bold()
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

fn draw_overlay_text(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
    let ty = y.saturating_add(h / 2);
    fb.put_str(tx, ty, text, CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_row_skips_empty_leading_rows() {
        let i = crate::core::Piece::of(PieceKind::I);
        let t = crate::core::Piece::of(PieceKind::T);
        assert_eq!(top_row(i.spawn_shape()), 1);
        assert_eq!(top_row(t.spawn_shape()), 0);
    }

    #[test]
    fn bonus_notice_expires() {
        let mut notice = BonusNotice::default();
        assert_eq!(notice.points(), None);
        notice.show(200);
        notice.tick(BonusNotice::SHOW_MS - 1);
        assert_eq!(notice.points(), Some(200));
        notice.tick(1);
        assert_eq!(notice.points(), None);
        notice.show(50);
        notice.clear();
        assert_eq!(notice.points(), None);
    }

    #[test]
    fn well_fill_skips_hidden_rows() {
        let mut fb = FrameBuffer::new(10, 10);
        let well = Well {
            x: 0,
            y: 0,
            cell_w: 2,
            cols: 4,
            rows: 8,
        };
        well.fill(&mut fb, 0, 1, 'x', CellStyle::default());
        assert!(fb.cells().iter().all(|c| c.ch == ' '));
        well.fill(&mut fb, 0, 2, 'x', CellStyle::default());
        assert_eq!(fb.get(1, 1).map(|c| c.ch), Some('x'));
        assert_eq!(fb.get(2, 1).map(|c| c.ch), Some('x'));
    }
}
