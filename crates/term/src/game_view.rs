//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::time::Duration;

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    GameMode, Outcome, Tile, GRID_SIZE, SCORE_RACE_TARGET, TIME_ATTACK_LIMIT_SECS,
    TURN_LIMIT_TARGET, TURN_LIMIT_TURNS,
};

const BOARD_BG: Rgb = Rgb::new(40, 36, 32);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Session-level information drawn around the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusView<'a> {
    pub high_score: u32,
    /// One-line feedback such as "Saved to game.txt".
    pub message: Option<&'a str>,
    /// Text typed so far at the save-file prompt.
    pub prompt: Option<&'a str>,
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 8,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(3),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        status: &StatusView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = GRID_SIZE as u16 * self.cell_w;
        let board_h = GRID_SIZE as u16 * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let panel_w = 22;

        let start_x = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h + 4) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let tile = snap.grid.get(row, col).unwrap_or_default();
                self.draw_tile(fb, start_x, start_y, row as u16, col as u16, tile);
            }
        }

        self.draw_side_panel(fb, snap, status, viewport, start_x + frame_w + 2, start_y);

        let mut y = start_y + frame_h + 1;
        let hint = CellStyle::new(Rgb::new(150, 150, 150), PANEL_BG).dim();
        fb.put_str(
            start_x,
            y,
            "arrows/asdw move  u undo  r restart  l save  q quit",
            hint,
        );
        y += 1;

        let text = CellStyle::new(Rgb::new(230, 230, 230), PANEL_BG);
        if let Some(prompt) = status.prompt {
            let x = fb.put_str(start_x, y, "Save as: ", text.bold());
            let x = fb.put_str(x, y, prompt, text);
            fb.put_char(x, y, '_', text);
        } else if let Some(message) = status.message {
            fb.put_str(start_x, y, message, text);
        }

        if let Some(outcome) = status.outcome {
            let banner = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
            let mid_y = start_y + frame_h / 2;
            fb.put_str_centered(start_x, mid_y, frame_w, outcome_banner(outcome), banner);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        status: &StatusView<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, status, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        tile: Tile,
    ) {
        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        // One column of board background between tiles.
        let inner_w = self.cell_w - 1;
        let style = tile_style(tile);
        match tile {
            Tile::Empty => {
                fb.put_str_centered(px, py + self.cell_h / 2, inner_w, "·", style);
            }
            _ => {
                fb.fill_rect(px, py, inner_w, self.cell_h, ' ', style);
                let label = tile_label(tile, inner_w as usize);
                fb.put_str_centered(px, py + self.cell_h / 2, inner_w, &label, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        status: &StatusView<'_>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "MODE", label);
        fb.put_str(panel_x, y + 1, snap.mode.name(), value);
        y += 3;

        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "BEST", label);
        fb.put_u32(panel_x, y + 1, status.high_score.max(snap.score), value);
        y += 3;

        fb.put_str(panel_x, y, "TURNS", label);
        fb.put_u32(panel_x, y + 1, snap.turns, value);
        y += 3;

        match snap.mode {
            GameMode::TimeAttack => {
                let left = Duration::from_secs(TIME_ATTACK_LIMIT_SECS).saturating_sub(snap.elapsed);
                fb.put_str(panel_x, y, "TIME LEFT", label);
                fb.put_str(panel_x, y + 1, &format_clock(left), value);
            }
            GameMode::ScoreRace => {
                fb.put_str(panel_x, y, "TARGET", label);
                fb.put_u32(panel_x, y + 1, SCORE_RACE_TARGET, value);
            }
            GameMode::TurnLimit => {
                fb.put_str(panel_x, y, "TARGET", label);
                let x = fb.put_u32(panel_x, y + 1, TURN_LIMIT_TARGET, value);
                let x = fb.put_str(x, y + 1, " in ", value);
                fb.put_u32(x, y + 1, TURN_LIMIT_TURNS, value);
            }
            _ => {
                fb.put_str(panel_x, y, "TIME", label);
                fb.put_str(panel_x, y + 1, &format_clock(snap.elapsed), value);
            }
        }
        y += 3;

        if snap.can_undo {
            fb.put_str(panel_x, y, "undo ready", value.dim());
        }
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

/// Text shown on a tile, shortened with K/M suffixes when it does not fit.
pub fn tile_label(tile: Tile, width: usize) -> String {
    match tile {
        Tile::Empty => String::new(),
        Tile::Bomb => "X".to_string(),
        Tile::Chance => "O".to_string(),
        Tile::Numeric(_) => {
            let value = tile.value().unwrap_or_default();
            let full = value.to_string();
            if full.len() <= width {
                full
            } else if value >= 1 << 20 {
                format!("{}M", value >> 20)
            } else {
                format!("{}K", value >> 10)
            }
        }
    }
}

fn tile_style(tile: Tile) -> CellStyle {
    let dark = Rgb::new(60, 52, 44);
    let light = Rgb::new(250, 246, 240);
    match tile {
        Tile::Empty => CellStyle::new(Rgb::new(90, 84, 76), BOARD_BG).dim(),
        Tile::Bomb => CellStyle::new(light, Rgb::new(150, 30, 30)).bold(),
        Tile::Chance => CellStyle::new(dark, Rgb::new(120, 200, 220)).bold(),
        Tile::Numeric(rank) => {
            let bg = match rank {
                1 => Rgb::new(238, 228, 218),
                2 => Rgb::new(237, 224, 200),
                3 => Rgb::new(242, 177, 121),
                4 => Rgb::new(245, 149, 99),
                5 => Rgb::new(246, 124, 95),
                6 => Rgb::new(246, 94, 59),
                7 => Rgb::new(237, 207, 114),
                8 => Rgb::new(237, 204, 97),
                9 => Rgb::new(237, 200, 80),
                10 => Rgb::new(237, 197, 63),
                11 => Rgb::new(237, 194, 46),
                _ => Rgb::new(60, 58, 50),
            };
            let fg = if rank <= 2 { dark } else { light };
            CellStyle::new(fg, bg).bold()
        }
    }
}

fn outcome_banner(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Won => " YOU WIN ",
        Outcome::Lost => " GAME OVER ",
        Outcome::TimedOut => " TIME UP ",
        Outcome::Quit => " BYE ",
    }
}

/// `m:ss` clock text.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
