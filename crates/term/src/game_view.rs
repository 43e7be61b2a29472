//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). Layout, top to bottom:
//!
//! ```text
//!                 Sound Match!
//!               Audio Memory Game
//!            Score: 10 | Matches: 1/3
//!   Use arrow keys to navigate, Enter/Space to select
//!       Press H for help, R to restart, Q to quit
//!
//!      ┌──────────┐  ┌──────────┐  ┌──────────┐
//!      │    ✓     │  │    ✓     │  │    3     │
//!      └──────────┘  └──────────┘  └──────────┘
//!      ┌──────────┐  ┌──────────┐  ┌──────────┐
//!      │    ♪     │  │    5     │  │    6     │
//!      └──────────┘  └──────────┘  └──────────┘
//!
//!        <caption: the current announcement>
//! ```
//!
//! The same [`Layout`] drives drawing and [`GameView::target_at`], so mouse
//! hit-testing always agrees with what is on screen.

use crate::core::{GameSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    tile_position, PointerTarget, TileState, GRID_COLS, GRID_ROWS, PAIR_COUNT, TILE_COUNT,
};

const SCREEN_BG: Rgb = Rgb::new(17, 24, 39);
const TEXT: Rgb = Rgb::new(229, 231, 235);
const MUTED: Rgb = Rgb::new(156, 163, 175);
const TILE_BG: Rgb = Rgb::new(55, 65, 81);
const FOCUS_BG: Rgb = Rgb::new(37, 99, 235);
const SELECTED_BG: Rgb = Rgb::new(59, 130, 246);
const MATCHED_BG: Rgb = Rgb::new(22, 163, 74);
const FOCUS_RING: Rgb = Rgb::new(250, 204, 21);
const BANNER: Rgb = Rgb::new(74, 222, 128);

const HEADER_ROWS: u16 = 6;
const GAP_X: u16 = 2;
const GAP_Y: u16 = 1;
const CAPTION_LINES: u16 = 3;
const CAPTION_MAX_W: u16 = 64;
const PLAY_AGAIN: &str = "Play Again (R)";

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

/// Screen rectangle of one tile, border included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl TileRect {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.w
            && (y - self.y) < self.h
    }
}

/// Resolved positions for one viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub grid_x: u16,
    pub grid_y: u16,
    pub tile_w: u16,
    pub tile_h: u16,
    pub caption_y: u16,
    pub banner_y: u16,
    /// The completion banner's restart button, one row high.
    pub play_again: TileRect,
}

impl Layout {
    pub fn tile_rect(&self, index: usize) -> TileRect {
        let (row, col) = tile_position(index);
        TileRect {
            x: self.grid_x + col as u16 * (self.tile_w + GAP_X),
            y: self.grid_y + row as u16 * (self.tile_h + GAP_Y),
            w: self.tile_w,
            h: self.tile_h,
        }
    }
}

/// A lightweight terminal renderer for the sound matching board.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    tile_w: u16,
    tile_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            tile_w: 12,
            tile_h: 5,
        }
    }
}

impl GameView {
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let grid_w = GRID_COLS as u16 * self.tile_w + (GRID_COLS as u16 - 1) * GAP_X;
        let grid_h = GRID_ROWS as u16 * self.tile_h + (GRID_ROWS as u16 - 1) * GAP_Y;
        let grid_y = HEADER_ROWS;
        let caption_y = grid_y + grid_h + 1;
        let banner_y = caption_y + CAPTION_LINES + 1;
        let button_w = PLAY_AGAIN.chars().count() as u16;
        Layout {
            grid_x: viewport.width.saturating_sub(grid_w) / 2,
            grid_y,
            tile_w: self.tile_w,
            tile_h: self.tile_h,
            caption_y,
            banner_y,
            play_again: TileRect {
                x: viewport.width.saturating_sub(button_w) / 2,
                y: banner_y + 3,
                w: button_w,
                h: 1,
            },
        }
    }

    /// Tile index under terminal cell `(x, y)`, if any.
    pub fn tile_at(&self, viewport: Viewport, x: u16, y: u16) -> Option<usize> {
        let layout = self.layout(viewport);
        (0..TILE_COUNT).find(|&i| layout.tile_rect(i).contains(x, y))
    }

    /// Whether `(x, y)` is on the "Play Again" button. The button only
    /// exists while the completion banner is drawn.
    pub fn play_again_at(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> bool {
        snap.complete && self.layout(viewport).play_again.contains(x, y)
    }

    /// Whatever a pointer press at `(x, y)` would activate.
    pub fn target_at(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<PointerTarget> {
        if self.play_again_at(snap, viewport, x, y) {
            return Some(PointerTarget::PlayAgain);
        }
        self.tile_at(viewport, x, y).map(PointerTarget::Tile)
    }

    /// Render into an existing framebuffer.
    ///
    /// `caption` is the announcement currently being spoken, if any.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        caption: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(TEXT, SCREEN_BG).cell(' '));

        let layout = self.layout(viewport);
        self.draw_header(fb, snap, viewport);

        // Open tiles dim while a pair is being evaluated.
        let locked = !snap.playable();
        for (index, tile) in snap.tiles.iter().enumerate() {
            let focused = snap.focus == index;
            self.draw_tile(fb, layout.tile_rect(index), index, tile, focused, locked);
        }

        if let Some(text) = caption {
            let w = viewport.width.min(CAPTION_MAX_W);
            let x = (viewport.width - w) / 2;
            put_wrapped(
                fb,
                x,
                layout.caption_y,
                w,
                CAPTION_LINES,
                text,
                CellStyle::new(TEXT, SCREEN_BG),
            );
        }

        if snap.complete {
            self.draw_banner(fb, snap.score, &layout, viewport.width);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        caption: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, caption, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let w = viewport.width;
        let title = CellStyle::new(TEXT, SCREEN_BG).bold();
        let muted = CellStyle::new(MUTED, SCREEN_BG);

        fb.put_str_centered(0, 0, w, "Sound Match!", title);
        fb.put_str_centered(0, 1, w, "Audio Memory Game", muted);

        // "Score: N | Matches: m/3", centered without formatting into a String.
        let status = CellStyle::new(TEXT, SCREEN_BG);
        let len = 7 + digits(snap.score) + 12 + digits(snap.matches as u32) + 2;
        let mut x = w.saturating_sub(len) / 2;
        x = fb.put_str(x, 2, "Score: ", status);
        x = fb.put_u32(x, 2, snap.score, status);
        x = fb.put_str(x, 2, " | Matches: ", status);
        x = fb.put_u32(x, 2, snap.matches as u32, status);
        x = fb.put_str(x, 2, "/", status);
        fb.put_u32(x, 2, PAIR_COUNT as u32, status);

        fb.put_str_centered(
            0,
            3,
            w,
            "Use arrow keys to navigate, Enter/Space to select",
            muted,
        );
        fb.put_str_centered(0, 4, w, "Press H for help, R to restart, Q to quit", muted);
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        rect: TileRect,
        index: usize,
        tile: &TileSnapshot,
        focused: bool,
        locked: bool,
    ) {
        let state = tile.state();
        let bg = if tile.selected {
            SELECTED_BG
        } else if tile.matched {
            MATCHED_BG
        } else if focused {
            FOCUS_BG
        } else {
            TILE_BG
        };
        let mut face = CellStyle::new(TEXT, bg).bold();
        if state == TileState::Matched || (locked && state == TileState::Available) {
            face = face.dim();
        }
        let border = if focused {
            CellStyle::new(FOCUS_RING, SCREEN_BG).bold()
        } else {
            CellStyle::new(MUTED, SCREEN_BG)
        };

        fb.fill_rect(rect.x + 1, rect.y + 1, rect.w - 2, rect.h - 2, ' ', face);
        fb.draw_box(rect.x, rect.y, rect.w, rect.h, border);

        let inner_w = rect.w - 2;
        let mid = rect.y + rect.h / 2;
        let label = match state {
            TileState::Matched => Some('✓'),
            TileState::Selected => Some('♪'),
            TileState::Available => None,
        };
        let label_x = rect.x + 1 + (inner_w - 1) / 2;
        match label {
            Some(ch) => fb.put_char(label_x, mid, ch, face),
            None => {
                fb.put_u32(label_x, mid, index as u32 + 1, face);
            }
        }

        if rect.h >= 5 {
            let small = CellStyle { bold: false, ..face };
            fb.put_str_centered(rect.x + 1, mid + 1, inner_w, state.as_str(), small);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, score: u32, layout: &Layout, width: u16) {
        let y = layout.banner_y;
        let banner = CellStyle::new(BANNER, SCREEN_BG).bold();
        let text = CellStyle::new(TEXT, SCREEN_BG);

        fb.put_str_centered(0, y, width, "Congratulations!", banner);

        let line = y + 1;
        let len = 39 + digits(score) + 1;
        let mut x = width.saturating_sub(len) / 2;
        x = fb.put_str(x, line, "You completed the game with a score of ", text);
        x = fb.put_u32(x, line, score, text);
        fb.put_str(x, line, "!", text);

        let button = layout.play_again;
        fb.put_str(button.x, button.y, PLAY_AGAIN, banner);
    }
}

fn digits(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Word-wrap `text` into at most `max_lines` rows of width `w`, each centered.
/// Words longer than a row are cut.
fn put_wrapped(
    fb: &mut FrameBuffer,
    x: u16,
    y: u16,
    w: u16,
    max_lines: u16,
    text: &str,
    style: CellStyle,
) {
    if w == 0 {
        return;
    }
    let mut line = 0;
    let mut rest = text.trim();
    while line < max_lines && !rest.is_empty() {
        let (row, next) = split_row(rest, w as usize);
        fb.put_str_centered(x, y + line, w, row, style);
        rest = next.trim_start();
        line += 1;
    }
}

/// Longest prefix of `text` that fits in `w` chars, broken at a space when
/// possible.
fn split_row(text: &str, w: usize) -> (&str, &str) {
    let mut last_space = None;
    for (count, (i, ch)) in text.char_indices().enumerate() {
        if count == w {
            return match last_space {
                Some(s) => (&text[..s], &text[s..]),
                None => (&text[..i], &text[i..]),
            };
        }
        if ch == ' ' {
            last_space = Some(i);
        }
    }
    (text, "")
}
