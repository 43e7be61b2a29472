//! Terminal rendering for the sound matching board.
//!
//! A small framebuffer pipeline instead of a widget toolkit: [`GameView`]
//! draws a snapshot into a [`FrameBuffer`], and [`TerminalRenderer`] flushes
//! it to the terminal with diffed redraws. The view also owns mouse
//! hit-testing ([`GameView::target_at`]) so clicks resolve against the same
//! layout that was drawn.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use sound_match_core as core;
pub use sound_match_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Layout, TileRect, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
