//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. It renders a
//! [`GridSnapshot`](tui_match3_core::GridSnapshot) into a framebuffer that is
//! then flushed to the terminal, so the view itself stays pure and testable.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
