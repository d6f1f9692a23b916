//! candle-canvas: two-pane OHLC candlestick chart engine.
//!
//! Candles and overlay indicators share the upper price pane; oscillator
//! indicators live in a lower pane whose height follows a draggable divider.
//! Frames are built as backend-agnostic draw layers and handed to a
//! `render::Renderer`, keeping chart state and pointer handling testable
//! without a display.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
