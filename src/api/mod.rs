mod axis_render_frame_builder;
mod candlestick_render_frame_builder;
mod crosshair_render_frame_builder;
mod data_controller;
mod engine;
mod engine_config;
mod indicator_render_frame_builder;
mod interaction_controller;
mod invalidation;
mod render_frame_builder;
mod render_style;
mod validation;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use invalidation::{InvalidationTopic, RenderRequests};
pub use render_frame_builder::{FrameInputs, build_render_frame};
pub use render_style::RenderStyle;

pub use crate::interaction::{CursorShape, InteractionMode, InteractionState};
