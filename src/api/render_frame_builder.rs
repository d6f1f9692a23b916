use tracing::trace;

use crate::core::{
    IndicatorClassifier, IndicatorPane, PaneLayout, PaneRect, SeriesStore, TimeLabelZone,
    TimeSlots, ValueRange, Viewport, price_range,
};
use crate::interaction::InteractionState;
use crate::render::{CanvasLayerKind, ClipRect, LinePrimitive, RectPrimitive, RenderFrame};

use super::RenderStyle;
use super::axis_render_frame_builder::append_axis_primitives;
use super::candlestick_render_frame_builder::append_candle_primitives;
use super::crosshair_render_frame_builder::append_crosshair_primitives;
use super::indicator_render_frame_builder::append_indicator_primitives;

/// Everything a frame is derived from.
///
/// Building a frame reads these inputs and nothing else, so identical inputs
/// always produce identical frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub viewport: Viewport,
    pub store: &'a SeriesStore,
    pub interaction: InteractionState,
    pub layout: PaneLayout,
    pub classifier: &'a IndicatorClassifier,
    pub style: &'a RenderStyle,
    pub oscillator_default_range: ValueRange,
    pub value_tick_count: usize,
    pub time_tick_count: usize,
    pub time_zone: TimeLabelZone,
    pub separator_thickness: f64,
}

/// Per-frame scales shared by the data-dependent layers.
#[derive(Debug, Clone, Copy)]
pub(super) struct FrameScales {
    pub slots: TimeSlots,
    pub price_pane: PaneRect,
    pub price_range: ValueRange,
    pub oscillator_pane: PaneRect,
    pub oscillator_range: ValueRange,
}

impl FrameScales {
    /// `None` when there are no candles with a finite price range.
    pub(super) fn resolve(inputs: &FrameInputs<'_>) -> Option<Self> {
        let candles = inputs.store.candles();
        let price_range = price_range(candles)?;
        let layout = inputs.layout;

        Some(Self {
            slots: TimeSlots::new(layout.plot_left, layout.plot_width(), candles.len()),
            price_pane: layout.price_pane(),
            price_range,
            oscillator_pane: layout.oscillator_pane(),
            oscillator_range: oscillator_range(inputs),
        })
    }
}

/// The default band widened by every enabled oscillator series.
pub(super) fn oscillator_range(inputs: &FrameInputs<'_>) -> ValueRange {
    inputs
        .store
        .indicators()
        .iter()
        .filter(|(name, series)| {
            inputs.classifier.classify(series) == IndicatorPane::Oscillator
                && inputs.store.is_enabled(name)
        })
        .filter_map(|(_, series)| series.value_range())
        .fold(inputs.oscillator_default_range, ValueRange::union)
}

/// Builds the full layered frame.
///
/// Missing candles leave the candle, indicator, axis, crosshair and tooltip
/// layers empty; the surface is still cleared and the divider still drawn.
#[must_use]
pub fn build_render_frame(inputs: &FrameInputs<'_>) -> RenderFrame {
    let mut frame = RenderFrame::new(inputs.viewport);
    let viewport = inputs.viewport;

    if let Some(layer) = frame.layer_mut(CanvasLayerKind::Clear) {
        layer.rects.push(RectPrimitive::new(
            0.0,
            0.0,
            viewport.width_px(),
            viewport.height_px(),
            inputs.style.background_color,
        ));
    }

    if !inputs.layout.has_plot_area() {
        trace!(
            width = viewport.width,
            height = viewport.height,
            "surface too small for panes, frame cleared only"
        );
        return frame;
    }

    let scales = FrameScales::resolve(inputs);
    if let Some(scales) = scales {
        append_candle_primitives(&mut frame, inputs, &scales);
        if let Some(layer) = frame.layer_mut(CanvasLayerKind::Overlays) {
            layer.clip = Some(clip_for(scales.price_pane));
            append_indicator_primitives(layer, inputs, &scales, IndicatorPane::Overlay);
        }
        if let Some(layer) = frame.layer_mut(CanvasLayerKind::Oscillators) {
            layer.clip = Some(clip_for(scales.oscillator_pane));
            append_indicator_primitives(layer, inputs, &scales, IndicatorPane::Oscillator);
        }
        if let Some(layer) = frame.layer_mut(CanvasLayerKind::PriceAxis) {
            append_axis_primitives(layer, inputs, scales.price_pane, scales.price_range, true);
        }
        if let Some(layer) = frame.layer_mut(CanvasLayerKind::OscillatorAxis) {
            append_axis_primitives(
                layer,
                inputs,
                scales.oscillator_pane,
                scales.oscillator_range,
                false,
            );
        }
    }

    if let Some(layer) = frame.layer_mut(CanvasLayerKind::Separator) {
        let layout = inputs.layout;
        layer.lines.push(LinePrimitive::new(
            layout.plot_left,
            layout.separator_y,
            layout.plot_right,
            layout.separator_y,
            inputs.separator_thickness,
            inputs.style.separator_color,
        ));
    }

    if let Some(scales) = scales {
        append_crosshair_primitives(&mut frame, inputs, &scales);
    }

    trace!(
        lines = frame.line_count(),
        rects = frame.rect_count(),
        texts = frame.text_count(),
        "built render frame"
    );
    frame
}

fn clip_for(pane: PaneRect) -> ClipRect {
    ClipRect::new(pane.left, pane.top, pane.width(), pane.height())
}
