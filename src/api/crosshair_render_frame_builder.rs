use smallvec::SmallVec;

use crate::core::{Candle, IndicatorMap, SlotAnchor, TimeLabelZone, format_time_label};
use crate::render::{
    CanvasLayerKind, LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::render_frame_builder::{FrameInputs, FrameScales};

const TOOLTIP_POINTER_OFFSET_PX: f64 = 10.0;
const TOOLTIP_EDGE_MARGIN_PX: f64 = 10.0;
const TOOLTIP_TEXT_INSET_PX: f64 = 8.0;
const TOOLTIP_VERTICAL_PADDING_PX: f64 = 8.0;
/// Average glyph advance as a fraction of the font size.
const TOOLTIP_GLYPH_WIDTH_RATIO: f64 = 0.6;

pub(super) type TooltipLines = SmallVec<[String; 8]>;

/// Appends the dashed crosshair through the hovered candle and, on the
/// layer above it, the tooltip.
pub(super) fn append_crosshair_primitives(
    frame: &mut RenderFrame,
    inputs: &FrameInputs<'_>,
    scales: &FrameScales,
) {
    let Some(index) = inputs.interaction.hover_index() else {
        return;
    };
    let Some(candle) = inputs.store.candles().get(index).copied() else {
        return;
    };

    let style = inputs.style;
    let layout = inputs.layout;
    let dashed = LineStrokeStyle::Dashed {
        dash_px: style.crosshair_dash_px,
    };

    let Some(layer) = frame.layer_mut(CanvasLayerKind::Crosshair) else {
        return;
    };
    let x = scales.slots.index_to_x(index, SlotAnchor::Center);
    layer.lines.push(
        LinePrimitive::new(x, layout.price_top, x, layout.osc_bottom, 1.0, style.crosshair_color)
            .with_stroke_style(dashed),
    );

    let y = scales
        .price_range
        .value_to_y(candle.close, scales.price_pane.top, scales.price_pane.bottom);
    if y.is_finite() {
        layer.lines.push(
            LinePrimitive::new(
                layout.plot_left,
                y,
                layout.plot_right,
                y,
                1.0,
                style.crosshair_color,
            )
            .with_stroke_style(dashed),
        );
    }

    let lines = tooltip_lines(candle, index, inputs.store.indicators(), inputs.time_zone);
    let font_size = style.tooltip_font_size_px;
    let line_height = style.tooltip_line_height_px;
    let box_width = lines
        .iter()
        .map(|line| font_size * line.chars().count() as f64 * TOOLTIP_GLYPH_WIDTH_RATIO)
        .fold(0.0, f64::max);
    let box_height = lines.len() as f64 * line_height + TOOLTIP_VERTICAL_PADDING_PX;
    let (pointer_x, pointer_y) = inputs.interaction.hover_position();
    let box_x = tooltip_origin(pointer_x, box_width, inputs.viewport.width_px());
    let box_y = tooltip_origin(pointer_y, box_height, inputs.viewport.height_px());

    let Some(layer) = frame.layer_mut(CanvasLayerKind::Tooltip) else {
        return;
    };
    layer.rects.push(
        RectPrimitive::new(box_x, box_y, box_width, box_height, style.tooltip_background_color)
            .with_border(1.0, style.tooltip_border_color),
    );
    for (row, line) in lines.into_iter().enumerate() {
        layer.texts.push(TextPrimitive::new(
            line,
            box_x + TOOLTIP_TEXT_INSET_PX,
            box_y + (row + 1) as f64 * line_height,
            font_size,
            style.tooltip_text_color,
            TextHAlign::Left,
        ));
    }
}

/// Tooltip text: time, OHLC, volume, then every indicator covering `index`.
pub(super) fn tooltip_lines(
    candle: Candle,
    index: usize,
    indicators: &IndicatorMap,
    zone: TimeLabelZone,
) -> TooltipLines {
    let mut lines = TooltipLines::new();
    lines.push(format!("Time: {}", format_time_label(candle.timestamp, zone)));
    lines.push(format!(
        "O: {:.2}  H: {:.2}  L: {:.2}  C: {:.2}",
        candle.open, candle.high, candle.low, candle.close
    ));
    lines.push(format!("V: {:.2}", candle.volume));
    for (name, series) in indicators {
        if let Some(value) = series.value_at(index) {
            lines.push(format!("{name}: {value:.4}"));
        }
    }
    lines
}

/// Places the box past the pointer, flipping back inside when it would overflow.
fn tooltip_origin(pointer: f64, extent: f64, surface: f64) -> f64 {
    let origin = pointer + TOOLTIP_POINTER_OFFSET_PX;
    if origin + extent > surface {
        return (surface - extent - TOOLTIP_EDGE_MARGIN_PX).max(0.0);
    }
    origin
}
