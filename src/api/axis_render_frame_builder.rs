use crate::core::{PaneRect, ValueRange, time_ticks, value_ticks};
use crate::render::{FrameLayer, LinePrimitive, TextHAlign, TextPrimitive};

use super::render_frame_builder::FrameInputs;

const VALUE_LABEL_GAP_PX: f64 = 6.0;
const VALUE_LABEL_BASELINE_SHIFT_PX: f64 = 4.0;
const TIME_LABEL_OFFSET_PX: f64 = 12.0;

/// Appends grid lines, value labels and axis lines for one pane.
///
/// Time labels are only drawn under the price pane so the shared time axis
/// is labelled once.
pub(super) fn append_axis_primitives(
    layer: &mut FrameLayer,
    inputs: &FrameInputs<'_>,
    pane: PaneRect,
    range: ValueRange,
    show_time_labels: bool,
) {
    let style = inputs.style;
    let candles = inputs.store.candles();
    let (Some(first), Some(last)) = (candles.first(), candles.last()) else {
        return;
    };

    for tick in value_ticks(range, pane.top, pane.bottom, inputs.value_tick_count) {
        layer.lines.push(LinePrimitive::new(
            pane.left,
            tick.y,
            pane.right,
            tick.y,
            1.0,
            style.grid_line_color,
        ));
        layer.texts.push(TextPrimitive::new(
            tick.label,
            pane.left - VALUE_LABEL_GAP_PX,
            tick.y + VALUE_LABEL_BASELINE_SHIFT_PX,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Right,
        ));
    }

    for tick in time_ticks(
        first.timestamp,
        last.timestamp,
        pane.left,
        pane.width(),
        inputs.time_tick_count,
        inputs.time_zone,
    ) {
        layer.lines.push(LinePrimitive::new(
            tick.x,
            pane.bottom,
            tick.x,
            pane.top,
            1.0,
            style.grid_line_color,
        ));
        if show_time_labels {
            layer.texts.push(TextPrimitive::new(
                tick.label,
                tick.x,
                pane.bottom + TIME_LABEL_OFFSET_PX,
                style.label_font_size_px,
                style.label_color,
                TextHAlign::Center,
            ));
        }
    }

    layer.lines.push(LinePrimitive::new(
        pane.left,
        pane.top,
        pane.left,
        pane.bottom,
        1.0,
        style.axis_line_color,
    ));
    layer.lines.push(LinePrimitive::new(
        pane.left,
        pane.bottom,
        pane.right,
        pane.bottom,
        1.0,
        style.axis_line_color,
    ));
}
