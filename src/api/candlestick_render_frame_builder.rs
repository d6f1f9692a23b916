use crate::core::{Candle, CandleGeometry, project_candles};
use crate::render::{CanvasLayerKind, LinePrimitive, RectPrimitive, RenderFrame};

use super::render_frame_builder::{FrameInputs, FrameScales};

/// Appends one wick line and one body rect per candle with finite prices.
///
/// Wicks go to their own layer so bodies are filled over them.
pub(super) fn append_candle_primitives(
    frame: &mut RenderFrame,
    inputs: &FrameInputs<'_>,
    scales: &FrameScales,
) {
    let style = inputs.style;
    let candles = inputs.store.candles();
    let geometries = project_candles(
        candles,
        scales.slots,
        scales.price_pane,
        scales.price_range,
    );

    let drawable: Vec<CandleGeometry> = geometries
        .into_iter()
        .filter(|geometry| is_drawable(&candles[geometry.index], geometry))
        .collect();

    if let Some(layer) = frame.layer_mut(CanvasLayerKind::Wicks) {
        layer.lines.extend(drawable.iter().map(|candle| {
            LinePrimitive::new(
                candle.wick_x,
                candle.wick_top,
                candle.wick_x,
                candle.wick_bottom,
                style.wick_width_px,
                style.wick_color,
            )
        }));
    }

    let Some(layer) = frame.layer_mut(CanvasLayerKind::Candles) else {
        return;
    };
    for candle in &drawable {
        let body_color = if candle.is_bullish {
            style.bullish_color
        } else {
            style.bearish_color
        };
        layer.rects.push(RectPrimitive::new(
            candle.body_left,
            candle.body_top,
            candle.body_width,
            candle.body_bottom - candle.body_top,
            body_color,
        ));
    }
}

fn is_drawable(source: &Candle, candle: &CandleGeometry) -> bool {
    [
        source.open,
        source.high,
        source.low,
        source.close,
        candle.body_left,
        candle.body_width,
        candle.body_top,
        candle.body_bottom,
        candle.wick_x,
        candle.wick_top,
        candle.wick_bottom,
    ]
    .iter()
    .all(|value| value.is_finite())
}
