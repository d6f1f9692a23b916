use crate::core::{IndicatorPane, IndicatorSeries, PaneRect, SlotAnchor, TimeSlots, ValueRange};
use crate::render::{FrameLayer, LinePrimitive};

use super::render_frame_builder::{FrameInputs, FrameScales};

/// Appends polylines for every enabled indicator classified into `pane`.
///
/// Colors come from the pane's palette by the series' position among all
/// series of that pane, so toggling one series never recolors another.
pub(super) fn append_indicator_primitives(
    layer: &mut FrameLayer,
    inputs: &FrameInputs<'_>,
    scales: &FrameScales,
    pane: IndicatorPane,
) {
    let (rect, range) = match pane {
        IndicatorPane::Overlay => (scales.price_pane, scales.price_range),
        IndicatorPane::Oscillator => (scales.oscillator_pane, scales.oscillator_range),
    };

    let series_in_pane = inputs
        .store
        .indicators()
        .iter()
        .filter(|(_, series)| inputs.classifier.classify(series) == pane);
    for (position, (name, series)) in series_in_pane.enumerate() {
        if !inputs.store.is_enabled(name) || series.len() < 2 {
            continue;
        }
        let color = match pane {
            IndicatorPane::Overlay => inputs.style.overlay_color(position),
            IndicatorPane::Oscillator => inputs.style.oscillator_color(position),
        };
        for (x1, y1, x2, y2) in polyline_segments(series, scales.slots, rect, range) {
            layer.lines.push(LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                inputs.style.indicator_line_width_px,
                color,
            ));
        }
    }
}

/// Segments joining consecutive finite points, clipped to the candle count.
///
/// A value that is not finite, or does not project to finite pixels, breaks
/// the line.
fn polyline_segments(
    series: &IndicatorSeries,
    slots: TimeSlots,
    rect: PaneRect,
    range: ValueRange,
) -> Vec<(f64, f64, f64, f64)> {
    let count = slots.count().min(series.len());
    let points: Vec<Option<(f64, f64)>> = series.values[..count]
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let x = slots.index_to_x(index, SlotAnchor::Center);
            let y = range.value_to_y(*value, rect.top, rect.bottom);
            (value.is_finite() && x.is_finite() && y.is_finite()).then_some((x, y))
        })
        .collect();

    points
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Some((x1, y1)), Some((x2, y2))) => Some((x1, y1, x2, y2)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::polyline_segments;
    use crate::core::{IndicatorSeries, PaneRect, TimeSlots, ValueRange};

    #[test]
    fn nan_values_break_the_line() {
        let series = IndicatorSeries::new("SMA", vec![f64::NAN, 1.0, 2.0, f64::NAN, 3.0, 4.0], vec![]);
        let segments = polyline_segments(
            &series,
            TimeSlots::new(0.0, 600.0, 6),
            PaneRect::new(0.0, 600.0, 0.0, 100.0),
            ValueRange::new(0.0, 4.0),
        );
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn points_projecting_off_scale_break_the_line() {
        let series = IndicatorSeries::new("SMA", vec![1.0, 2.0, 3.0], vec![]);
        let segments = polyline_segments(
            &series,
            TimeSlots::new(0.0, 300.0, 3),
            PaneRect::new(0.0, 300.0, 0.0, 100.0),
            ValueRange::new(f64::NEG_INFINITY, 4.0),
        );
        assert!(segments.is_empty());
    }

    #[test]
    fn values_beyond_candle_count_are_ignored() {
        let series = IndicatorSeries::new("SMA", vec![1.0; 10], vec![]);
        let segments = polyline_segments(
            &series,
            TimeSlots::new(0.0, 300.0, 3),
            PaneRect::new(0.0, 300.0, 0.0, 100.0),
            ValueRange::new(0.0, 2.0),
        );
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|segment| segment.2 < 300.0));
    }
}
