use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Candle;

/// Vertical value domain of one pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range whose ends coincide. Such ranges map every value to the pane center.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.max == self.min
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Extrema over the finite values of `values`, `None` if there are none.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min: Option<OrderedFloat<f64>> = None;
        let mut max: Option<OrderedFloat<f64>> = None;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            let value = OrderedFloat(value);
            min = Some(min.map_or(value, |current| current.min(value)));
            max = Some(max.map_or(value, |current| current.max(value)));
        }
        Some(Self::new(min?.into_inner(), max?.into_inner()))
    }

    /// Maps `value` into `[top, bottom]`, higher values closer to `top`.
    #[must_use]
    pub fn value_to_y(self, value: f64, top: f64, bottom: f64) -> f64 {
        let height = bottom - top;
        if self.is_degenerate() {
            return top + height / 2.0;
        }
        // Halved operands keep `max - min` finite for any finite range.
        let fraction = (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0);
        top + height - fraction * height
    }
}

/// Global price extrema: lowest low to highest high over every loaded candle.
#[must_use]
pub fn price_range(candles: &[Candle]) -> Option<ValueRange> {
    let low = ValueRange::from_values(candles.iter().map(|candle| candle.low))?;
    let high = ValueRange::from_values(candles.iter().map(|candle| candle.high))?;
    Some(ValueRange::new(low.min, high.max))
}

/// Where inside its slot a series point is anchored horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotAnchor {
    /// Leading edge, used for candle bodies.
    Leading,
    /// Slot center, used for indicator points and the crosshair.
    Center,
}

/// Horizontal index mapping shared by both panes.
///
/// The plot width is split into `count` equal slots starting at `left`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlots {
    left: f64,
    width: f64,
    count: usize,
}

impl TimeSlots {
    #[must_use]
    pub fn new(left: f64, width: f64, count: usize) -> Self {
        Self {
            left,
            width: width.max(0.0),
            count,
        }
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn slot_width(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.width / self.count as f64
    }

    #[must_use]
    pub fn slot_left(self, index: usize) -> f64 {
        self.left + index as f64 * self.slot_width()
    }

    #[must_use]
    pub fn index_to_x(self, index: usize, anchor: SlotAnchor) -> f64 {
        match anchor {
            SlotAnchor::Leading => self.slot_left(index),
            SlotAnchor::Center => self.slot_left(index) + self.slot_width() / 2.0,
        }
    }

    /// Index of the slot under `x`, or `None` outside `[left, left + width]`.
    #[must_use]
    pub fn index_at(self, x: f64) -> Option<usize> {
        if self.count == 0 || !x.is_finite() {
            return None;
        }
        if x < self.left || x > self.left + self.width {
            return None;
        }
        let slot = self.slot_width();
        if slot <= 0.0 {
            return Some(0);
        }
        let raw = ((x - self.left) / slot).floor();
        Some((raw.max(0.0) as usize).min(self.count - 1))
    }
}
