use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::core::{PaneRect, TimeSlots, ValueRange};
use crate::error::{ChartError, ChartResult};

/// One OHLCV bar. Timestamps are unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Builds a candle without validation; the engine renders whatever it is given.
    #[must_use]
    pub const fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Builds a candle and checks the OHLC invariants.
    ///
    /// Invariants:
    /// - all prices and the volume are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn try_new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> ChartResult<Self> {
        if !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
            || !volume.is_finite()
        {
            return Err(ChartError::InvalidData(
                "candle values must be finite".to_owned(),
            ));
        }
        if low > high {
            return Err(ChartError::InvalidData(
                "candle low must be <= high".to_owned(),
            ));
        }
        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "candle open/close must be within low/high range".to_owned(),
            ));
        }

        Ok(Self::new(timestamp, open, high, low, close, volume))
    }

    /// Converts database-style decimal rows into a validated candle.
    pub fn from_decimal(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> ChartResult<Self> {
        Self::try_new(
            datetime_to_unix_millis(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            decimal_to_f64(volume, "volume")?,
        )
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    pub body_left: f64,
    pub body_width: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// Projects candles into the price pane.
///
/// Bodies start at their slot's leading edge and are at least 2px wide; the
/// wick runs through the body's horizontal center.
#[must_use]
pub fn project_candles(
    candles: &[Candle],
    slots: TimeSlots,
    pane: PaneRect,
    range: ValueRange,
) -> Vec<CandleGeometry> {
    let body_width = slots.slot_width().max(2.0);

    #[cfg(feature = "parallel-projection")]
    {
        candles
            .par_iter()
            .enumerate()
            .map(|(index, candle)| project_single_candle(index, *candle, slots, pane, range, body_width))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        candles
            .iter()
            .enumerate()
            .map(|(index, candle)| project_single_candle(index, *candle, slots, pane, range, body_width))
            .collect()
    }
}

fn project_single_candle(
    index: usize,
    candle: Candle,
    slots: TimeSlots,
    pane: PaneRect,
    range: ValueRange,
    body_width: f64,
) -> CandleGeometry {
    let body_left = slots.slot_left(index);
    let open_y = range.value_to_y(candle.open, pane.top, pane.bottom);
    let close_y = range.value_to_y(candle.close, pane.top, pane.bottom);

    CandleGeometry {
        index,
        body_left,
        body_width,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_x: body_left + body_width / 2.0,
        wick_top: range.value_to_y(candle.high, pane.top, pane.bottom),
        wick_bottom: range.value_to_y(candle.low, pane.top, pane.bottom),
        is_bullish: candle.is_bullish(),
    }
}
