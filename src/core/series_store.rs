use std::collections::HashMap;

use indexmap::IndexMap;

use crate::core::{Candle, IndicatorSeries};

/// Indicators keyed by name, kept in insertion order.
pub type IndicatorMap = IndexMap<String, IndicatorSeries>;

/// Data currently shown by the chart.
///
/// Candles and indicators are replaced wholesale on each load. Enabled flags
/// are keyed by name and outlive indicator replacement, so a series toggled
/// off stays off when the next load brings a series with the same name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStore {
    candles: Vec<Candle>,
    indicators: IndicatorMap,
    enabled: HashMap<String, bool>,
}

impl SeriesStore {
    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    #[must_use]
    pub fn has_candles(&self) -> bool {
        !self.candles.is_empty()
    }

    pub fn set_candles(&mut self, candles: Vec<Candle>) {
        self.candles = candles;
    }

    #[must_use]
    pub fn indicators(&self) -> &IndicatorMap {
        &self.indicators
    }

    #[must_use]
    pub fn indicator(&self, name: &str) -> Option<&IndicatorSeries> {
        self.indicators.get(name)
    }

    #[must_use]
    pub fn indicator_names(&self) -> Vec<String> {
        self.indicators.keys().cloned().collect()
    }

    pub fn set_indicators(&mut self, indicators: IndicatorMap) {
        self.indicators = indicators;
    }

    /// Inserts or replaces the series stored under `series.name`.
    ///
    /// A replaced series keeps its position in the map.
    pub fn upsert_indicator(&mut self, series: IndicatorSeries) -> Option<IndicatorSeries> {
        self.indicators.insert(series.name.clone(), series)
    }

    pub fn remove_indicator(&mut self, name: &str) -> Option<IndicatorSeries> {
        self.indicators.shift_remove(name)
    }

    /// Records an explicit visibility choice. Returns `true` when the effective
    /// visibility of `name` changed.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let before = self.is_enabled(name);
        self.enabled.insert(name.to_owned(), enabled);
        before != enabled
    }

    /// The explicit toggle for `name`, `None` if it was never toggled.
    #[must_use]
    pub fn enabled_override(&self, name: &str) -> Option<bool> {
        self.enabled.get(name).copied()
    }

    /// Effective visibility: the explicit toggle, else the series' registration
    /// default, else visible.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled_override(name).unwrap_or_else(|| {
            self.indicators
                .get(name)
                .is_none_or(|series| series.default_visible)
        })
    }
}
