use tracing::debug;

use crate::core::{Candle, IndicatorMap, IndicatorSeries, SeriesStore};
use crate::render::Renderer;

use super::ChartEngine;
use super::invalidation::InvalidationTopic;

impl<R: Renderer> ChartEngine<R> {
    /// Replaces candles and indicators in one step, as delivered by a data load.
    pub fn load_data(&mut self, candles: Vec<Candle>, indicators: IndicatorMap) {
        self.set_candles(candles);
        self.set_indicators(indicators);
    }

    /// Replaces the candle series. Candles are expected in non-decreasing
    /// timestamp order and are not sorted here.
    pub fn set_candles(&mut self, candles: Vec<Candle>) {
        debug!(count = candles.len(), "set candles");
        let count = candles.len();
        self.store.set_candles(candles);
        if self.interaction.on_candles_replaced(count) {
            debug!(count, "hover cleared after candle reload");
        }
        self.request_render(InvalidationTopic::Candles);
    }

    /// Replaces every indicator series. Enabled flags are kept by name.
    pub fn set_indicators(&mut self, indicators: IndicatorMap) {
        debug!(count = indicators.len(), "set indicators");
        self.store.set_indicators(indicators);
        self.request_render(InvalidationTopic::Indicators);
    }

    /// Adds a series or replaces the one with the same name.
    pub fn upsert_indicator(&mut self, series: IndicatorSeries) {
        debug!(name = %series.name, len = series.len(), "upsert indicator");
        self.store.upsert_indicator(series);
        self.request_render(InvalidationTopic::Indicators);
    }

    pub fn remove_indicator(&mut self, name: &str) -> Option<IndicatorSeries> {
        let removed = self.store.remove_indicator(name);
        debug!(name, removed = removed.is_some(), "remove indicator");
        self.request_render(InvalidationTopic::Indicators);
        removed
    }

    /// Shows or hides a series by name. The choice outlives data reloads and
    /// may be made before a series with that name exists.
    pub fn set_indicator_enabled(&mut self, name: &str, enabled: bool) {
        let changed = self.store.set_enabled(name, enabled);
        debug!(name, enabled, changed, "toggle indicator");
        self.request_render(InvalidationTopic::Visibility);
    }

    #[must_use]
    pub fn is_indicator_enabled(&self, name: &str) -> bool {
        self.store.is_enabled(name)
    }

    /// Names of all loaded indicators, enabled or not, in insertion order.
    #[must_use]
    pub fn indicator_names(&self) -> Vec<String> {
        self.store.indicator_names()
    }

    #[must_use]
    pub fn indicators(&self) -> &IndicatorMap {
        self.store.indicators()
    }

    #[must_use]
    pub fn indicator(&self, name: &str) -> Option<&IndicatorSeries> {
        self.store.indicator(name)
    }

    #[must_use]
    pub fn candles(&self) -> &[Candle] {
        self.store.candles()
    }

    #[must_use]
    pub fn series_store(&self) -> &SeriesStore {
        &self.store
    }
}
