use serde::{Deserialize, Serialize};

use crate::core::ValueRange;

/// Pane an indicator series is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorPane {
    /// Shares the price pane and price scale with the candles (moving averages, bands).
    Overlay,
    /// Drawn in the subordinate pane on a bounded value scale (RSI, MACD).
    Oscillator,
}

/// Precomputed indicator values aligned by position with the candle series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub timestamps: Vec<i64>,
    /// Explicit pane tag supplied by the producer. When absent the name-based
    /// classifier decides.
    #[serde(default)]
    pub pane: Option<IndicatorPane>,
    /// Visibility used until the series is toggled explicitly.
    #[serde(default = "default_visible")]
    pub default_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl IndicatorSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>, timestamps: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            values,
            timestamps,
            pane: None,
            default_visible: true,
        }
    }

    #[must_use]
    pub fn with_pane(mut self, pane: IndicatorPane) -> Self {
        self.pane = Some(pane);
        self
    }

    #[must_use]
    pub fn with_default_visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Extrema over the finite values of the series.
    #[must_use]
    pub fn value_range(&self) -> Option<ValueRange> {
        ValueRange::from_values(self.values.iter().copied())
    }
}

/// Name-based fallback for series that arrive without a pane tag.
///
/// A name is an oscillator when it contains any marker, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorClassifier {
    markers: Vec<String>,
}

impl IndicatorClassifier {
    #[must_use]
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|marker| marker.as_ref().to_uppercase())
                .filter(|marker| !marker.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    #[must_use]
    pub fn is_oscillator(&self, name: &str) -> bool {
        let name = name.to_uppercase();
        self.markers.iter().any(|marker| name.contains(marker.as_str()))
    }

    /// Resolves the pane of `series`: its explicit tag, else the name heuristic.
    #[must_use]
    pub fn classify(&self, series: &IndicatorSeries) -> IndicatorPane {
        series.pane.unwrap_or_else(|| {
            if self.is_oscillator(&series.name) {
                IndicatorPane::Oscillator
            } else {
                IndicatorPane::Overlay
            }
        })
    }
}

impl Default for IndicatorClassifier {
    fn default() -> Self {
        Self::new(["RSI", "MACD"])
    }
}
