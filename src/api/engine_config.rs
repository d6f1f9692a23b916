use serde::{Deserialize, Serialize};

use crate::core::{ChartInsets, IndicatorClassifier, SubchartLimits, TimeLabelZone, ValueRange, Viewport};
use crate::error::{ChartError, ChartResult};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Missing JSON fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub insets: ChartInsets,
    /// Vertical gap between the price pane and the oscillator pane.
    #[serde(default = "default_pane_gap")]
    pub pane_gap: f64,
    /// Oscillator pane height a fresh engine starts with.
    #[serde(default = "default_subchart_height")]
    pub default_subchart_height: f64,
    #[serde(default)]
    pub subchart_limits: SubchartLimits,
    /// Drawn divider width, also the pointer hit tolerance around it.
    #[serde(default = "default_separator_thickness")]
    pub separator_thickness: f64,
    #[serde(default = "default_tick_count")]
    pub value_tick_count: usize,
    #[serde(default = "default_tick_count")]
    pub time_tick_count: usize,
    /// Band the oscillator pane always shows; widened by data outside it.
    #[serde(default = "default_oscillator_range")]
    pub oscillator_default_range: ValueRange,
    /// Name fragments that classify untagged indicators as oscillators.
    #[serde(default = "default_oscillator_markers")]
    pub oscillator_markers: Vec<String>,
    #[serde(default)]
    pub time_zone: TimeLabelZone,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            insets: ChartInsets::default(),
            pane_gap: default_pane_gap(),
            default_subchart_height: default_subchart_height(),
            subchart_limits: SubchartLimits::default(),
            separator_thickness: default_separator_thickness(),
            value_tick_count: default_tick_count(),
            time_tick_count: default_tick_count(),
            oscillator_default_range: default_oscillator_range(),
            oscillator_markers: default_oscillator_markers(),
            time_zone: TimeLabelZone::default(),
        }
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeLabelZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    #[must_use]
    pub fn with_subchart_height(mut self, height: f64) -> Self {
        self.default_subchart_height = height;
        self
    }

    #[must_use]
    pub fn with_oscillator_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.oscillator_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn classifier(&self) -> IndicatorClassifier {
        IndicatorClassifier::new(&self.oscillator_markers)
    }

    pub fn validate(&self) -> ChartResult<()> {
        let insets = self.insets;
        for (field, value) in [
            ("insets.left", insets.left),
            ("insets.right", insets.right),
            ("insets.top", insets.top),
            ("insets.bottom", insets.bottom),
            ("pane_gap", self.pane_gap),
            ("subchart_limits.price_reserve", self.subchart_limits.price_reserve),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{field}` must be finite and >= 0"
                )));
            }
        }
        if !self.subchart_limits.min_height.is_finite() || self.subchart_limits.min_height <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "`subchart_limits.min_height` must be finite and > 0".to_owned(),
            ));
        }
        if !self.default_subchart_height.is_finite() {
            return Err(ChartError::InvalidConfig(
                "`default_subchart_height` must be finite".to_owned(),
            ));
        }
        if !self.separator_thickness.is_finite() || self.separator_thickness <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "`separator_thickness` must be finite and > 0".to_owned(),
            ));
        }
        if self.value_tick_count < 2 || self.time_tick_count < 2 {
            return Err(ChartError::InvalidConfig(
                "tick counts must be >= 2".to_owned(),
            ));
        }
        let range = self.oscillator_default_range;
        if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
            return Err(ChartError::InvalidConfig(
                "`oscillator_default_range` must be finite with min <= max".to_owned(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| ChartError::InvalidConfig(format!("failed to parse config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidConfig(format!("failed to serialize config: {err}")))
    }
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

fn default_pane_gap() -> f64 {
    40.0
}

fn default_subchart_height() -> f64 {
    120.0
}

fn default_separator_thickness() -> f64 {
    6.0
}

fn default_tick_count() -> usize {
    5
}

fn default_oscillator_range() -> ValueRange {
    ValueRange::new(0.0, 100.0)
}

fn default_oscillator_markers() -> Vec<String> {
    vec!["RSI".to_owned(), "MACD".to_owned()]
}
