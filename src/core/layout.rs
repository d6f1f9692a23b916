use serde::{Deserialize, Serialize};

use crate::core::Viewport;

/// Fixed margins around the plot area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartInsets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for ChartInsets {
    fn default() -> Self {
        Self {
            left: 60.0,
            right: 20.0,
            top: 20.0,
            bottom: 40.0,
        }
    }
}

/// Bounds for the oscillator pane height (the divider position).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubchartLimits {
    /// Smallest allowed oscillator pane height.
    pub min_height: f64,
    /// Height kept free above the oscillator pane for the price pane.
    pub price_reserve: f64,
}

impl Default for SubchartLimits {
    fn default() -> Self {
        Self {
            min_height: 60.0,
            price_reserve: 120.0,
        }
    }
}

impl SubchartLimits {
    /// Clamps `height` to `[min_height, surface_height - price_reserve]`.
    ///
    /// On surfaces too short for that interval the lower bound wins.
    #[must_use]
    pub fn clamp(self, height: f64, surface_height: f64) -> f64 {
        let upper = (surface_height - self.price_reserve).max(self.min_height);
        if !height.is_finite() {
            return self.min_height;
        }
        height.clamp(self.min_height, upper)
    }
}

/// Axis-aligned pixel rectangle of one pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneRect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PaneRect {
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Per-frame pane geometry derived from the surface size and divider position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneLayout {
    pub plot_left: f64,
    pub plot_right: f64,
    pub price_top: f64,
    pub price_bottom: f64,
    pub osc_top: f64,
    pub osc_bottom: f64,
    /// Divider line between the panes, centered in the gap.
    pub separator_y: f64,
    /// Effective oscillator region height after clamping.
    pub subchart_height: f64,
}

impl PaneLayout {
    #[must_use]
    pub fn compute(
        viewport: Viewport,
        insets: ChartInsets,
        pane_gap: f64,
        subchart_height: f64,
        limits: SubchartLimits,
    ) -> Self {
        let width = viewport.width_px();
        let height = viewport.height_px();
        let subchart_height = limits.clamp(subchart_height, height);
        let separator_y = height - subchart_height - insets.bottom;
        let half_gap = pane_gap / 2.0;

        Self {
            plot_left: insets.left,
            plot_right: width - insets.right,
            price_top: insets.top,
            price_bottom: separator_y - half_gap,
            osc_top: separator_y + half_gap,
            osc_bottom: height - insets.bottom,
            separator_y,
            subchart_height,
        }
    }

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        (self.plot_right - self.plot_left).max(0.0)
    }

    #[must_use]
    pub fn price_pane(&self) -> PaneRect {
        PaneRect::new(self.plot_left, self.plot_right, self.price_top, self.price_bottom)
    }

    #[must_use]
    pub fn oscillator_pane(&self) -> PaneRect {
        PaneRect::new(self.plot_left, self.plot_right, self.osc_top, self.osc_bottom)
    }

    /// `true` when both panes have a positive area to draw into.
    #[must_use]
    pub fn has_plot_area(&self) -> bool {
        !self.price_pane().is_empty() && !self.oscillator_pane().is_empty()
    }
}
