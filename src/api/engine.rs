use tracing::{debug, warn};

use crate::core::{IndicatorClassifier, PaneLayout, SeriesStore, Viewport};
use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::render::{RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::invalidation::{InvalidationTopic, RenderRequests};
use super::render_frame_builder::{FrameInputs, build_render_frame};
use super::validation::validate_render_style;
use super::{ChartEngineConfig, RenderStyle};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the series store, the interaction state and the
/// divider position, and hands a freshly built `RenderFrame` to its renderer
/// on every render. All calls are expected on one UI thread.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) classifier: IndicatorClassifier,
    pub(super) style: RenderStyle,
    pub(super) store: SeriesStore,
    pub(super) interaction: InteractionState,
    pub(super) viewport: Viewport,
    /// Requested oscillator pane height; clamped against the live surface
    /// height whenever a layout is computed.
    pub(super) subchart_height: f64,
    pub(super) requests: RenderRequests,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let classifier = config.classifier();
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            markers = ?classifier.markers(),
            "chart engine created"
        );

        let mut engine = Self {
            renderer,
            viewport: config.viewport,
            subchart_height: config.default_subchart_height,
            classifier,
            config,
            style: RenderStyle::default(),
            store: SeriesStore::default(),
            interaction: InteractionState::default(),
            requests: RenderRequests::default(),
        };
        engine.request_render(InvalidationTopic::Layout);
        Ok(engine)
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Applies a new surface size. Pane geometry is derived from it on the
    /// next render.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            "chart surface resized"
        );
        self.viewport = viewport;
        self.request_render(InvalidationTopic::Layout);
    }

    #[must_use]
    pub fn render_style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        validate_render_style(&style)?;
        self.style = style;
        self.request_render(InvalidationTopic::Style);
        Ok(())
    }

    /// Effective oscillator pane height for the current surface.
    #[must_use]
    pub fn subchart_height(&self) -> f64 {
        self.pane_layout().subchart_height
    }

    /// Restores a divider position, e.g. one persisted by the host.
    ///
    /// Non-finite heights are ignored. The value is clamped per layout, so a
    /// height restored before the first resize survives it.
    pub fn set_subchart_height(&mut self, height: f64) {
        if !height.is_finite() {
            return;
        }
        self.subchart_height = height;
        self.request_render(InvalidationTopic::Divider);
    }

    #[must_use]
    pub fn pane_layout(&self) -> PaneLayout {
        PaneLayout::compute(
            self.viewport,
            self.config.insets,
            self.config.pane_gap,
            self.subchart_height,
            self.config.subchart_limits,
        )
    }

    #[must_use]
    pub fn frame_inputs(&self) -> FrameInputs<'_> {
        FrameInputs {
            viewport: self.viewport,
            store: &self.store,
            interaction: self.interaction,
            layout: self.pane_layout(),
            classifier: &self.classifier,
            style: &self.style,
            oscillator_default_range: self.config.oscillator_default_range,
            value_tick_count: self.config.value_tick_count,
            time_tick_count: self.config.time_tick_count,
            time_zone: self.config.time_zone,
            separator_thickness: self.config.separator_thickness,
        }
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        build_render_frame(&self.frame_inputs())
    }

    /// Builds a frame and hands it to the renderer, clearing pending requests.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.requests.clear();
        if let Err(err) = self.renderer.render(&frame) {
            warn!(error = %err, "renderer rejected frame");
            return Err(err);
        }
        Ok(())
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame();
        self.requests.clear();
        if let Err(err) = self.renderer.render_on_cairo_context(context, &frame) {
            warn!(error = %err, "cairo renderer rejected frame");
            return Err(err);
        }
        Ok(())
    }

    /// Resizes to `viewport` and renders.
    pub fn render_with_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.resize(viewport);
        self.render()
    }

    /// Renders only when a request is pending. Returns whether it rendered.
    pub fn render_if_pending(&mut self) -> ChartResult<bool> {
        if !self.requests.is_pending() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    #[must_use]
    pub fn has_pending_render(&self) -> bool {
        self.requests.is_pending()
    }

    /// Number of redraw requests recorded since creation.
    #[must_use]
    pub fn render_request_count(&self) -> u64 {
        self.requests.total_requests()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn request_render(&mut self, topic: InvalidationTopic) {
        self.requests.request(topic);
    }
}
