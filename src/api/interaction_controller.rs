use tracing::{debug, trace};

use crate::core::TimeSlots;
use crate::interaction::{CursorShape, InteractionMode, InteractionState, PointerContext};
use crate::render::Renderer;

use super::ChartEngine;
use super::invalidation::InvalidationTopic;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn hover_index(&self) -> Option<usize> {
        self.interaction.hover_index()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorShape {
        self.interaction.cursor()
    }

    /// Pointer geometry for the current surface and data.
    #[must_use]
    pub fn pointer_context(&self) -> PointerContext {
        let layout = self.pane_layout();
        let count = self.store.candles().len();
        PointerContext {
            slots: (count > 0).then(|| TimeSlots::new(layout.plot_left, layout.plot_width(), count)),
            separator_y: layout.separator_y,
            separator_thickness: self.config.separator_thickness,
        }
    }

    /// Updates hover index and cursor shape for a pointer at `(x, y)`.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let ctx = self.pointer_context();
        if self.interaction.on_pointer_move(x, y, &ctx) {
            trace!(x, y, hover = ?self.interaction.hover_index(), "hover changed");
            self.request_render(InvalidationTopic::Cursor);
        }
    }

    /// Starts a divider drag when pressed on the separator.
    pub fn pointer_press(&mut self, _x: f64, y: f64) {
        let ctx = self.pointer_context();
        if self.interaction.on_pointer_press(y, &ctx) {
            debug!(y, "divider drag started");
            self.request_render(InvalidationTopic::Divider);
        }
    }

    /// Moves the divider while dragging; ignored otherwise.
    ///
    /// The new height is clamped against the surface height at the time of
    /// this event, so a resize during the drag is honored immediately.
    pub fn pointer_drag(&mut self, _x: f64, y: f64) {
        if !self.interaction.is_dragging_separator() {
            return;
        }
        let surface_height = self.viewport.height_px();
        let requested = surface_height - self.config.insets.bottom - y;
        self.subchart_height = self
            .config
            .subchart_limits
            .clamp(requested, surface_height);
        trace!(y, subchart_height = self.subchart_height, "divider dragged");
        self.request_render(InvalidationTopic::Divider);
    }

    /// Ends any divider drag, wherever the pointer is released.
    pub fn pointer_release(&mut self, _x: f64, _y: f64) {
        if self.interaction.on_pointer_release() {
            debug!(
                subchart_height = self.subchart_height,
                "divider drag finished"
            );
            self.request_render(InvalidationTopic::Divider);
        }
    }

    /// Clears hover state when the pointer leaves the surface.
    pub fn pointer_exit(&mut self) {
        self.interaction.on_pointer_exit();
        self.request_render(InvalidationTopic::Cursor);
    }
}
