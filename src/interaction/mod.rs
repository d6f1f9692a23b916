use serde::{Deserialize, Serialize};

use crate::core::TimeSlots;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Hovering,
    DraggingSeparator,
}

/// Pointer cursor the host should show over the chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorShape {
    #[default]
    Default,
    /// Shown while the pointer is over the pane divider.
    VerticalResize,
}

/// Geometry the state machine needs to interpret one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerContext {
    /// Candle slots of the current frame, `None` when no candles are loaded.
    pub slots: Option<TimeSlots>,
    pub separator_y: f64,
    pub separator_thickness: f64,
}

impl PointerContext {
    #[must_use]
    pub fn is_over_separator(&self, y: f64) -> bool {
        (y - self.separator_y).abs() < self.separator_thickness
    }
}

/// Hover and divider-drag state driven by pointer events.
///
/// Every transition returns `true` when observable state changed, which is
/// the caller's cue to request a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    hover_index: Option<usize>,
    hover_x: f64,
    hover_y: f64,
    dragging_separator: bool,
    cursor: CursorShape,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        if self.dragging_separator {
            InteractionMode::DraggingSeparator
        } else if self.hover_index.is_some() {
            InteractionMode::Hovering
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn hover_index(self) -> Option<usize> {
        self.hover_index
    }

    /// Last pointer position recorded while hovering a candle.
    #[must_use]
    pub fn hover_position(self) -> (f64, f64) {
        (self.hover_x, self.hover_y)
    }

    #[must_use]
    pub fn is_dragging_separator(self) -> bool {
        self.dragging_separator
    }

    #[must_use]
    pub fn cursor(self) -> CursorShape {
        self.cursor
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, ctx: &PointerContext) -> bool {
        let cursor = if ctx.is_over_separator(y) {
            CursorShape::VerticalResize
        } else {
            CursorShape::Default
        };
        let cursor_changed = self.cursor != cursor;
        self.cursor = cursor;

        let hover = ctx.slots.and_then(|slots| slots.index_at(x));
        let hover_changed = match hover {
            Some(index) => self.set_hover(index, x, y),
            None => self.clear_hover(),
        };

        cursor_changed || hover_changed
    }

    /// Starts a divider drag when the press lands on the separator.
    pub fn on_pointer_press(&mut self, y: f64, ctx: &PointerContext) -> bool {
        if self.dragging_separator || !ctx.is_over_separator(y) {
            return false;
        }
        self.dragging_separator = true;
        true
    }

    /// Ends any divider drag. A release without a drag is a no-op.
    pub fn on_pointer_release(&mut self) -> bool {
        std::mem::replace(&mut self.dragging_separator, false)
    }

    pub fn on_pointer_exit(&mut self) -> bool {
        let cursor_changed = self.cursor != CursorShape::Default;
        self.cursor = CursorShape::Default;
        self.clear_hover() || cursor_changed
    }

    /// Drops a hover index that no longer points at a loaded candle.
    pub fn on_candles_replaced(&mut self, count: usize) -> bool {
        if self.hover_index.is_some_and(|index| index >= count) {
            return self.clear_hover();
        }
        false
    }

    fn set_hover(&mut self, index: usize, x: f64, y: f64) -> bool {
        let changed = self.hover_index != Some(index) || self.hover_x != x || self.hover_y != y;
        self.hover_index = Some(index);
        self.hover_x = x;
        self.hover_y = y;
        changed
    }

    fn clear_hover(&mut self) -> bool {
        self.hover_index.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{CursorShape, InteractionMode, InteractionState, PointerContext};
    use crate::core::TimeSlots;

    fn ctx(count: usize) -> PointerContext {
        PointerContext {
            slots: (count > 0).then(|| TimeSlots::new(60.0, 800.0, count)),
            separator_y: 440.0,
            separator_thickness: 6.0,
        }
    }

    #[test]
    fn move_over_data_enters_hovering() {
        let mut state = InteractionState::default();
        assert!(state.on_pointer_move(100.0, 100.0, &ctx(4)));
        assert_eq!(state.mode(), InteractionMode::Hovering);
        assert_eq!(state.hover_index(), Some(0));
        assert!(!state.on_pointer_move(100.0, 100.0, &ctx(4)));
    }

    #[test]
    fn move_without_candles_stays_idle() {
        let mut state = InteractionState::default();
        assert!(!state.on_pointer_move(100.0, 100.0, &ctx(0)));
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn cursor_switches_near_separator() {
        let mut state = InteractionState::default();
        state.on_pointer_move(100.0, 444.0, &ctx(4));
        assert_eq!(state.cursor(), CursorShape::VerticalResize);
        state.on_pointer_move(100.0, 446.0, &ctx(4));
        assert_eq!(state.cursor(), CursorShape::Default);
    }

    #[test]
    fn press_release_cycle_toggles_drag() {
        let mut state = InteractionState::default();
        assert!(!state.on_pointer_press(300.0, &ctx(4)));
        assert!(state.on_pointer_press(441.0, &ctx(4)));
        assert_eq!(state.mode(), InteractionMode::DraggingSeparator);
        assert!(state.on_pointer_release());
        assert!(!state.on_pointer_release());
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn shrinking_candles_drops_stale_hover() {
        let mut state = InteractionState::default();
        state.on_pointer_move(850.0, 100.0, &ctx(4));
        assert_eq!(state.hover_index(), Some(3));

        assert!(!state.on_candles_replaced(4));
        assert_eq!(state.hover_index(), Some(3));
        assert!(state.on_candles_replaced(2));
        assert_eq!(state.hover_index(), None);
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn exit_clears_hover() {
        let mut state = InteractionState::default();
        state.on_pointer_move(100.0, 100.0, &ctx(4));
        assert!(state.on_pointer_exit());
        assert_eq!(state.hover_index(), None);
        assert!(!state.on_pointer_exit());
    }
}
