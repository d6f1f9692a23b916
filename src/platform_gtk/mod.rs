use std::cell::RefCell;
use std::rc::Rc;

use gtk::prelude::*;
use gtk4 as gtk;
use tracing::warn;

use crate::api::{ChartEngine, CursorShape};
use crate::core::Viewport;
use crate::render::{CairoContextRenderer, Renderer};

type SharedEngine<R> = Rc<RefCell<ChartEngine<R>>>;

/// Hosts a `ChartEngine` inside a GTK4 `DrawingArea`.
///
/// Pointer motion, leave and primary-button drags are forwarded to the
/// engine; the widget redraws whenever the engine has a pending request and
/// on every allocation change.
pub struct GtkChartAdapter<R: Renderer + CairoContextRenderer + 'static> {
    area: gtk::DrawingArea,
    engine: SharedEngine<R>,
}

impl<R: Renderer + CairoContextRenderer + 'static> GtkChartAdapter<R> {
    #[must_use]
    pub fn new(engine: ChartEngine<R>) -> Self {
        let area = gtk::DrawingArea::new();
        area.set_hexpand(true);
        area.set_vexpand(true);
        let engine = Rc::new(RefCell::new(engine));

        let draw_engine = Rc::clone(&engine);
        area.set_draw_func(move |_, context, width, height| {
            let mut engine = draw_engine.borrow_mut();
            engine.resize(Viewport::new(
                width.max(0).unsigned_abs(),
                height.max(0).unsigned_abs(),
            ));
            if let Err(err) = engine.render_on_cairo_context(context) {
                warn!(error = %err, "gtk chart draw failed");
            }
        });

        let motion = gtk::EventControllerMotion::new();
        {
            let engine = Rc::clone(&engine);
            let area = area.clone();
            motion.connect_motion(move |_, x, y| {
                engine.borrow_mut().pointer_move(x, y);
                sync_widget(&area, &engine);
            });
        }
        {
            let engine = Rc::clone(&engine);
            let area = area.clone();
            motion.connect_leave(move |_| {
                engine.borrow_mut().pointer_exit();
                sync_widget(&area, &engine);
            });
        }
        area.add_controller(motion);

        let drag = gtk::GestureDrag::new();
        {
            let engine = Rc::clone(&engine);
            let area = area.clone();
            drag.connect_drag_begin(move |_, x, y| {
                engine.borrow_mut().pointer_press(x, y);
                sync_widget(&area, &engine);
            });
        }
        {
            let engine = Rc::clone(&engine);
            let area = area.clone();
            drag.connect_drag_update(move |gesture, dx, dy| {
                if let Some((start_x, start_y)) = gesture.start_point() {
                    engine
                        .borrow_mut()
                        .pointer_drag(start_x + dx, start_y + dy);
                }
                sync_widget(&area, &engine);
            });
        }
        {
            let engine = Rc::clone(&engine);
            let area = area.clone();
            drag.connect_drag_end(move |gesture, dx, dy| {
                let (start_x, start_y) = gesture.start_point().unwrap_or_default();
                engine
                    .borrow_mut()
                    .pointer_release(start_x + dx, start_y + dy);
                sync_widget(&area, &engine);
            });
        }
        area.add_controller(drag);

        Self { area, engine }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    /// Shared handle for feeding data and toggles from other widgets.
    #[must_use]
    pub fn engine(&self) -> SharedEngine<R> {
        Rc::clone(&self.engine)
    }

    /// Queues a redraw if the engine recorded any request since the last draw.
    pub fn sync(&self) {
        sync_widget(&self.area, &self.engine);
    }
}

fn sync_widget<R: Renderer>(area: &gtk::DrawingArea, engine: &SharedEngine<R>) {
    let engine = engine.borrow();
    let cursor = match engine.cursor() {
        CursorShape::Default => None,
        CursorShape::VerticalResize => Some("ns-resize"),
    };
    area.set_cursor_from_name(cursor);
    if engine.has_pending_render() {
        area.queue_draw();
    }
}
