use ar_core::{GestureSurface, PointerTracker};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// The render canvas as a gesture surface. While capturing it takes pointer
/// and touch input for itself; otherwise input passes through to the page
/// underneath and any half-finished gesture is dropped.
#[derive(Clone)]
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    tracker: Rc<RefCell<PointerTracker>>,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement, tracker: Rc<RefCell<PointerTracker>>) -> Self {
        Self { canvas, tracker }
    }
}

impl GestureSurface for CanvasSurface {
    fn set_gesture_capture(&mut self, capture: bool) {
        let style = self.canvas.style();
        let (pointer_events, touch_action) = if capture {
            ("auto", "none")
        } else {
            ("none", "auto")
        };
        _ = style.set_property("pointer-events", pointer_events);
        _ = style.set_property("touch-action", touch_action);
        if !capture {
            self.tracker.borrow_mut().clear();
        }
    }
}
