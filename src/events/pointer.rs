use crate::viewer::ViewerHandle;
use ar_core::{GestureFrame, PointerTracker};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: ViewerHandle,
    pub tracker: Rc<RefCell<PointerTracker>>,
}

impl InputWiring {
    fn apply(&self, gesture: GestureFrame) {
        if gesture.is_empty() {
            return;
        }
        let viewport_h = self.canvas.client_height().max(1) as f32;
        self.viewer
            .borrow_mut()
            .session
            .apply_gesture(&gesture, viewport_h);
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

#[inline]
fn pointer_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.offset_x() as f32, ev.offset_y() as f32)
}

fn add_listener<E: FromWasmAbi + 'static>(
    target: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    add_listener(&canvas, "pointerdown", move |ev: web::PointerEvent| {
        // Right button, or a modified left drag, pans like a two-finger drag.
        let secondary = ev.button() == 2 || ev.shift_key() || ev.ctrl_key() || ev.meta_key();
        w.tracker
            .borrow_mut()
            .pointer_down(ev.pointer_id(), pointer_pos(&ev), secondary);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    add_listener(&canvas, "pointermove", move |ev: web::PointerEvent| {
        let gesture = w
            .tracker
            .borrow_mut()
            .pointer_move(ev.pointer_id(), pointer_pos(&ev));
        w.apply(gesture);
    });
}

fn wire_pointerup(w: &InputWiring) {
    for event in ["pointerup", "pointercancel", "lostpointercapture"] {
        let w = w.clone();
        let canvas = w.canvas.clone();
        add_listener(&canvas, event, move |ev: web::PointerEvent| {
            w.tracker.borrow_mut().pointer_up(ev.pointer_id());
        });
    }
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    add_listener(&canvas, "wheel", move |ev: web::WheelEvent| {
        let gesture = w.tracker.borrow().wheel(ev.delta_y());
        w.apply(gesture);
        ev.prevent_default();
    });
}

fn wire_contextmenu(w: &InputWiring) {
    add_listener(&w.canvas, "contextmenu", |ev: web::Event| {
        ev.prevent_default();
    });
}
