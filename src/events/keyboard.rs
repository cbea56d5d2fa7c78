use crate::camera_stream::{self, CameraStream};
use crate::keymap::{action_for_key, KeyAction};
use crate::overlay;
use crate::viewer::{self, ViewerHandle};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    viewer_handle: &ViewerHandle,
    camera: &Rc<RefCell<CameraStream>>,
) {
    let modified = ev.ctrl_key() || ev.meta_key() || ev.alt_key();
    let Some(action) = action_for_key(&ev.key(), modified) else {
        return;
    };
    match action {
        KeyAction::ToggleHelp => {
            let document = viewer_handle.borrow().document.clone();
            overlay::toggle_help(&document);
        }
        KeyAction::ToggleInteraction => viewer::toggle_interaction(viewer_handle),
        KeyAction::FlipCamera => camera_stream::flip(camera),
        KeyAction::ResetView => viewer::reset_view(viewer_handle),
        KeyAction::SelectModel(index) => {
            if index >= viewer_handle.borrow().session.catalog().len() {
                return;
            }
            viewer::select_model(viewer_handle, index);
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(viewer_handle: ViewerHandle, camera: Rc<RefCell<CameraStream>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &viewer_handle, &camera);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
