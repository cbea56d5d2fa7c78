use crate::constants::HIDDEN_CLASS;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Look up an element by id and cast it to the expected interface.
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has unexpected type: {:?}", id, e))
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move || handler()) as Box<dyn FnMut()>
        );
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
}

pub fn set_hidden(document: &web::Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        set_class(&el, HIDDEN_CLASS, hidden);
    }
}

pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    document
        .get_element_by_id(id)
        .map(|el| el.class_list().contains(HIDDEN_CLASS))
        .unwrap_or(true)
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Keep the canvas backing store at CSS size × devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// CSS-pixel viewport width and whether the primary pointer is coarse.
pub fn viewport_traits(window: &web::Window) -> (f64, bool) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let coarse = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false);
    (width, coarse)
}
