use crate::constants::{ACTIVE_CLASS, PICKER_ID};
use crate::dom;
use ar_core::ModelDescriptor;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

#[inline]
fn button_id(index: usize) -> String {
    format!("model-button-{}", index)
}

/// Fill the picker with one button per catalog entry.
pub fn build(
    document: &web::Document,
    catalog: &[ModelDescriptor],
    on_select: Rc<dyn Fn(usize)>,
) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id(PICKER_ID) else {
        log::warn!("[picker] missing #{}", PICKER_ID);
        return Ok(());
    };
    container.set_text_content(None);
    for (index, model) in catalog.iter().enumerate() {
        let button = document.create_element("button")?;
        button.set_id(&button_id(index));
        button.set_class_name("model-button");
        button.set_attribute("type", "button")?;
        button.set_attribute("title", &format!("{} ({})", model.name, index + 1))?;
        button.set_text_content(Some(model.name));
        container.append_child(&button)?;

        let on_select = on_select.clone();
        dom::add_click_listener(document, &button_id(index), move || on_select(index));
    }
    Ok(())
}

pub fn mark_active(document: &web::Document, count: usize, active: Option<usize>) {
    for index in 0..count {
        if let Some(el) = document.get_element_by_id(&button_id(index)) {
            dom::set_class(&el, ACTIVE_CLASS, Some(index) == active);
        }
    }
}
