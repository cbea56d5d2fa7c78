use crate::constants::{
    ACTIVE_CLASS, HELP_OVERLAY_ID, INTERACT_BUTTON_ID, INTERACT_LABEL_ACTIVE,
    INTERACT_LABEL_IDLE, LOADING_ID,
};
use crate::dom;
use web_sys as web;

#[inline]
pub fn show_help(document: &web::Document) {
    dom::set_hidden(document, HELP_OVERLAY_ID, false);
}

#[inline]
pub fn hide_help(document: &web::Document) {
    dom::set_hidden(document, HELP_OVERLAY_ID, true);
}

#[inline]
pub fn toggle_help(document: &web::Document) {
    if dom::is_hidden(document, HELP_OVERLAY_ID) {
        show_help(document);
    } else {
        hide_help(document);
    }
}

pub fn set_loading(document: &web::Document, loading: bool) {
    dom::set_hidden(document, LOADING_ID, !loading);
}

/// Reflect the interaction mode on the toggle button.
pub fn set_interacting(document: &web::Document, interacting: bool) {
    if let Some(el) = document.get_element_by_id(INTERACT_BUTTON_ID) {
        dom::set_class(&el, ACTIVE_CLASS, interacting);
        el.set_text_content(Some(if interacting {
            INTERACT_LABEL_ACTIVE
        } else {
            INTERACT_LABEL_IDLE
        }));
        _ = el.set_attribute("aria-pressed", if interacting { "true" } else { "false" });
    }
}
