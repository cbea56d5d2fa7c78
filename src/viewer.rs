//! Shared viewer state and the actions the UI and keyboard trigger.

use crate::loader;
use crate::overlay;
use crate::picker;
use crate::surface::CanvasSurface;
use ar_core::{LoadOutcome, ModelData, ViewerSession};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct Viewer {
    pub session: ViewerSession<ModelData>,
    pub surface: CanvasSurface,
    pub document: web::Document,
}

pub type ViewerHandle = Rc<RefCell<Viewer>>;

impl Viewer {
    pub fn new(
        session: ViewerSession<ModelData>,
        surface: CanvasSurface,
        document: web::Document,
    ) -> ViewerHandle {
        Rc::new(RefCell::new(Self {
            session,
            surface,
            document,
        }))
    }

    fn sync_ui(&self) {
        overlay::set_interacting(&self.document, self.session.mode().is_interacting());
        picker::mark_active(
            &self.document,
            self.session.catalog().len(),
            self.session.selected_index(),
        );
    }
}

/// Select a catalog entry and load it in the background. Only the most
/// recent selection's load is applied.
pub fn select_model(handle: &ViewerHandle, index: usize) {
    let (ticket, descriptor) = {
        let mut guard = handle.borrow_mut();
        let viewer = &mut *guard;
        let ticket = match viewer.session.select_model(index, &mut viewer.surface) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("[viewer] {}", e);
                return;
            }
        };
        let Some(descriptor) = viewer.session.selected().copied() else {
            return;
        };
        viewer.sync_ui();
        overlay::set_loading(&viewer.document, true);
        (ticket, descriptor)
    };

    let handle = handle.clone();
    spawn_local(async move {
        let result = loader::load_model(&descriptor).await;
        let mut guard = handle.borrow_mut();
        let viewer = &mut *guard;
        let outcome = viewer
            .session
            .complete_load(ticket, result, &mut viewer.surface);
        // A stale result means a newer load is still in flight.
        if outcome != LoadOutcome::Stale {
            overlay::set_loading(&viewer.document, false);
            viewer.sync_ui();
        }
    });
}

pub fn select_by_name(handle: &ViewerHandle, name: &str) -> bool {
    let index = ar_core::find_model(handle.borrow().session.catalog(), name);
    match index {
        Some(i) => {
            select_model(handle, i);
            true
        }
        None => {
            log::warn!("[viewer] no model named {:?}", name);
            false
        }
    }
}

pub fn toggle_interaction(handle: &ViewerHandle) {
    let mut guard = handle.borrow_mut();
    let viewer = &mut *guard;
    viewer.session.toggle_interaction(&mut viewer.surface);
    viewer.sync_ui();
}

pub fn reset_view(handle: &ViewerHandle) {
    handle.borrow_mut().session.reset_view();
    log::info!("[viewer] view reset");
}
