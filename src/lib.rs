#![cfg(target_arch = "wasm32")]
use ar_core::{
    DeviceClass, FramerConfig, GestureSurface, ModelFramer, PointerTracker, ViewerOptions,
    ViewerSession, DEFAULT_CATALOG,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera_stream;
mod constants;
mod dom;
mod events;
mod frame;
mod keymap;
mod loader;
mod overlay;
mod picker;
mod render;
mod surface;
mod viewer;

use camera_stream::CameraStream;
use constants::{
    CANVAS_ID, FLIP_BUTTON_ID, HELP_BUTTON_ID, HELP_CLOSE_ID, INTERACT_BUTTON_ID,
    RESET_BUTTON_ID, VIDEO_ID,
};
use surface::CanvasSurface;
use viewer::{Viewer, ViewerHandle};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ar-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn read_options(window: &web::Window) -> (ViewerOptions, DeviceClass) {
    let search = window.location().search().unwrap_or_default();
    let options = ViewerOptions::from_query(&search);
    let (width, coarse) = dom::viewport_traits(window);
    let device = options
        .device_override
        .unwrap_or_else(|| DeviceClass::classify(width, coarse));
    log::info!(
        "[init] device={:?} width={} coarse={} options={:?}",
        device,
        width,
        coarse,
        options
    );
    (options, device)
}

fn wire_buttons(
    document: &web::Document,
    viewer_handle: &ViewerHandle,
    camera: &Rc<RefCell<CameraStream>>,
) {
    let v = viewer_handle.clone();
    dom::add_click_listener(document, INTERACT_BUTTON_ID, move || {
        viewer::toggle_interaction(&v)
    });
    let v = viewer_handle.clone();
    dom::add_click_listener(document, RESET_BUTTON_ID, move || viewer::reset_view(&v));
    let cam = camera.clone();
    dom::add_click_listener(document, FLIP_BUTTON_ID, move || camera_stream::flip(&cam));

    let doc = document.clone();
    dom::add_click_listener(document, HELP_BUTTON_ID, move || overlay::toggle_help(&doc));
    let doc = document.clone();
    dom::add_click_listener(document, HELP_CLOSE_ID, move || overlay::hide_help(&doc));
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)?;
    let video: web::HtmlVideoElement = dom::element_by_id(&document, VIDEO_ID)?;
    dom::wire_canvas_resize(&canvas);

    let (options, device) = read_options(&window);
    let framer = ModelFramer::new(
        FramerConfig::for_device(device).with_azimuth_restriction(options.restrict_azimuth),
    );
    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let session = ViewerSession::new(DEFAULT_CATALOG.to_vec(), framer, aspect);

    let tracker = Rc::new(RefCell::new(PointerTracker::new()));
    let mut surface = CanvasSurface::new(canvas.clone(), tracker.clone());
    surface.set_gesture_capture(false);
    let viewer_handle = Viewer::new(session, surface, document.clone());

    let camera = Rc::new(RefCell::new(CameraStream::new(video, options.facing)));
    camera_stream::start(&camera);

    let on_select: Rc<dyn Fn(usize)> = {
        let v = viewer_handle.clone();
        Rc::new(move |index| viewer::select_model(&v, index))
    };
    picker::build(&document, DEFAULT_CATALOG, on_select)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    wire_buttons(&document, &viewer_handle, &camera);
    events::wire_global_keydown(viewer_handle.clone(), camera.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer_handle.clone(),
        tracker,
    });
    overlay::set_interacting(&document, false);

    let gpu = frame::init_gpu(&canvas).await;

    let initial = options.initial_model.as_deref();
    if !initial.is_some_and(|name| viewer::select_by_name(&viewer_handle, name)) {
        viewer::select_model(&viewer_handle, 0);
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer: viewer_handle,
        canvas,
        gpu,
        uploaded_revision: 0,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
