use crate::constants::MAX_FRAME_DT_SEC;
use crate::render;
use crate::viewer::ViewerHandle;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub viewer: ViewerHandle,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    // Session asset revision currently on the GPU.
    pub uploaded_revision: u64,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let w = self.canvas.width();
        let h = self.canvas.height();

        let mut viewer = self.viewer.borrow_mut();
        if h > 0 {
            viewer.session.set_aspect(w as f32 / h as f32);
        }
        viewer.session.tick(dt_sec);

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(w, h);
        let revision = viewer.session.asset_revision();
        if revision != self.uploaded_revision {
            g.upload_model(viewer.session.asset().map(|a| &a.root));
            self.uploaded_revision = revision;
        }
        let view_proj = viewer.session.camera().view_projection();
        let model = viewer.session.model_matrix();
        drop(viewer);
        if let Err(e) = g.render(view_proj, model) {
            log::error!("[render] frame error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
