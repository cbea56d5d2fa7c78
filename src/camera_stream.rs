//! Live camera background.
//!
//! Requests are sequenced: starting a new stream stops the tracks of the
//! current one first, and a request that resolves after it was superseded
//! has its stream stopped on arrival instead of being attached.

use ar_core::FacingMode;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct CameraStream {
    video: web::HtmlVideoElement,
    facing: FacingMode,
    current: Option<web::MediaStream>,
    seq: u64,
}

impl CameraStream {
    pub fn new(video: web::HtmlVideoElement, facing: FacingMode) -> Self {
        Self {
            video,
            facing,
            current: None,
            seq: 0,
        }
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn stop(&mut self) {
        if let Some(stream) = self.current.take() {
            stop_tracks(&stream);
        }
        self.video.set_src_object(None);
    }
}

/// (Re)start the stream with the stored facing mode.
pub fn start(handle: &Rc<RefCell<CameraStream>>) {
    let (seq, facing) = {
        let mut cam = handle.borrow_mut();
        cam.stop();
        cam.seq += 1;
        (cam.seq, cam.facing)
    };
    let handle = handle.clone();
    spawn_local(async move {
        match request_stream(facing).await {
            Ok(stream) => {
                let playing = {
                    let mut cam = handle.borrow_mut();
                    if cam.seq != seq {
                        log::info!("[camera] discarding superseded {:?} stream", facing);
                        stop_tracks(&stream);
                        return;
                    }
                    cam.video.set_src_object(Some(&stream));
                    let mirror = if facing == FacingMode::User {
                        "scaleX(-1)"
                    } else {
                        "none"
                    };
                    _ = cam.video.style().set_property("transform", mirror);
                    cam.current = Some(stream);
                    cam.video.play()
                };
                // Borrow released: a flip may start while playback is pending.
                let started = match playing {
                    Ok(promise) => JsFuture::from(promise).await.map(drop),
                    Err(e) => Err(e),
                };
                match started {
                    Ok(()) => log::info!("[camera] streaming facing={}", facing.as_constraint()),
                    Err(e) => log::warn!("[camera] playback failed: {:?}", e),
                }
            }
            Err(e) => {
                // The viewer stays usable over a plain background.
                log::warn!("[camera] unavailable: {:#}", e);
            }
        }
    });
}

/// Switch between the user- and environment-facing cameras.
pub fn flip(handle: &Rc<RefCell<CameraStream>>) {
    {
        let mut cam = handle.borrow_mut();
        cam.facing = cam.facing.toggled();
        log::info!("[camera] switching to {}", cam.facing().as_constraint());
    }
    start(handle);
}

async fn request_stream(facing: FacingMode) -> anyhow::Result<web::MediaStream> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| anyhow::anyhow!("mediaDevices unavailable: {:?}", e))?;

    let video = js_sys::Object::new();
    js_sys::Reflect::set(
        &video,
        &JsValue::from_str("facingMode"),
        &JsValue::from_str(facing.as_constraint()),
    )
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| anyhow::anyhow!("getUserMedia: {:?}", e))?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("getUserMedia rejected: {:?}", e))?;
    stream
        .dyn_into::<web::MediaStream>()
        .map_err(|e| anyhow::anyhow!("not a MediaStream: {:?}", e))
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}
