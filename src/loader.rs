//! Fetch a catalog entry and turn it into a framed-ready mesh.

use ar_core::{
    decode_image, extract_mesh, plan_buffers, plan_images, view_bytes, BufferSource, ImageSource,
    LoadError, LoadedAsset, ModelData, ModelDescriptor,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub async fn load_model(
    descriptor: &ModelDescriptor,
) -> Result<LoadedAsset<ModelData>, LoadError> {
    let url = descriptor.source_path;
    log::info!("[loader] fetching {} from {}", descriptor.name, url);
    let bytes = fetch_bytes(url).await?;
    let gltf = gltf::Gltf::from_slice(&bytes)?;

    let plan = plan_buffers(&gltf.document, url)?;
    let mut buffers = Vec::with_capacity(plan.len());
    for (index, source) in plan.into_iter().enumerate() {
        let data = match source {
            BufferSource::Blob => gltf
                .blob
                .clone()
                .ok_or(LoadError::MissingBuffer(index))?,
            BufferSource::Inline(data) => data,
            BufferSource::External(buffer_url) => fetch_bytes(&buffer_url).await?,
        };
        buffers.push(data);
    }

    let mesh = extract_mesh(&gltf.document, &buffers)?;
    log::info!(
        "[loader] {}: {} vertices, {} triangles",
        descriptor.name,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    let sources = plan_images(&gltf.document, url)?;
    let mut images = vec![None; sources.len()];
    for index in mesh.used_images() {
        let Some(source) = sources.get(index) else {
            continue;
        };
        let decoded = match image_bytes(&gltf.document, source, &buffers).await {
            Ok(bytes) => decode_image(&bytes),
            Err(e) => Err(e),
        };
        match decoded {
            Ok(image) => {
                log::info!(
                    "[loader] {}: image {} is {}x{}",
                    descriptor.name,
                    index,
                    image.width,
                    image.height
                );
                images[index] = Some(image);
            }
            // Geometry is still usable; those batches draw untextured.
            Err(e) => log::warn!("[loader] {}: image {} skipped: {}", descriptor.name, index, e),
        }
    }

    let bounds = mesh.bounds;
    Ok(LoadedAsset::new(ModelData { mesh, images }, bounds))
}

async fn image_bytes(
    doc: &gltf::Document,
    source: &ImageSource,
    buffers: &[Vec<u8>],
) -> Result<Vec<u8>, LoadError> {
    match source {
        ImageSource::View(view) => view_bytes(doc, *view, buffers),
        ImageSource::Inline(bytes) => Ok(bytes.clone()),
        ImageSource::External(url) => fetch_bytes(url).await,
    }
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    let fetch_err = |e: wasm_bindgen::JsValue| LoadError::Fetch {
        url: url.to_string(),
        reason: format!("{:?}", e),
    };
    let window = web::window().ok_or_else(|| LoadError::Fetch {
        url: url.to_string(),
        reason: "no window".into(),
    })?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(fetch_err)?
        .dyn_into()
        .map_err(fetch_err)?;
    if !response.ok() {
        return Err(LoadError::Http {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
