use crate::error::LoadError;
use crate::mesh::MeshData;

/// Decoded base-color image, tightly packed RGBA8 rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRgba8 {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub fn decode_image(bytes: &[u8]) -> Result<ImageRgba8, LoadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageRgba8 {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Mesh plus the images its batches sample, indexed like the glTF `images`
/// array. Unused or undecodable slots are `None` and draw untextured.
#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub mesh: MeshData,
    pub images: Vec<Option<ImageRgba8>>,
}

impl ModelData {
    pub fn image_for(&self, index: Option<usize>) -> Option<&ImageRgba8> {
        index.and_then(|i| self.images.get(i)).and_then(Option::as_ref)
    }
}
