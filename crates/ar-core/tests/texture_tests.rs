// Host-side tests for base-color image decoding.

use ar_core::*;
use std::io::Cursor;

fn png_bytes(width: u32, height: u32, pixels: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, pixels).unwrap();
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

#[test]
fn png_decodes_to_packed_rgba() {
    let pixels = vec![255, 0, 0, 255, 0, 128, 255, 64];
    let decoded = decode_image(&png_bytes(2, 1, pixels.clone())).unwrap();
    assert_eq!(decoded.width, 2);
    assert_eq!(decoded.height, 1);
    assert_eq!(decoded.pixels, pixels);
}

#[test]
fn rgb_sources_gain_an_opaque_alpha() {
    let img = image::RgbImage::from_raw(1, 1, vec![10, 20, 30]).unwrap();
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    assert_eq!(decode_image(&bytes).unwrap().pixels, vec![10, 20, 30, 255]);
}

#[test]
fn garbage_is_an_image_error() {
    assert!(matches!(
        decode_image(&[0, 1, 2, 3]),
        Err(LoadError::Image(_))
    ));
}

#[test]
fn image_for_skips_missing_and_undecoded_slots() {
    let skin = ImageRgba8 {
        width: 1,
        height: 1,
        pixels: vec![1, 2, 3, 4],
    };
    let model = ModelData {
        mesh: MeshData::default(),
        images: vec![None, Some(skin.clone())],
    };
    assert_eq!(model.image_for(Some(1)), Some(&skin));
    assert_eq!(model.image_for(Some(0)), None);
    assert_eq!(model.image_for(Some(7)), None);
    assert_eq!(model.image_for(None), None);
}
