//! Upload decoding and vision-tower preprocessing.

use ::image::imageops::FilterType;
use ::image::DynamicImage;

use crate::embed::EmbedError;

/// Longest edge allowed before a decoded upload is downscaled.
pub const MAX_EDGE: u32 = 512;

/// CLIP processor normalization constants, RGB order.
const MEAN: [f32; 3] = [0.481_454_66, 0.457_827_5, 0.408_210_73];
const STD: [f32; 3] = [0.268_629_54, 0.261_302_58, 0.275_777_11];

/// Decode an uploaded payload into a 3-channel RGB image, downscaling so the
/// longer edge stays within [`MAX_EDGE`]. Aspect ratio is preserved and the
/// Lanczos filter keeps resample quality high.
pub fn prepare(bytes: &[u8]) -> Result<DynamicImage, EmbedError> {
    let decoded =
        ::image::load_from_memory(bytes).map_err(|e| EmbedError::Decode(e.to_string()))?;
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    if rgb.width().max(rgb.height()) > MAX_EDGE {
        Ok(rgb.resize(MAX_EDGE, MAX_EDGE, FilterType::Lanczos3))
    } else {
        Ok(rgb)
    }
}

/// Convert a prepared image into the `[1, 3, size, size]` CHW tensor the
/// vision tower expects, applying the CLIP mean/std normalization.
pub fn to_tensor(img: &DynamicImage, input_size: u32) -> (Vec<usize>, Vec<f32>) {
    let resized = img.resize_exact(input_size, input_size, FilterType::CatmullRom);
    let rgb = resized.to_rgb8();
    let size = input_size as usize;

    let shape = vec![1, 3, size, size];
    let mut data = vec![0.0f32; 3 * size * size];

    for y in 0..size {
        for x in 0..size {
            let px = rgb.get_pixel(x as u32, y as u32);
            let idx = y * size + x;
            for c in 0..3 {
                data[c * size * size + idx] = (px[c] as f32 / 255.0 - MEAN[c]) / STD[c];
            }
        }
    }

    (shape, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            ::image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn prepare_rejects_garbage() {
        let err = prepare(b"definitely not an image").unwrap_err();
        assert!(matches!(err, EmbedError::Decode(_)));
    }

    #[test]
    fn prepare_keeps_small_images_untouched() {
        let img = prepare(&png_bytes(100, 60)).unwrap();
        assert_eq!((img.width(), img.height()), (100, 60));
    }

    #[test]
    fn prepare_downscales_oversized_images() {
        let img = prepare(&png_bytes(1024, 768)).unwrap();
        assert!(img.width().max(img.height()) <= MAX_EDGE);
        // Aspect ratio preserved: 1024x768 -> 512x384.
        assert_eq!((img.width(), img.height()), (512, 384));
    }

    #[test]
    fn prepare_downscales_portrait_images() {
        let img = prepare(&png_bytes(300, 900)).unwrap();
        assert_eq!(img.height(), 512);
        // Width follows the 1:3 aspect ratio, within integer rounding.
        assert!((170..=171).contains(&img.width()));
    }

    #[test]
    fn tensor_has_expected_shape_and_finite_values() {
        let img = prepare(&png_bytes(64, 64)).unwrap();
        let (shape, data) = to_tensor(&img, 224);
        assert_eq!(shape, vec![1, 3, 224, 224]);
        assert_eq!(data.len(), 3 * 224 * 224);
        assert!(data.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn tensor_normalization_is_applied() {
        // A mid-gray image lands close to zero after mean/std normalization,
        // nowhere near the raw 0.5 pixel value.
        let gray = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, ::image::Rgb([128; 3])));
        let (_, data) = to_tensor(&gray, 32);
        for v in data {
            assert!(v.abs() < 1.0);
        }
    }
}
