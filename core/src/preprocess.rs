//! Bitmap-to-tensor conversion for the classifier input.

use image::DynamicImage;
use image::imageops::FilterType;
use tract_onnx::prelude::*;

/// Height and width of the model's input plane.
pub const INPUT_SIZE: u32 = 224;
/// Channels per pixel fed to the model (R, G, B; alpha is dropped).
pub const INPUT_CHANNELS: usize = 3;

/// Convert a decoded bitmap of any size and color depth into the
/// `1x224x224x3` f32 tensor the model expects.
///
/// The image is resampled directly to 224x224 whatever its aspect ratio,
/// with no letterboxing and no cropping. Channel bytes are scaled to
/// `[0, 1]` by dividing by 255, in R, G, B order, row-major with channels
/// last: `index = (row * 224 + col) * 3 + channel`. Deterministic, and the
/// only side effect is allocating the output buffer.
pub fn preprocess(image: &DynamicImage) -> Tensor {
    let size = INPUT_SIZE as usize;
    let resized = image.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);
    let rgb = resized.to_rgb8();
    tract_ndarray::Array4::from_shape_fn((1, size, size, INPUT_CHANNELS), |(_, row, col, chan)| {
        rgb.get_pixel(col as u32, row as u32)[chan] as f32 / 255.0
    })
    .into()
}
