use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use xcap::image::codecs::png::PngEncoder;
use xcap::image::{ExtendedColorType, ImageEncoder, RgbaImage};

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("image is empty")]
    Empty,

    #[error("failed to encode PNG: {0}")]
    Png(#[from] xcap::image::ImageError),
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(EncodeError::Empty);
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buffer)
}

/// PNG bytes as standard base64, ready for a `data:` URL
pub fn encode_png_base64(image: &RgbaImage) -> Result<String, EncodeError> {
    let png = encode_png(image)?;
    Ok(BASE64.encode(png))
}
