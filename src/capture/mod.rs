pub mod artifact;
pub mod qr;

pub use artifact::ImageArtifact;
pub use qr::decode_qr;

use thiserror::Error;

/// Media-acquisition failures. All of these are recoverable: the caller
/// surfaces them as a dismissible message and the user retries with the
/// camera or falls back to a file upload.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to read image: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("unrecognized image data: {0}")]
    Undecodable(String),

    #[error("no QR code found in image")]
    NoQrFound,
}

/// Encode a solid-white PNG in memory, shared by capture and validator tests.
#[cfg(test)]
pub(crate) fn test_png_bytes(width: u32, height: u32) -> Vec<u8> {
    use std::io::Cursor;

    let img = image::RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}
