use super::{CaptureError, ImageArtifact};

/// Extract the raw QR text from a still image. The payload stays opaque: it
/// is an encrypted string only the backend can interpret.
pub fn decode_qr(artifact: &ImageArtifact) -> Result<String, CaptureError> {
    let gray = image::load_from_memory(&artifact.bytes)
        .map_err(|err| CaptureError::Undecodable(err.to_string()))?
        .to_luma8();

    let (width, height) = gray.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            gray.get_pixel(x as u32, y as u32)[0]
        });

    let grids = prepared.detect_grids();
    let grid = grids.first().ok_or(CaptureError::NoQrFound)?;
    let (_meta, content) = grid
        .decode()
        .map_err(|err| CaptureError::Undecodable(err.to_string()))?;

    if content.is_empty() {
        return Err(CaptureError::NoQrFound);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_image_has_no_qr() {
        let artifact =
            ImageArtifact::from_camera_frame(crate::capture::test_png_bytes(64, 64)).unwrap();
        assert!(matches!(decode_qr(&artifact), Err(CaptureError::NoQrFound)));
    }
}
