use std::path::Path;

use super::CaptureError;

/// An acquired package image, either uploaded from disk or handed over as a
/// finished camera frame. The live camera stream itself is owned and released
/// by the webview layer; the core only ever holds completed frames, so
/// dropping the artifact releases everything this side owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageArtifact {
    /// Upload adapter: read an image file the user selected.
    pub fn from_file(path: &Path) -> Result<Self, CaptureError> {
        let bytes = std::fs::read(path)?;
        let mime = sniff_mime(&bytes)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    /// Camera adapter: wrap a frame captured by the webview.
    pub fn from_camera_frame(bytes: Vec<u8>) -> Result<Self, CaptureError> {
        let mime = sniff_mime(&bytes)?;
        let file_name = match mime.as_str() {
            "image/png" => "captured-image.png",
            _ => "captured-image.jpg",
        }
        .to_string();

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Classify by content, never by file extension.
fn sniff_mime(bytes: &[u8]) -> Result<String, CaptureError> {
    let format =
        image::guess_format(bytes).map_err(|err| CaptureError::Undecodable(err.to_string()))?;
    Ok(format.to_mime_type().to_string())
}
