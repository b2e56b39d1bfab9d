use crate::error::ModelError;
use std::fmt;
use std::path::Path;

/// Extensions accepted for a poster upload, with the MIME type sent.
const ACCEPTED_TYPES: [(&str, &str); 3] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
];

/// An image picked for upload but not yet sent.
///
/// `preview_url` is a client-side reference to the local file for display
/// before submission; it is never sent to the backend.
#[derive(Clone, PartialEq, Eq)]
pub struct StagedPoster {
    file_name: String,
    mime_type: &'static str,
    bytes: Vec<u8>,
    preview_url: String,
}

impl StagedPoster {
    pub fn new(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        preview_url: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| ModelError::UnsupportedPoster(file_name.clone()))?;
        let mime_type = ACCEPTED_TYPES
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mime)| *mime)
            .ok_or_else(|| ModelError::UnsupportedPoster(file_name.clone()))?;

        Ok(Self {
            file_name,
            mime_type,
            bytes,
            preview_url: preview_url.into(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }
}

impl fmt::Debug for StagedPoster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedPoster")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .field("preview_url", &self.preview_url)
            .finish()
    }
}
