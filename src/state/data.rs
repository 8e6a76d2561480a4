/// Shared data structures for the application state
///
/// These types flow between the state layer and the UI layer.

use std::path::PathBuf;

use image::ImageFormat;

/// Visibility filter for the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Public,
    Private,
}

impl Scope {
    /// Value of the `private` query flag on the list endpoint
    pub fn is_private(self) -> bool {
        matches!(self, Scope::Private)
    }

    /// Label shown on the scope tabs
    pub fn label(self) -> &'static str {
        match self {
            Scope::Public => "Public",
            Scope::Private => "Private",
        }
    }
}

/// A file chosen in the native picker, before its contents are read
#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile {
    pub path: PathBuf,
    pub filename: String,
}

impl PickedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        PickedFile { path, filename }
    }
}

/// Upload form state.
///
/// Submitting without a chosen file is rejected here, before any network
/// call. `in_flight` lets the UI disable the submit button while an
/// upload is running; the controller itself does not deduplicate calls.
#[derive(Debug, Clone, Default)]
pub struct UploadDraft {
    pub file: Option<PickedFile>,
    pub caption: String,
    pub is_private: bool,
    pub in_flight: bool,
    pub error: Option<String>,
}

impl UploadDraft {
    /// Check the draft is submittable.
    /// Returns the chosen file, or the message to show in the panel.
    pub fn validate(&self) -> Result<PickedFile, String> {
        if self.in_flight {
            return Err("An upload is already running".to_string());
        }

        match &self.file {
            Some(file) => Ok(file.clone()),
            None => Err("Choose an image first".to_string()),
        }
    }

    /// Reset after a successful upload.
    /// The visibility choice is kept so consecutive uploads land in the
    /// same scope.
    pub fn clear(&mut self) {
        self.file = None;
        self.caption.clear();
        self.in_flight = false;
        self.error = None;
    }
}

/// Detect the MIME type of picked file contents.
///
/// Only the formats the server accepts come back Ok: JPEG, PNG, GIF and
/// WebP. Everything else is rejected locally.
pub fn sniff_content_type(bytes: &[u8]) -> Result<&'static str, String> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => Ok("image/jpeg"),
        Ok(ImageFormat::Png) => Ok("image/png"),
        Ok(ImageFormat::Gif) => Ok("image/gif"),
        Ok(ImageFormat::WebP) => Ok("image/webp"),
        Ok(other) => Err(format!(
            "{other:?} files are not supported. Use JPEG, PNG, GIF or WebP."
        )),
        Err(_) => Err("This file does not look like an image".to_string()),
    }
}
