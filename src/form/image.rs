use base64::{engine::general_purpose, Engine as _};

/// A binary image picked for upload, held in memory for the form session.
#[derive(Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> UploadedFile {
        UploadedFile {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Declared content type, or one guessed from the file name.
    pub fn mime(&self) -> String {
        match &self.content_type {
            Some(content_type) if !content_type.is_empty() => content_type.clone(),
            _ => mime_guess::from_path(&self.file_name)
                .first_raw()
                .unwrap_or("application/octet-stream")
                .to_string(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime().starts_with("image/")
    }
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The image that wins at submission time. An upload always takes precedence
/// over a typed URL.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageSource<'a> {
    Upload(&'a UploadedFile),
    Url(&'a str),
    None,
}

/// Local preview of an upload, displayable as an image `src`.
pub fn preview_data_uri(file: &UploadedFile) -> String {
    format!(
        "data:{};base64,{}",
        file.mime(),
        general_purpose::STANDARD.encode(&file.bytes)
    )
}
