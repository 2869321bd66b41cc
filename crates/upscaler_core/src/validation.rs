use thiserror::Error;

const MIB: u64 = 1024 * 1024;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * MIB;

/// Client-side limits applied before a file is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_upload_bytes: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Metadata of the image the user picked. The bytes stay with the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / MIB as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an image file (JPEG, PNG, etc.)")]
    NotAnImage { mime_type: String },
    #[error("File size exceeds {limit_mb}MB limit")]
    TooLarge { size: u64, limit_mb: u64 },
}

pub fn validate_selection(file: &SelectedFile, limits: &Limits) -> Result<(), ValidationError> {
    if !file.mime_type.to_ascii_lowercase().starts_with("image/") {
        return Err(ValidationError::NotAnImage {
            mime_type: file.mime_type.clone(),
        });
    }
    if file.size > limits.max_upload_bytes {
        return Err(ValidationError::TooLarge {
            size: file.size,
            limit_mb: limits.max_upload_bytes / MIB,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_image_at_the_limit() {
        let file = SelectedFile::new("cat.png", DEFAULT_MAX_UPLOAD_BYTES, "image/png");
        assert_eq!(validate_selection(&file, &Limits::default()), Ok(()));
    }

    #[test]
    fn rejects_one_byte_over_the_limit() {
        let file = SelectedFile::new("cat.png", DEFAULT_MAX_UPLOAD_BYTES + 1, "image/png");
        let err = validate_selection(&file, &Limits::default()).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 10MB limit");
    }

    #[test]
    fn rejects_non_image_types() {
        for mime in ["application/pdf", "text/plain", "", "video/mp4", "imagex/png"] {
            let file = SelectedFile::new("doc", 10, mime);
            assert!(
                matches!(
                    validate_selection(&file, &Limits::default()),
                    Err(ValidationError::NotAnImage { .. })
                ),
                "{mime} should be rejected"
            );
        }
    }

    #[test]
    fn size_label_uses_two_decimals() {
        let file = SelectedFile::new("cat.jpg", 1536 * 1024, "image/jpeg");
        assert_eq!(file.size_label(), "1.50 MB");
    }
}
