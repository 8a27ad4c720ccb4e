use crate::error::ApiError;
use crate::validation::{require_non_empty, Validate};

/// Multipart form posted to `/detection/upload`
#[derive(Debug, Clone, Default)]
pub struct AudioUploadForm {
    pub device_id: String,
    pub audio_type: String,
    /// Capture time (unix seconds) reported by the device
    pub timestamp: Option<i64>,
    pub audio_file: Option<AudioFile>,
}

#[derive(Debug, Clone)]
pub struct AudioFile {
    pub file_name: Option<String>,
    pub size: usize,
}

impl Validate for AudioUploadForm {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty("device_id", &self.device_id)?;
        require_non_empty("audio_type", &self.audio_type)
    }
}
