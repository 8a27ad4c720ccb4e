use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::DEFAULT_MAX_FILE_SIZE;

/// Short random id for an upload job, e.g. `job_1a2b3c4d`
pub fn generate_job_id() -> String {
    format!("job_{}", short_uuid())
}

/// Object key for an upload: `device_id/YYYY/MM/DD/HH/<name>_<random><ext>`
pub fn generate_storage_key(device_id: &str, file_name: &str) -> String {
    storage_key_at(device_id, file_name, Utc::now())
}

fn storage_key_at(device_id: &str, file_name: &str, at: DateTime<Utc>) -> String {
    let (base_name, ext) = split_extension(file_name);
    format!(
        "{}/{}/{}_{}{}",
        device_id,
        at.format("%Y/%m/%d/%H"),
        base_name,
        short_uuid(),
        ext
    )
}

/// Splits `name.ext` into (`name`, `.ext`); names without an extension keep an empty suffix
fn split_extension(file_name: &str) -> (&str, &str) {
    let ext = extension_of(file_name);
    (&file_name[..file_name.len() - ext.len()], ext)
}

/// Suffix from the last `.` of the final `/`-separated segment, dot included.
/// `"a.wav/"` has no extension.
pub fn extension_of(file_name: &str) -> &str {
    let tail_start = file_name.rfind('/').map_or(0, |i| i + 1);
    match file_name[tail_start..].rfind('.') {
        Some(dot) => &file_name[tail_start + dot..],
        None => "",
    }
}

fn short_uuid() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

pub fn validate_file_type(file_type: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|t| t.eq_ignore_ascii_case(file_type))
}

/// A non-positive `max_size` means the 100 MiB default
pub fn validate_file_size(file_size: i64, max_size: i64) -> bool {
    let max_size = if max_size <= 0 { DEFAULT_MAX_FILE_SIZE } else { max_size };
    file_size > 0 && file_size <= max_size
}

/// MIME type from the file extension
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = extension_of(file_name)
        .strip_prefix('.')
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        _ => "application/octet-stream",
    }
}
