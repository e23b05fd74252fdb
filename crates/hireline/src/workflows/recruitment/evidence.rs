use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use mime::Mime;

use super::domain::EvidenceFile;

/// Upper bound on an attached evidence file.
pub const MAX_EVIDENCE_BYTES: u64 = 10 * 1024 * 1024;

/// Declared types an upload may carry. `image/jpg` is not a registered type
/// but browsers emit it, so it stays on the list alongside `image/jpeg`.
const ALLOWED_TYPES: [&str; 7] = [
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// Inbound evidence payload as raw bytes plus declared metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUpload {
    pub name: String,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
    pub bytes: Vec<u8>,
}

/// Rejection raised before any candidate state is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileRejected {
    #[error("evidence file is {size} bytes; the limit is {limit}")]
    Oversize { size: u64, limit: u64 },
    #[error("evidence type '{content_type}' is not an accepted document format")]
    UnsupportedType { content_type: String },
}

/// Validate an upload and produce the stored evidence record.
pub fn accept(upload: EvidenceUpload) -> Result<EvidenceFile, FileRejected> {
    let size = upload.bytes.len() as u64;
    if size > MAX_EVIDENCE_BYTES {
        return Err(FileRejected::Oversize {
            size,
            limit: MAX_EVIDENCE_BYTES,
        });
    }

    let declared: Mime = upload
        .content_type
        .parse()
        .map_err(|_| FileRejected::UnsupportedType {
            content_type: upload.content_type.clone(),
        })?;

    let essence = declared.essence_str();
    if !ALLOWED_TYPES.contains(&essence) {
        return Err(FileRejected::UnsupportedType {
            content_type: essence.to_string(),
        });
    }

    Ok(EvidenceFile {
        name: upload.name,
        size,
        content_type: essence.to_string(),
        last_modified: upload.last_modified,
        content: BASE64.encode(&upload.bytes),
    })
}

/// Decode a stored evidence payload back to its original bytes.
pub fn decode(file: &EvidenceFile) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(&file.content)
}
