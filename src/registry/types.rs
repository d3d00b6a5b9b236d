use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;

use crate::metadata::{generate_metadata, FileMetadata};

// MIME types the upload surface lets through to the registry.
pub static ACCEPTED_MIME_TYPES: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["image/jpeg", "image/png", "application/pdf"]);

// Extensions offered by the file picker.
pub static UPLOAD_EXTS: Lazy<Vec<&'static str>> = Lazy::new(|| vec!["jpg", "jpeg", "png", "pdf"]);

pub fn is_accepted_mime(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.iter().any(|m| *m == mime)
}

/// A file as handed over by the upload surface. Bytes are shared so the
/// preview can reference them without copying.
#[derive(Clone, Debug)]
pub struct RawFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub modified: DateTime<Local>,
    pub bytes: Arc<[u8]>,
}

impl RawFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>, modified: DateTime<Local>) -> Self {
        let name = name.into();
        let mime = sniff_mime(&name, &bytes);
        Self {
            size: bytes.len() as u64,
            mime,
            modified,
            bytes: Arc::from(bytes.into_boxed_slice()),
            name,
        }
    }

    pub async fn read(path: &Path) -> anyhow::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let meta = tokio::fs::metadata(path).await?;
        let modified = meta
            .modified()
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();
        Ok(Self::from_bytes(name, bytes, modified))
    }
}

/// Content sniff first, extension fallback second.
pub fn sniff_mime(name: &str, bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some("png") => "image/png".to_string(),
        Some("pdf") => "application/pdf".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

// Ids are name-millis-seq; the sequence keeps them unique for the whole
// session even when the same file is added twice.
static ENTRY_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Debug)]
pub struct FileEntry {
    pub id: String,
    pub file: RawFile,
    pub metadata: FileMetadata,
}

impl FileEntry {
    pub(crate) fn new(file: RawFile) -> Self {
        let metadata = generate_metadata(&file.name, file.size, &file.mime, file.modified);
        let id = format!(
            "{}-{}-{}",
            file.name,
            file.modified.timestamp_millis(),
            ENTRY_SEQ.fetch_add(1, Ordering::Relaxed)
        );
        Self { id, file, metadata }
    }
}
