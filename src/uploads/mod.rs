//! @acp:module "Uploads"
//! @acp:summary "Read-and-attach ingestion of reference documents"
//! @acp:domain wizard
//! @acp:layer io
//!
//! Files are never interpreted: plain text is kept as text, everything else
//! is carried as a base64 payload and attached to the blueprint verbatim.

use std::collections::BTreeMap;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SophiaError};

/// Extensions the upload questions accept
pub const ACCEPTED_EXTENSIONS: &str = ".pdf,.doc,.docx,.txt,.pptx,.xlsx";

/// An ingested file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Decoded text for plain-text files, base64 otherwise
    pub content: String,
}

impl UploadedFile {
    pub fn is_text(&self) -> bool {
        self.mime_type == "text/plain"
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "txt" => Some("text/plain"),
        "pptx" => Some("application/vnd.openxmlformats-officedocument.presentationml.presentation"),
        "xlsx" => Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        _ => None,
    }
}

/// Check a file name against the accepted-extension allowlist
pub fn is_accepted(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| mime_for_extension(&e.to_lowercase()).is_some())
        .unwrap_or(false)
}

/// Build an upload record from raw bytes
pub fn ingest_bytes(name: &str, bytes: &[u8]) -> Result<UploadedFile> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let mime_type = mime_for_extension(&ext).ok_or_else(|| SophiaError::UnsupportedUpload {
        name: name.to_string(),
        accepted: ACCEPTED_EXTENSIONS.to_string(),
    })?;

    let content = if mime_type == "text/plain" {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        general_purpose::STANDARD.encode(bytes)
    };

    Ok(UploadedFile {
        name: name.to_string(),
        size: bytes.len() as u64,
        mime_type: mime_type.to_string(),
        content,
    })
}

/// Read a file from disk and ingest it
pub fn ingest_file<P: AsRef<Path>>(path: P) -> Result<UploadedFile> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if !is_accepted(&name) {
        return Err(SophiaError::UnsupportedUpload {
            name,
            accepted: ACCEPTED_EXTENSIONS.to_string(),
        });
    }

    let bytes = std::fs::read(path)?;
    tracing::debug!("Ingested {} ({} bytes)", name, bytes.len());
    ingest_bytes(&name, &bytes)
}

/// Human-readable size: bytes, then KB/MB with one decimal
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Files attached to upload questions, keyed by question id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attachments {
    files: BTreeMap<String, Vec<UploadedFile>>,
}

impl Attachments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, question_id: impl Into<String>, file: UploadedFile) {
        self.files.entry(question_id.into()).or_default().push(file);
    }

    /// Remove the file at `index`, returning it when present
    pub fn detach(&mut self, question_id: &str, index: usize) -> Option<UploadedFile> {
        let files = self.files.get_mut(question_id)?;
        if index >= files.len() {
            return None;
        }
        let removed = files.remove(index);
        if files.is_empty() {
            self.files.remove(question_id);
        }
        Some(removed)
    }

    pub fn files(&self, question_id: &str) -> &[UploadedFile] {
        self.files.get(question_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Question ids with at least one file, in id order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<UploadedFile>)> {
        self.files.iter().filter(|(_, files)| !files.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.files.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}
