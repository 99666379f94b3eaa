//! Input folder discovery

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::domain::batch::BatchError;
use crate::domain::extraction::DocumentKind;

/// A regular file found directly inside the input folder
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: Option<DocumentKind>,
    pub byte_len: u64,
    pub modified: SystemTime,
}

/// List files directly inside `dir`, oldest first, ties broken by name.
///
/// A missing directory is created and yields nothing. Subdirectories
/// (including `processed/` and `errors/`) are never descended into.
pub async fn scan_input_dir(dir: &Path) -> Result<Vec<DiscoveredFile>, BatchError> {
    if !tokio::fs::try_exists(dir)
        .await
        .map_err(|e| BatchError::input_unreadable(dir, e))?
    {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| BatchError::input_unreadable(dir, e))?;
        tracing::info!(input_dir = %dir.display(), "Created missing input directory");
        return Ok(Vec::new());
    }

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| BatchError::input_unreadable(dir, e))?;

    let mut files = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => return Err(BatchError::input_unreadable(dir, e)),
        };

        let path = entry.path();
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if !metadata.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        files.push(DiscoveredFile {
            kind: DocumentKind::from_filename(&file_name),
            byte_len: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            file_name,
            path,
        });
    }

    files.sort_by(|a, b| {
        a.modified
            .cmp(&b.modified)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });

    Ok(files)
}
