//! Recursive folder statistics for the input and output folders

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::extraction::{extension_of, is_supported_filename};

/// Snapshot of a folder tree
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FolderStats {
    pub path: PathBuf,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_files: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_directories: Option<usize>,
    /// Count per lowercase extension; files without one are keyed `no_extension`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_types: Option<BTreeMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_files: Option<usize>,
}

impl FolderStats {
    fn missing(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            exists: false,
            ..Self::default()
        }
    }
}

/// Walk `root` recursively. A missing folder reports `exists: false`.
pub async fn collect_folder_stats(root: &Path) -> std::io::Result<FolderStats> {
    if !tokio::fs::try_exists(root).await? {
        return Ok(FolderStats::missing(root));
    }

    let mut total_files = 0;
    let mut total_directories = 0;
    let mut supported_files = 0;
    let mut total_bytes: u64 = 0;
    let mut file_types: BTreeMap<String, usize> = BTreeMap::new();

    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                total_directories += 1;
                pending.push(entry.path());
                continue;
            }
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            total_files += 1;
            total_bytes += entry.metadata().await?.len();

            let extension = extension_of(&name);
            let key = if extension.is_empty() {
                "no_extension".to_string()
            } else {
                extension
            };
            *file_types.entry(key).or_default() += 1;

            if is_supported_filename(&name) {
                supported_files += 1;
            }
        }
    }

    let total_size_mb = (total_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;

    Ok(FolderStats {
        path: root.to_path_buf(),
        exists: true,
        total_files: Some(total_files),
        total_directories: Some(total_directories),
        file_types: Some(file_types),
        total_size_mb: Some(total_size_mb),
        supported_files: Some(supported_files),
    })
}
