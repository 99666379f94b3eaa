use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::fs::{file_timestamp, first_free_path};
use crate::domain::batch::FileRelocator;

/// Moves files with `rename`; source and target share the input folder's filesystem
#[derive(Debug, Clone, Default)]
pub struct FsRelocator;

impl FsRelocator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileRelocator for FsRelocator {
    async fn relocate(
        &self,
        path: &Path,
        target_dir: &Path,
        file_name: &str,
    ) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(target_dir).await?;

        let candidates = [
            file_name.to_string(),
            format!("{}_{}", file_timestamp(), file_name),
        ];
        let target = first_free_path(target_dir, &candidates).await?;

        tokio::fs::rename(path, &target).await?;
        Ok(target)
    }
}
