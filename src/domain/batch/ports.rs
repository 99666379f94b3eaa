//! Seams the batch processor depends on

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::extraction::ExtractedDocument;
use crate::domain::DomainError;

/// Moves a file into a target directory under a given name.
///
/// Implementations create the target directory when missing and must never
/// overwrite an existing file; a clashing name gets a timestamp prefix.
#[async_trait]
pub trait FileRelocator: Send + Sync + Debug {
    async fn relocate(
        &self,
        path: &Path,
        target_dir: &Path,
        file_name: &str,
    ) -> std::io::Result<PathBuf>;
}

/// A validated document ready to be handed off
#[derive(Debug, Clone)]
pub struct DispatchItem {
    pub source_path: PathBuf,
    pub document: ExtractedDocument,
}

impl DispatchItem {
    pub fn stem(&self) -> String {
        self.source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }
}

/// Hands a validated document to the rewrite stage.
///
/// Returns the path of any output written for the item.
#[async_trait]
pub trait ItemDispatcher: Send + Sync + Debug {
    async fn dispatch(&self, item: DispatchItem) -> Result<Option<PathBuf>, DomainError>;
}
