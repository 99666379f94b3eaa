//! Bodies for folder processing and folder inspection routes

use serde::{Deserialize, Serialize};

use crate::domain::batch::BatchReport;
use crate::domain::extraction::DocumentKind;
use crate::infrastructure::folder_stats::FolderStats;

/// Form or JSON body of `POST /process-input-folder`
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessFolderRequest {
    pub target_audience: String,
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessFolderResponse {
    pub status: &'static str,
    pub request_id: String,
    pub processed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub report: BatchReport,
}

impl ProcessFolderResponse {
    pub fn new(request_id: impl Into<String>, report: BatchReport) -> Self {
        let status = if report.is_empty() {
            "no_files"
        } else {
            "completed"
        };

        Self {
            status,
            request_id: request_id.into(),
            processed: report.succeeded,
            failed: report.failed,
            skipped: report.skipped,
            report,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FolderStatsResponse {
    pub input_folder: FolderStats,
    pub output_folder: FolderStats,
}

/// One entry of `GET /supported-formats`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportedFormat {
    pub extension: &'static str,
    pub mime_type: &'static str,
    pub description: &'static str,
    pub max_size_mb: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupportedFormatsResponse {
    pub supported_formats: Vec<SupportedFormat>,
    pub max_file_size_mb: f64,
}

impl SupportedFormatsResponse {
    pub fn for_limit(max_bytes: usize) -> Self {
        let max_size_mb = max_bytes as f64 / (1024.0 * 1024.0);
        Self {
            supported_formats: DocumentKind::ALL
                .iter()
                .map(|kind| SupportedFormat {
                    extension: kind.extension(),
                    mime_type: kind.mime_type(),
                    description: kind.description(),
                    max_size_mb,
                })
                .collect(),
            max_file_size_mb: max_size_mb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_formats_listing() {
        let response = SupportedFormatsResponse::for_limit(10 * 1024 * 1024);

        assert_eq!(response.max_file_size_mb, 10.0);
        let extensions: Vec<_> = response
            .supported_formats
            .iter()
            .map(|f| f.extension)
            .collect();
        assert_eq!(extensions, vec![".txt", ".pdf", ".docx"]);
    }

    #[test]
    fn test_empty_report_status() {
        let response = ProcessFolderResponse::new("req-1", BatchReport::new("/in").finish());

        assert_eq!(response.status, "no_files");
        assert_eq!(response.processed, 0);
    }
}
