use std::path::{Path, PathBuf};

use super::fs::{file_timestamp, first_free_path};

/// Write `content` to `<output_dir>/<prefix>_<YYYYmmdd_HHMMSS>.txt`, creating the
/// directory when needed. A clash within the same second gets a numeric suffix.
pub async fn save_output_file(
    content: &str,
    output_dir: &Path,
    prefix: &str,
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await?;

    let name = format!("{}_{}.txt", prefix, file_timestamp());
    let path = first_free_path(output_dir, &[name]).await?;

    tokio::fs::write(&path, content.as_bytes()).await?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Saved output file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_output_file() {
        let root = tempfile::tempdir().unwrap();
        let output_dir = root.path().join("output");

        let path = save_output_file("Dear team,", &output_dir, "rewritten_email")
            .await
            .unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("rewritten_email_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "Dear team,");
    }

    #[tokio::test]
    async fn test_same_second_does_not_overwrite() {
        let root = tempfile::tempdir().unwrap();

        let first = save_output_file("one", root.path(), "processed_memo").await.unwrap();
        let second = save_output_file("two", root.path(), "processed_memo").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(tokio::fs::read_to_string(&first).await.unwrap(), "one");
        assert_eq!(tokio::fs::read_to_string(&second).await.unwrap(), "two");
    }
}
