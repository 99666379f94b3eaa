//! Filesystem helpers shared by relocation and output writing

use std::path::{Path, PathBuf};

use chrono::Local;

/// Timestamp format used in generated file names
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn file_timestamp() -> String {
    Local::now().format(FILE_TIMESTAMP_FORMAT).to_string()
}

/// First path in `dir` that does not exist yet, trying `candidates` in order and
/// then numbering the last one.
pub async fn first_free_path(dir: &Path, candidates: &[String]) -> std::io::Result<PathBuf> {
    for name in candidates {
        let path = dir.join(name);
        if !tokio::fs::try_exists(&path).await? {
            return Ok(path);
        }
    }

    let last = candidates
        .last()
        .map(String::as_str)
        .unwrap_or("file");
    let (stem, ext) = split_name(last);

    let mut n = 1u32;
    loop {
        let path = dir.join(format!("{}_{}{}", stem, n, ext));
        if !tokio::fs::try_exists(&path).await? {
            return Ok(path);
        }
        n += 1;
    }
}

fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("memo.txt"), ("memo", ".txt"));
        assert_eq!(split_name("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_name(".env"), (".env", ""));
        assert_eq!(split_name("README"), ("README", ""));
    }

    #[tokio::test]
    async fn test_first_free_path() {
        let dir = tempfile::tempdir().unwrap();

        let free = first_free_path(dir.path(), &["a.txt".to_string()]).await.unwrap();
        assert_eq!(free, dir.path().join("a.txt"));

        tokio::fs::write(dir.path().join("a.txt"), b"x").await.unwrap();
        tokio::fs::write(dir.path().join("b.txt"), b"x").await.unwrap();

        let free = first_free_path(dir.path(), &["a.txt".to_string(), "b.txt".to_string()])
            .await
            .unwrap();
        assert_eq!(free, dir.path().join("b_1.txt"));
    }

    #[test]
    fn test_file_timestamp_shape() {
        let ts = file_timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[8..9], "_");
    }
}
