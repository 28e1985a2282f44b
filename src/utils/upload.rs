use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Media types accepted for project attachments: images, PDFs and Office
/// documents.
const ALLOWED_FILE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

pub fn is_allowed_file_type(content_type: &str) -> bool {
    ALLOWED_FILE_TYPES.contains(&content_type)
}

pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Writes one uploaded attachment under `upload_dir` as
/// `{timestamp}-{sanitized name}` and returns the stored path.
pub async fn store_attachment(
    upload_dir: &str,
    original_name: &str,
    data: &[u8],
) -> Result<String> {
    fs::create_dir_all(upload_dir)
        .await
        .context("Failed to create upload directory")?;

    let safe_name = sanitize_filename(original_name);
    let timestamp = chrono::Utc::now().timestamp_millis();
    let stored_path = format!("{}/{}-{}", upload_dir.trim_end_matches('/'), timestamp, safe_name);

    let mut file = fs::File::create(&stored_path)
        .await
        .with_context(|| format!("Failed to create attachment file {stored_path}"))?;
    file.write_all(data)
        .await
        .context("Failed to write attachment data")?;
    file.flush().await.context("Failed to flush attachment file")?;

    Ok(stored_path)
}

/// Best-effort cleanup for files written before a transaction rolled back.
pub async fn remove_stored_files(paths: &[String]) {
    for path in paths {
        if Path::new(path).exists() {
            if let Err(e) = fs::remove_file(path).await {
                tracing::warn!(path = %path, error = %e, "failed to remove orphaned upload");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("report:final?.pdf"), "report_final_.pdf");
        assert_eq!(sanitize_filename("  orbit demo.png  "), "orbit demo.png");
    }

    #[test]
    fn file_type_allowlist_covers_documents_not_executables() {
        assert!(is_allowed_file_type("application/pdf"));
        assert!(is_allowed_file_type("image/png"));
        assert!(!is_allowed_file_type("application/x-msdownload"));
        assert!(!is_allowed_file_type("text/html"));
    }
}
