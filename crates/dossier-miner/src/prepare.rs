//! Document preparation
//!
//! Turns a source file into the payload handed to the provider adapter.
//! Multimodal providers get the file uploaded natively (PDFs and images
//! included, no text extraction); text-only providers get the content
//! decoded as UTF-8 and inlined into the prompt. Undecodable binary
//! content for a text-only provider is a recoverable skip, not an error.

use dossier_domain::traits::Provider;
use dossier_domain::DocumentPayload;
use std::path::Path;
use tracing::debug;

/// What preparation produced for one source file.
#[derive(Debug)]
pub enum Prepared {
    /// A payload ready to hand to the provider
    Payload(DocumentPayload),

    /// The document cannot be processed with this provider; the miner
    /// records the reason and continues with the next file
    Skipped(String),
}

/// Prepare one document for the given provider.
pub async fn prepare_document<P>(provider: &P, path: &Path) -> Prepared
where
    P: Provider + Send + Sync,
    P::Error: std::fmt::Display,
{
    if provider.supports_file_upload() {
        return match provider.upload_file(path).await {
            Ok(file) => {
                debug!("Uploaded {} as {}", path.display(), file.name);
                Prepared::Payload(DocumentPayload::File(file))
            }
            Err(e) => Prepared::Skipped(format!("file upload failed: {}", e)),
        };
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return Prepared::Skipped(format!("cannot read file: {}", e)),
    };

    match String::from_utf8(bytes) {
        Ok(text) => Prepared::Payload(DocumentPayload::Text(text)),
        Err(_) => Prepared::Skipped(
            "binary content cannot be inlined for a text-only provider".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_llm::MockProvider;

    #[tokio::test]
    async fn test_prepare_utf8_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.txt");
        std::fs::write(&path, "quarterly summary").unwrap();

        let provider = MockProvider::default();
        match prepare_document(&provider, &path).await {
            Prepared::Payload(DocumentPayload::Text(text)) => {
                assert_eq!(text, "quarterly summary");
            }
            other => panic!("expected text payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_prepare_binary_for_text_only_provider_skips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, [0x25, 0x50, 0x44, 0x46, 0xff, 0xfe]).unwrap();

        let provider = MockProvider::default();
        match prepare_document(&provider, &path).await {
            Prepared::Skipped(reason) => assert!(reason.contains("binary content")),
            other => panic!("expected skip, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_prepare_missing_file_skips() {
        let provider = MockProvider::default();
        let result = prepare_document(&provider, Path::new("/nonexistent/x.txt")).await;
        assert!(matches!(result, Prepared::Skipped(_)));
    }
}
