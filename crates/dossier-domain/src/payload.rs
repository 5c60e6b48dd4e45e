//! Document payloads handed from the preparer to a provider adapter

/// Handle to a file uploaded natively to a multimodal provider.
///
/// Opaque to everything except the provider that produced it; the miner
/// only threads it back into the same provider's generate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Provider-assigned resource name (used for readiness polling)
    pub name: String,

    /// URI referenced from the generation request
    pub uri: String,

    /// MIME type declared at upload time
    pub mime_type: String,
}

/// What the document preparer produced for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPayload {
    /// UTF-8 text, inlined into the prompt for text-only providers
    Text(String),

    /// Native uploaded-file handle for multimodal providers; the prompt
    /// carries a placeholder marker instead of the document body
    File(UploadedFile),
}

impl DocumentPayload {
    /// The inline text, when this payload is text.
    pub fn text(&self) -> Option<&str> {
        match self {
            DocumentPayload::Text(text) => Some(text),
            DocumentPayload::File(_) => None,
        }
    }

    /// The uploaded-file handle, when this payload is a native upload.
    pub fn file(&self) -> Option<&UploadedFile> {
        match self {
            DocumentPayload::Text(_) => None,
            DocumentPayload::File(file) => Some(file),
        }
    }
}
