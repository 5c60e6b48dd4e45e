//! Prompt assembly from the template file
//!
//! The template carries two substitution markers: one for the serialized
//! schema description and one for the document text. When a document is
//! attached as a native file upload instead, the text marker receives a
//! stand-in placeholder.

use crate::error::MinerError;
use std::io::ErrorKind;
use std::path::Path;

/// Marker replaced with the pretty-printed schema JSON
pub const SCHEMA_MARKER: &str = "{{SCHEMA}}";

/// Marker replaced with the document text (or the file placeholder)
pub const TEXT_MARKER: &str = "{{TEXT}}";

/// Stand-in for the text marker when the document travels as a native
/// file upload
pub const FILE_PLACEHOLDER: &str = "[The document is attached as a file upload.]";

/// A loaded prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Load the template from a file.
    ///
    /// A missing template aborts the whole run; it is a precondition for
    /// every document.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MinerError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(template) => Ok(Self { template }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(MinerError::TemplateMissing(path.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Build a template from an in-memory string.
    pub fn from_string(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Substitute both markers and return the final prompt.
    pub fn render(&self, schema_json: &str, document_text: &str) -> String {
        self.template
            .replace(SCHEMA_MARKER, schema_json)
            .replace(TEXT_MARKER, document_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_both_markers() {
        let template = PromptTemplate::from_string(
            "Schema:\n{{SCHEMA}}\n\nDocument:\n{{TEXT}}\n",
        );
        let prompt = template.render("{\"required\": []}", "memo body");

        assert!(prompt.contains("{\"required\": []}"));
        assert!(prompt.contains("memo body"));
        assert!(!prompt.contains(SCHEMA_MARKER));
        assert!(!prompt.contains(TEXT_MARKER));
    }

    #[test]
    fn test_render_with_file_placeholder() {
        let template = PromptTemplate::from_string("{{SCHEMA}} / {{TEXT}}");
        let prompt = template.render("{}", FILE_PLACEHOLDER);
        assert!(prompt.contains(FILE_PLACEHOLDER));
    }

    #[test]
    fn test_load_missing_template() {
        let result = PromptTemplate::load("/nonexistent/prompt.md");
        assert!(matches!(result, Err(MinerError::TemplateMissing(_))));
    }
}
