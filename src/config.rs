//! JSON configuration for a generation run.

use crate::error::GenerationError;
use chrono::Utc;
use quire_core::{ComponentTree, Document, ItemCollection, RenderOptions, TraceRecordLevel};
use quire_style::Stylesheet;
use quire_traits::FilesystemResourceProvider;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Parameter holding the RFC 3339 time the document was created.
pub const GENERATED_AT_PARAM: &str = "generatedAt";

/// Settings applied to a new [`Document`].
///
/// ```json
/// {
///   "conformance": "lax",
///   "traceLevel": "warnings",
///   "params": { "title": "Report" },
///   "stylesheet": { "classes": { "note": { "fontSize": 9 } } }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    #[serde(flatten)]
    pub render: RenderOptions,
    pub trace_level: TraceRecordLevel,
    pub performance: bool,
    pub params: ItemCollection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<Stylesheet>,
    /// Fixed prefix for generated component ids instead of a random one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_prefix: Option<String>,
    /// Directory that resource paths are resolved against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_root: Option<PathBuf>,
}

impl GenerationOptions {
    pub fn from_json_str(json: &str) -> Result<Self, GenerationError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GenerationError> {
        let path = path.as_ref();
        log::debug!("Reading generation options from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), GenerationError> {
        if let Some(prefix) = &self.id_prefix {
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(GenerationError::Config(format!(
                    "idPrefix must be non-empty and alphanumeric, got '{}'",
                    prefix
                )));
            }
        }
        Ok(())
    }

    /// Creates a document carrying these settings. The creation time is added
    /// to the parameters unless one is already given.
    pub fn create_document(&self) -> Result<Document, GenerationError> {
        self.validate()?;
        let tree = match &self.id_prefix {
            Some(prefix) => ComponentTree::with_id_prefix(prefix.clone()),
            None => ComponentTree::new(),
        };
        let mut document = Document::with_tree(tree);
        document.set_options(self.render);
        document.set_trace_level(self.trace_level);
        document.set_performance_enabled(self.performance);
        if let Some(stylesheet) = &self.stylesheet {
            document.set_stylesheet(stylesheet.clone());
        }
        if let Some(root) = &self.resource_root {
            document.set_resources(Arc::new(FilesystemResourceProvider::new(root.clone())));
        }

        let params = document.params_mut();
        params.extend(self.params.clone());
        params
            .entry(GENERATED_AT_PARAM)
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::ConformanceMode;

    #[test]
    fn test_defaults_from_empty_object() {
        let options = GenerationOptions::from_json_str("{}").unwrap();
        assert_eq!(options.render, RenderOptions::default());
        assert_eq!(options.trace_level, TraceRecordLevel::Messages);
        assert!(options.stylesheet.is_none());
    }

    #[test]
    fn test_flattened_render_options() {
        let json = r#"{"conformance": "lax", "idPrefix": "doc"}"#;
        let options = GenerationOptions::from_json_str(json).unwrap();
        assert_eq!(options.render.conformance, ConformanceMode::Lax);
        assert_eq!(options.id_prefix.as_deref(), Some("doc"));
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let err = GenerationOptions::from_json_str(r#"{"idPrefix": "a-b"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Config(_)));
    }

    #[test]
    fn test_generated_at_param_is_kept_when_given() {
        let mut options = GenerationOptions::default();
        options.params.insert(GENERATED_AT_PARAM.into(), Value::from("fixed"));
        let document = options.create_document().unwrap();
        assert_eq!(document.params()[GENERATED_AT_PARAM], Value::from("fixed"));
    }
}
