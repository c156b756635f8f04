use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content id keys tried, in order, when picking the embed content id.
pub const CONTENT_ID_PRECEDENCE: &[&str] = &["videoId", "postId", "trackId", "pinId"];

/// Content id for embedding, following [`CONTENT_ID_PRECEDENCE`]; empty if none is present.
#[must_use]
pub fn content_id_for(ids: &BTreeMap<String, String>) -> String {
    CONTENT_ID_PRECEDENCE
        .iter()
        .find_map(|key| ids.get(*key))
        .cloned()
        .unwrap_or_default()
}

/// How embed content is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum EmbedKind {
    #[default]
    Iframe,
}

impl EmbedKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iframe => "iframe",
        }
    }
}

/// Embeddable form of matched content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedData {
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: EmbedKind,
    pub content_id: String,
    pub embed_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<String, Value>>,
}

/// Outcome of parsing one input.
///
/// `platform` is set if and only if `is_valid` is true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub is_valid: bool,
    /// The caller's input, untouched.
    pub original_url: String,
    pub normalized_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    pub platform: Option<String>,
    pub platform_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub ids: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_data: Option<EmbedData>,
}

impl ParseResult {
    /// Unmatched result for an input.
    #[must_use]
    pub fn unmatched(original: &str, prepared: &str) -> Self {
        Self {
            original_url: original.to_string(),
            normalized_url: prepared.to_string(),
            ..Self::default()
        }
    }

    /// Read a boolean metadata flag; missing flags are false.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.metadata.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// The content type discriminator set by the platform.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.metadata.get("contentType").and_then(Value::as_str)
    }

    /// Content id for embedding, following [`CONTENT_ID_PRECEDENCE`].
    #[must_use]
    pub fn embed_content_id(&self) -> String {
        content_id_for(&self.ids)
    }
}
