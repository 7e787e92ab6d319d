//! The `meta` endpoint: instance metadata

use crate::endpoint::Endpoint;
use serde::{Deserialize, Serialize};

/// `meta` — describes the instance the client is talking to.
pub struct Meta;

impl Endpoint for Meta {
    const NAME: &'static str = "meta";
    type Request = MetaRequest;
    type Response = MetaInfo;
}

/// Parameters for `meta`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaRequest {
    /// Whether to include the detailed instance description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<bool>,
}

/// Instance metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaInfo {
    /// Server software version.
    #[serde(default)]
    pub version: String,

    /// Instance display name.
    #[serde(default)]
    pub name: Option<String>,

    /// Canonical URI of the instance.
    #[serde(default)]
    pub uri: String,

    /// Operator-authored description.
    #[serde(default)]
    pub description: Option<String>,

    /// Maximum length of a note body.
    #[serde(default)]
    pub max_note_text_length: Option<u32>,
}
