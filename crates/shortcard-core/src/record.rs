use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored link record.
///
/// Records are created exactly once and never mutated. Durable records
/// carry a creation timestamp; records reconstructed from a self-contained
/// token do not (the token drops it to stay compact).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Primary key: a durable random ID or a self-contained token.
    pub id: String,
    /// The URL the visitor is redirected to. Always present.
    pub destination_url: String,
    /// Preview image: an absolute external URL or a path under the
    /// public asset root. `None` means an image-less preview.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Set at creation time, durable mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}
