//! Identifier generation and the self-contained token codec.
//!
//! Durable IDs are opaque random handles; self-contained tokens embed the
//! record itself so a link stays resolvable with no storage at all. The
//! on-the-wire formats are a compatibility contract and must not change:
//!
//! - durable: exactly 8 characters from `[A-Za-z0-9]`
//! - stateless: `e_` + URL-safe unpadded base64 of UTF-8 JSON
//!   `{"d": <destination>, "i": <image or null>}`

use crate::error::DecodeError;
use crate::ident::{DurableId, StatelessToken, STATELESS_MARKER};
use crate::record::LinkRecord;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::Rng;
use serde::{Deserialize, Serialize};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated durable ID.
pub const DURABLE_ID_LEN: usize = 8;

/// Compact token payload. `created_at` is deliberately absent: a
/// self-contained record has no persisted lifetime to date.
#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    #[serde(rename = "d")]
    destination_url: String,
    #[serde(rename = "i", default)]
    image_url: Option<String>,
}

/// Generates a random 8-character durable ID.
///
/// Drawn uniformly with replacement from a 62-character alphabet, giving a
/// 62^8 keyspace. No uniqueness check is performed against existing
/// records; collisions are accepted as negligible.
pub fn generate_id() -> DurableId {
    let mut rng = rand::thread_rng();
    let code: String = (0..DURABLE_ID_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    DurableId::new_unchecked(code)
}

/// Encodes a destination and optional image into a self-contained token.
///
/// The token is itself the identifier: holding it is the only thing needed
/// to resolve the link later.
pub fn encode_stateless(destination_url: &str, image_url: Option<&str>) -> StatelessToken {
    let payload = TokenPayload {
        destination_url: destination_url.to_string(),
        image_url: image_url.map(str::to_string),
    };
    // Serializing two plain string fields cannot fail.
    let json = serde_json::to_string(&payload).expect("token payload serialization");
    let encoded = URL_SAFE_NO_PAD.encode(json.as_bytes());
    StatelessToken::new_unchecked(format!("{STATELESS_MARKER}{encoded}"))
}

/// Decodes a self-contained token back into a record.
///
/// Pure and I/O-free; safe on attacker-controlled input. The record's `id`
/// is the token itself and `created_at` is always `None`.
pub fn decode_stateless(raw: &str) -> Result<LinkRecord, DecodeError> {
    let payload = raw
        .strip_prefix(STATELESS_MARKER)
        .ok_or(DecodeError::MissingMarker)?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;

    let json =
        String::from_utf8(bytes).map_err(|e| DecodeError::InvalidPayload(e.to_string()))?;

    let payload: TokenPayload =
        serde_json::from_str(&json).map_err(|e| DecodeError::InvalidPayload(e.to_string()))?;

    if payload.destination_url.is_empty() {
        return Err(DecodeError::MissingDestination);
    }

    Ok(LinkRecord {
        id: raw.to_string(),
        destination_url: payload.destination_url,
        image_url: payload.image_url,
        created_at: None,
    })
}
