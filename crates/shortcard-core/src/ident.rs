use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Marker prefix carried by every self-contained token.
///
/// Durable IDs are drawn from `[A-Za-z0-9]` only, so no durable ID can
/// start with `e_` and the two kinds are disjoint by inspection.
pub const STATELESS_MARKER: &str = "e_";

/// A short random identifier that requires a store lookup to resolve.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DurableId(String);

impl DurableId {
    /// Wraps a code produced by a trusted generator.
    pub(crate) fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A self-contained identifier embedding the whole record, marker included.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatelessToken(String);

impl StatelessToken {
    pub(crate) fn new_unchecked(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base64 payload after the marker.
    pub fn payload(&self) -> &str {
        &self.0[STATELESS_MARKER.len()..]
    }
}

/// A link identifier, classified once at the boundary.
///
/// Callers match on the variant instead of re-checking the marker prefix
/// at every call site.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkId {
    /// Resolvable only through the durable store.
    Durable(DurableId),
    /// Resolvable by decoding, no store involved.
    SelfContained(StatelessToken),
}

impl LinkId {
    /// Classifies a raw identifier string by its shape.
    ///
    /// Classification is infallible: anything without the stateless marker
    /// is treated as a durable ID candidate, and an unknown candidate
    /// simply misses in the store later.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.starts_with(STATELESS_MARKER) {
            Self::SelfContained(StatelessToken(raw))
        } else {
            Self::Durable(DurableId(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LinkId::Durable(id) => id.as_str(),
            LinkId::SelfContained(token) => token.as_str(),
        }
    }

    /// Whether this identifier resolves without any store lookup.
    pub fn is_self_contained(&self) -> bool {
        matches!(self, LinkId::SelfContained(_))
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for DurableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for StatelessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DurableId> for LinkId {
    fn from(id: DurableId) -> Self {
        Self::Durable(id)
    }
}

impl From<StatelessToken> for LinkId {
    fn from(token: StatelessToken) -> Self {
        Self::SelfContained(token)
    }
}
