use crate::context::RequestContext;
use serde::Serialize;
use shortcard_core::LinkRecord;

/// Preview image dimensions (standard Open Graph).
pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

/// Cache-busting version marker appended to every resolved image URL.
///
/// Unfurler caches key on the bare URL, so this value must change
/// whenever the output contract changes (image dimensions, format).
pub const CACHE_BUST_VERSION: &str = "4";

// Fixed product copy; previews are not derived from the record.
const CARD_TITLE: &str = "You've been sent a Shortcard link";
const CARD_DESCRIPTION: &str =
    "Tap through to open the shared destination from your own phone.";
const SITE_NAME: &str = "shortcard.link";
const IMAGE_ALT: &str = "Shortcard link preview";
const IMAGE_MIME: &str = "image/png";

/// A resolved preview image, absolute and cache-busted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewImage {
    pub url: String,
    pub secure_url: String,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type")]
    pub mime_type: &'static str,
    pub alt: &'static str,
}

/// The generic embed format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraphCard {
    pub title: &'static str,
    pub description: &'static str,
    pub site_name: &'static str,
    #[serde(rename = "type")]
    pub card_type: &'static str,
    pub images: Vec<PreviewImage>,
}

/// The square-card embed format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub card: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub domain: &'static str,
    pub images: Vec<PreviewImage>,
}

/// Structured social-preview payload for one link.
///
/// The image is duplicated into both embed sections because the two
/// unfurler families read different keys for the same thing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewCard {
    pub title: &'static str,
    pub description: &'static str,
    pub open_graph: OpenGraphCard,
    pub twitter: SummaryCard,
}

impl PreviewCard {
    /// The resolved image URL, if any.
    pub fn image_url(&self) -> Option<&str> {
        self.open_graph.images.first().map(|i| i.url.as_str())
    }
}

/// Derives the preview payload for a record under the given context.
///
/// Never fails: a missing image, or a relative image with no resolvable
/// host, degrades to an image-less card.
pub fn resolve_preview(record: &LinkRecord, ctx: &RequestContext) -> PreviewCard {
    let images: Vec<PreviewImage> = resolve_image_url(record.image_url.as_deref(), ctx)
        .map(|url| PreviewImage {
            secure_url: url.clone(),
            url,
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
            mime_type: IMAGE_MIME,
            alt: IMAGE_ALT,
        })
        .into_iter()
        .collect();

    PreviewCard {
        title: CARD_TITLE,
        description: CARD_DESCRIPTION,
        open_graph: OpenGraphCard {
            title: CARD_TITLE,
            description: CARD_DESCRIPTION,
            site_name: SITE_NAME,
            card_type: "website",
            images: images.clone(),
        },
        twitter: SummaryCard {
            card: "summary_large_image",
            title: CARD_TITLE,
            description: CARD_DESCRIPTION,
            domain: SITE_NAME,
            images,
        },
    }
}

/// Absolute, cache-busted image URL for a record.
///
/// Already-absolute URLs are used verbatim; anything else is a path under
/// the deployment's own origin.
fn resolve_image_url(image_url: Option<&str>, ctx: &RequestContext) -> Option<String> {
    let raw = image_url?;
    let absolute = if is_absolute(raw) {
        raw.to_string()
    } else {
        format!("{}{}", ctx.origin(), raw)
    };
    Some(format!("{absolute}?v={CACHE_BUST_VERSION}"))
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
