//! Social-preview metadata resolution.
//!
//! Turns a link record plus ambient request context into the absolute,
//! cache-busted image URL and the structured card payload that
//! link-unfurling clients consume.

pub mod card;
pub mod context;

pub use card::{resolve_preview, OpenGraphCard, PreviewCard, PreviewImage, SummaryCard};
pub use context::RequestContext;
