//! Core types for the Shortcard link service.
//!
//! This crate provides the link record, the identifier sum type, and the
//! codec shared by the store and the HTTP boundary.

pub mod codec;
pub mod error;
pub mod ident;
pub mod record;

pub use error::DecodeError;
pub use ident::{DurableId, LinkId, StatelessToken};
pub use record::LinkRecord;
