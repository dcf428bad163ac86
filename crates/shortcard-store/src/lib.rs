//! Durable link storage and the create/resolve service.
//!
//! This crate provides the repository trait with its file-backed and
//! in-memory implementations, the public asset store for uploaded preview
//! images, and the `LinkService` that wires persistence strategy, codec
//! fallback, and resolution together.

pub mod assets;
pub mod error;
pub mod repository;
pub mod service;

pub use assets::AssetStore;
pub use error::StoreError;
pub use repository::{file::JsonFileRepository, memory::InMemoryRepository, Repository};
pub use service::{CreateError, CreateLink, ImageSource, LinkService, PersistenceStrategy};
