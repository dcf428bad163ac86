use crate::assets::AssetStore;
use crate::error::StoreError;
use crate::repository::Repository;
use jiff::Timestamp;
use shortcard_core::codec;
use shortcard_core::{LinkId, LinkRecord};
use std::sync::Arc;
use thiserror::Error;

/// How created links are persisted.
///
/// The fallback from a failed durable write to a self-contained token is
/// a deliberate policy, chosen here once rather than hidden in a catch-all:
/// `Durable` falls back silently, `SelfContained` never touches storage.
#[derive(Clone)]
pub enum PersistenceStrategy {
    /// Persist to a repository; emit a self-contained token when the
    /// write path is unavailable.
    Durable(Arc<dyn Repository>),
    /// Always emit self-contained tokens. For deployments without any
    /// writable or persistent local storage.
    SelfContained,
}

impl std::fmt::Debug for PersistenceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Durable(_) => f.write_str("Durable"),
            Self::SelfContained => f.write_str("SelfContained"),
        }
    }
}

/// The preview image supplied at creation time.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A raw uploaded blob, copied byte-for-byte into the asset store.
    Upload {
        original_name: Option<String>,
        bytes: Vec<u8>,
    },
    /// A pre-existing asset reference, used verbatim as the image URL.
    Reference(String),
}

/// Parameters for creating a link.
#[derive(Debug, Clone, Default)]
pub struct CreateLink {
    pub destination_url: String,
    pub image: Option<ImageSource>,
}

/// Errors surfaced by [`LinkService::create`].
///
/// Storage unavailability is deliberately not here: it triggers the
/// stateless fallback instead of failing the call.
#[derive(Debug, Clone, Error)]
pub enum CreateError {
    #[error("destination url is required")]
    MissingDestination,
    #[error("failed to store uploaded image: {0}")]
    Asset(#[from] StoreError),
}

/// Link creation and resolution over a persistence strategy.
#[derive(Debug, Clone)]
pub struct LinkService {
    strategy: PersistenceStrategy,
    assets: AssetStore,
}

impl LinkService {
    pub fn new(strategy: PersistenceStrategy, assets: AssetStore) -> Self {
        Self { strategy, assets }
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Creates a link and returns its identifier.
    ///
    /// The only failure modes are input validation and asset-upload I/O.
    /// A failed durable write is absorbed: the record is re-issued as a
    /// self-contained token and the caller never sees a storage error.
    pub async fn create(&self, params: CreateLink) -> Result<LinkId, CreateError> {
        if params.destination_url.is_empty() {
            return Err(CreateError::MissingDestination);
        }

        let id = codec::generate_id();

        let image_url = match params.image {
            None => None,
            Some(ImageSource::Reference(url)) => Some(url),
            Some(ImageSource::Upload {
                original_name,
                bytes,
            }) => Some(
                self.assets
                    .save(&id, original_name.as_deref(), &bytes)
                    .await?,
            ),
        };

        let repository = match &self.strategy {
            PersistenceStrategy::Durable(repository) => repository,
            PersistenceStrategy::SelfContained => {
                let token =
                    codec::encode_stateless(&params.destination_url, image_url.as_deref());
                return Ok(token.into());
            }
        };

        let record = LinkRecord {
            id: id.as_str().to_string(),
            destination_url: params.destination_url.clone(),
            image_url: image_url.clone(),
            created_at: Some(Timestamp::now()),
        };

        match repository.insert(record).await {
            Ok(()) => Ok(id.into()),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "durable store unavailable, issuing self-contained token"
                );
                let token =
                    codec::encode_stateless(&params.destination_url, image_url.as_deref());
                Ok(token.into())
            }
        }
    }

    /// Resolves an identifier to its record.
    ///
    /// An undecodable token, an unknown durable ID, and an unreadable
    /// collection all yield `None`; callers cannot distinguish a link
    /// that never existed from a tampered token.
    pub async fn resolve(&self, raw_id: &str) -> Option<LinkRecord> {
        match LinkId::parse(raw_id) {
            LinkId::SelfContained(token) => match codec::decode_stateless(token.as_str()) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(error = %e, "undecodable token treated as not found");
                    None
                }
            },
            LinkId::Durable(id) => match &self.strategy {
                PersistenceStrategy::Durable(repository) => match repository.get(&id).await {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::debug!(error = %e, id = %id, "store read failed, treating as not found");
                        None
                    }
                },
                PersistenceStrategy::SelfContained => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::InMemoryRepository;
    use async_trait::async_trait;
    use shortcard_core::DurableId;

    /// Repository whose write path is permanently broken, as on a
    /// read-only filesystem.
    struct UnavailableRepository;

    #[async_trait]
    impl Repository for UnavailableRepository {
        async fn insert(&self, _record: LinkRecord) -> crate::error::Result<()> {
            Err(StoreError::Unavailable("read-only filesystem".to_string()))
        }

        async fn get(&self, _id: &DurableId) -> crate::error::Result<Option<LinkRecord>> {
            Err(StoreError::Unavailable("read-only filesystem".to_string()))
        }
    }

    fn durable_service() -> LinkService {
        LinkService::new(
            PersistenceStrategy::Durable(Arc::new(InMemoryRepository::new())),
            AssetStore::new("uploads"),
        )
    }

    fn params(url: &str) -> CreateLink {
        CreateLink {
            destination_url: url.to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn create_then_resolve_round_trips() {
        let service = durable_service();

        let id = service
            .create(params("https://example.com/menu"))
            .await
            .unwrap();
        assert_eq!(id.as_str().len(), 8);

        let record = service.resolve(id.as_str()).await.unwrap();
        assert_eq!(record.destination_url, "https://example.com/menu");
        assert_eq!(record.image_url, None);
        assert!(record.created_at.is_some());
    }

    #[tokio::test]
    async fn create_with_empty_destination_fails() {
        let service = durable_service();

        let err = service.create(params("")).await.unwrap_err();
        assert!(matches!(err, CreateError::MissingDestination));
    }

    #[tokio::test]
    async fn reference_image_is_stored_verbatim() {
        let service = durable_service();

        let id = service
            .create(CreateLink {
                destination_url: "https://a.co".to_string(),
                image: Some(ImageSource::Reference("https://cdn/x.png".to_string())),
            })
            .await
            .unwrap();

        let record = service.resolve(id.as_str()).await.unwrap();
        assert_eq!(record.image_url.as_deref(), Some("https://cdn/x.png"));
    }

    #[tokio::test]
    async fn uploaded_image_lands_under_the_asset_root() {
        let dir = tempfile::tempdir().unwrap();
        let service = LinkService::new(
            PersistenceStrategy::Durable(Arc::new(InMemoryRepository::new())),
            AssetStore::new(dir.path()),
        );

        let id = service
            .create(CreateLink {
                destination_url: "https://a.co".to_string(),
                image: Some(ImageSource::Upload {
                    original_name: Some("photo.png".to_string()),
                    bytes: b"image bytes".to_vec(),
                }),
            })
            .await
            .unwrap();

        let record = service.resolve(id.as_str()).await.unwrap();
        let image_url = record.image_url.unwrap();
        assert_eq!(image_url, format!("/uploads/{}.png", id.as_str()));
        assert!(dir.path().join(format!("{}.png", id.as_str())).exists());
    }

    #[tokio::test]
    async fn broken_store_falls_back_to_self_contained_token() {
        let service = LinkService::new(
            PersistenceStrategy::Durable(Arc::new(UnavailableRepository)),
            AssetStore::new("uploads"),
        );

        let id = service
            .create(CreateLink {
                destination_url: "https://a.co".to_string(),
                image: Some(ImageSource::Reference("https://cdn/x.png".to_string())),
            })
            .await
            .unwrap();

        assert!(id.as_str().starts_with("e_"));

        let record = service.resolve(id.as_str()).await.unwrap();
        assert_eq!(record.destination_url, "https://a.co");
        assert_eq!(record.image_url.as_deref(), Some("https://cdn/x.png"));
    }

    #[tokio::test]
    async fn self_contained_strategy_never_touches_storage() {
        let service = LinkService::new(PersistenceStrategy::SelfContained, AssetStore::new("uploads"));

        let id = service
            .create(params("https://example.com/menu"))
            .await
            .unwrap();
        assert!(id.is_self_contained());

        let record = service.resolve(id.as_str()).await.unwrap();
        assert_eq!(record.destination_url, "https://example.com/menu");
        assert_eq!(record.created_at, None);
    }

    #[tokio::test]
    async fn resolution_is_idempotent() {
        let service = durable_service();
        let id = service
            .create(params("https://example.com"))
            .await
            .unwrap();

        let first = service.resolve(id.as_str()).await;
        let second = service.resolve(id.as_str()).await;
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[tokio::test]
    async fn unknown_id_and_garbage_token_are_uniformly_not_found() {
        let service = durable_service();

        assert!(service.resolve("nexist12").await.is_none());
        assert!(service.resolve("e_not-valid-base64!!").await.is_none());
    }

    #[tokio::test]
    async fn unreadable_store_resolves_as_not_found() {
        let service = LinkService::new(
            PersistenceStrategy::Durable(Arc::new(UnavailableRepository)),
            AssetStore::new("uploads"),
        );

        assert!(service.resolve("aB3dE5gH").await.is_none());
    }
}
