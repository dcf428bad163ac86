use shortcard_store::LinkService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    service: Arc<LinkService>,
    public_host: Option<String>,
}

impl AppState {
    pub fn new(service: Arc<LinkService>, public_host: Option<String>) -> Self {
        Self {
            service,
            public_host,
        }
    }

    pub fn service(&self) -> &LinkService {
        &self.service
    }

    /// Deployment-provided host override for absolute preview URLs.
    pub fn public_host(&self) -> Option<&str> {
        self.public_host.as_deref()
    }
}
