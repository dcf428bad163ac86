use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, get_link_handler, health_handler, preview_handler, redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        let uploads = ServeDir::new(state.service().assets().upload_dir());

        Router::new()
            .route("/health", get(health_handler))
            .route("/api/links", post(create_link_handler))
            .route("/api/links/{id}", get(get_link_handler))
            .route("/api/links/{id}/preview", get(preview_handler))
            .route("/o/{id}", get(redirect_handler))
            .nest_service("/uploads", uploads)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use shortcard_store::{AssetStore, InMemoryRepository, LinkService, PersistenceStrategy};
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "test-boundary";

    fn test_router(upload_dir: &std::path::Path, strategy: PersistenceStrategy) -> Router {
        let service = LinkService::new(strategy, AssetStore::new(upload_dir));
        App::router(AppState::new(Arc::new(service), None))
    }

    fn durable_router(upload_dir: &std::path::Path) -> Router {
        test_router(
            upload_dir,
            PersistenceStrategy::Durable(Arc::new(InMemoryRepository::new())),
        )
    }

    fn form_body(fields: &[(&str, &str)]) -> Body {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Body::from(body)
    }

    fn create_request(fields: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/links")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(form_body(fields))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let router = durable_router(dir.path());

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_resolve_and_redirect() {
        let dir = tempfile::tempdir().unwrap();
        let router = durable_router(dir.path());

        let response = router
            .clone()
            .oneshot(create_request(&[(
                "destinationUrl",
                "https://example.com/menu",
            )]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let id = json_body(response).await["id"].as_str().unwrap().to_string();
        assert_eq!(id.len(), 8);

        let response = router
            .clone()
            .oneshot(
                Request::get(format!("/api/links/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["destinationUrl"], "https://example.com/menu");
        assert!(body["imageUrl"].is_null());

        let response = router
            .oneshot(
                Request::get(format!("/o/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/menu"
        );
    }

    #[tokio::test]
    async fn create_without_destination_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let router = durable_router(dir.path());

        let response = router.oneshot(create_request(&[])).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("destination"));
    }

    #[tokio::test]
    async fn unknown_link_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let router = durable_router(dir.path());

        for uri in ["/api/links/nexist12", "/api/links/e_garbage!!/preview"] {
            let response = router
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
        }
    }

    #[tokio::test]
    async fn preview_resolves_relative_image_against_the_request_host() {
        let dir = tempfile::tempdir().unwrap();
        let router = durable_router(dir.path());

        let response = router
            .clone()
            .oneshot(create_request(&[
                ("destinationUrl", "https://example.com/menu"),
                ("imageUrl", "/uploads/abc.jpg"),
            ]))
            .await
            .unwrap();
        let id = json_body(response).await["id"].as_str().unwrap().to_string();

        let response = router
            .oneshot(
                Request::get(format!("/api/links/{id}/preview"))
                    .header(header::HOST, "shop.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(
            body["open_graph"]["images"][0]["url"],
            "https://shop.example/uploads/abc.jpg?v=4"
        );
        assert_eq!(body["twitter"]["card"], "summary_large_image");
    }

    #[tokio::test]
    async fn stateless_backend_issues_resolvable_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(dir.path(), PersistenceStrategy::SelfContained);

        let response = router
            .clone()
            .oneshot(create_request(&[("destinationUrl", "https://a.co")]))
            .await
            .unwrap();
        let id = json_body(response).await["id"].as_str().unwrap().to_string();
        assert!(id.starts_with("e_"));

        let response = router
            .oneshot(
                Request::get(format!("/api/links/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["destinationUrl"], "https://a.co");
    }
}
