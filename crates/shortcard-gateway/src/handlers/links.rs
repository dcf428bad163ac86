use crate::error::{AppError, Result};
use crate::model::{CreateLinkResponse, LinkResponse};
use crate::state::AppState;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::Redirect;
use axum::Json;
use shortcard_preview::{resolve_preview, PreviewCard, RequestContext};
use shortcard_store::{CreateLink, ImageSource};
use tracing::info;

/// `POST /api/links` — the create-link operation.
///
/// Multipart form fields: `destinationUrl` (required), `file` (optional
/// uploaded image blob), `imageUrl` (optional verbatim asset reference).
/// An uploaded blob takes precedence over a reference.
pub async fn create_link_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CreateLinkResponse>> {
    let mut destination_url = String::new();
    let mut image_reference: Option<String> = None;
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        match field.name().map(str::to_string).as_deref() {
            Some("destinationUrl") => destination_url = field.text().await.map_err(bad_form)?,
            Some("imageUrl") => {
                let reference = field.text().await.map_err(bad_form)?;
                if !reference.is_empty() {
                    image_reference = Some(reference);
                }
            }
            Some("file") => {
                let original_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(bad_form)?;
                if !bytes.is_empty() {
                    upload = Some((original_name, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    let image = match (upload, image_reference) {
        (Some((original_name, bytes)), _) => Some(ImageSource::Upload {
            original_name,
            bytes,
        }),
        (None, Some(reference)) => Some(ImageSource::Reference(reference)),
        (None, None) => None,
    };

    let id = state
        .service()
        .create(CreateLink {
            destination_url,
            image,
        })
        .await?;

    info!(id = %id, "link created");
    Ok(Json(CreateLinkResponse { id: id.to_string() }))
}

/// `GET /api/links/{id}` — the resolve-link operation.
pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>> {
    let record = state.service().resolve(&id).await.ok_or(AppError::NotFound)?;
    Ok(Json(record.into()))
}

/// `GET /api/links/{id}/preview` — social-preview metadata for a link.
pub async fn preview_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PreviewCard>> {
    let record = state.service().resolve(&id).await.ok_or(AppError::NotFound)?;
    let ctx = request_context(&state, &headers);
    Ok(Json(resolve_preview(&record, &ctx)))
}

/// `GET /o/{id}` — redirect to the destination.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let record = state.service().resolve(&id).await.ok_or(AppError::NotFound)?;
    Ok(Redirect::temporary(&record.destination_url))
}

/// Context is assembled here, once, at the boundary; the resolver never
/// reads ambient request state itself.
fn request_context(state: &AppState, headers: &HeaderMap) -> RequestContext {
    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    let forwarded_proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok());
    RequestContext::from_parts(state.public_host(), host, forwarded_proto)
}

fn bad_form(e: MultipartError) -> AppError {
    AppError::Validation(format!("malformed form data: {e}"))
}
