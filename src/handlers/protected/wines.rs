// handlers/protected/wines.rs - Wine create/update with optional picture upload
//
// Accepts the plain JSON body every catalog entity takes, or
// multipart/form-data with the JSON payload in a `data` part and the
// picture in a `file` part.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::header::CONTENT_TYPE,
    Extension,
};
use garde::Validate;

use super::catalog::{create_entry, update_entry};
use crate::database::models::Wine;
use crate::database::Repository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::schemas::{WinePayload, WineView};
use crate::services::CatalogResource;
use crate::state::AppState;
use crate::storage::{checked_filename, upload_picture, PictureUpload, StorageError};

/// Wine payload plus the picture sent alongside it, if any
#[derive(Debug)]
pub struct WineForm {
    pub payload: WinePayload,
    pub picture: Option<PictureUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for WineForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let JsonBody(payload) = JsonBody::<WinePayload>::from_request(req, state).await?;
            return Ok(Self {
                payload,
                picture: None,
            });
        }

        if !content_type.starts_with("multipart/form-data") {
            return Err(ApiError::unsupported_media_type(
                "Expected application/json or multipart/form-data",
            ));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        let mut payload = WinePayload::default();
        let mut picture = None;
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "data" => {
                    let text = field.text().await?;
                    payload = serde_json::from_str(&text)?;
                }
                "file" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    // Browsers send an empty part when no file was chosen
                    if !filename.is_empty() || !bytes.is_empty() {
                        picture = Some(PictureUpload {
                            filename,
                            content_type,
                            bytes,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(Self { payload, picture })
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    form: WineForm,
) -> ApiResult<WineView> {
    let WineForm {
        mut payload,
        picture,
    } = form;

    if let Some(picture) = picture {
        // Reject bad payloads before anything reaches storage
        payload.validate()?;
        let name = Wine::payload_key(&payload).unwrap_or_default().to_string();
        let mut conn = state.db.acquire().await?;
        if Repository::<Wine>::new(&mut *conn).exists(&name).await? {
            return Err(ApiError::conflict(format!("Wine {} already exists", name)));
        }
        drop(conn);

        payload.uploaded_picture = Some(store_picture(&state, picture).await?);
    }

    let view = create_entry::<Wine>(&state.db, &user, payload).await?;
    Ok(ApiResponse::created(view))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(name): Path<String>,
    form: WineForm,
) -> ApiResult<WineView> {
    let WineForm {
        mut payload,
        picture,
    } = form;

    if let Some(picture) = picture {
        let mut conn = state.db.acquire().await?;
        Repository::<Wine>::new(&mut *conn).find_404(&name).await?;
        drop(conn);

        Wine::default_key(&mut payload, &name);
        payload.validate()?;
        payload.uploaded_picture = Some(store_picture(&state, picture).await?);
    }

    let view = update_entry::<Wine>(&state.db, &user, &name, payload).await?;
    Ok(ApiResponse::success(view))
}

async fn store_picture(state: &AppState, picture: PictureUpload) -> Result<String, ApiError> {
    checked_filename(&picture.filename)?;
    let store = state.storage.as_deref().ok_or(StorageError::NotConfigured)?;
    Ok(upload_picture(store, &state.http, picture).await?)
}
