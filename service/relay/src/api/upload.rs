use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::{error::ApiError, state::AppState, storage::build_metadata};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub metadata_uri: String,
}

/// Runs the metadata pipeline: store the image, store a metadata
/// document referencing it, pin the result to the permanence mirror.
pub async fn upload_artwork(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut title: Option<String> = None;
    let mut artist: Option<String> = None;
    let mut description = String::new();
    let mut age: Option<u32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("malformed multipart body"))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::bad_request("failed to read file field"))?;
                file = Some((bytes.to_vec(), content_type));
            }
            Some("title") => title = Some(read_text(field).await?),
            Some("artist") => artist = Some(read_text(field).await?),
            Some("description") => description = read_text(field).await?,
            Some("age") => {
                let text = read_text(field).await?;
                if !text.is_empty() {
                    age = Some(
                        text.parse()
                            .map_err(|_| ApiError::bad_request("age must be a number"))?,
                    );
                }
            }
            _ => {}
        }
    }

    let (image, content_type) = file.ok_or_else(|| ApiError::bad_request("missing file"))?;
    let title = title.ok_or_else(|| ApiError::bad_request("missing title"))?;
    let artist = artist.ok_or_else(|| ApiError::bad_request("missing artist"))?;

    let image_uri = state.storage.store_image(image, &content_type).await?;
    let metadata = build_metadata(&title, &artist, &description, &image_uri, age);
    let metadata_uri = state.storage.store_metadata(&metadata).await?;

    if let Some(bundle_tx) = state.storage.mirror(&metadata_uri).await? {
        tracing::info!(%metadata_uri, %bundle_tx, "metadata mirrored");
    }

    Ok(Json(UploadResponse {
        success: true,
        metadata_uri,
    }))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|_| ApiError::bad_request("malformed multipart field"))
}
