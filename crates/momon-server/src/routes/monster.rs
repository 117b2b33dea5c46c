//! Monster Routes
//!
//! HTTP handlers that validate the request boundary and delegate to
//! MonsterService. Failures are deliberately coarse: 400 for bad input,
//! 404 for a missing monster, 500 for everything else.

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};

use momon::{DomainError, ImageUpload};

use crate::models::{CreateMonsterForm, MonsterResponse};
use crate::AppState;

pub const DEVICE_ID_HEADER: &str = "X-Device-ID";
const MAX_DEVICE_ID_CHARS: usize = 100;
const MAX_EMOTION_TEXT_CHARS: usize = 100;

type ApiError = (StatusCode, String);

fn bad_request(message: impl Into<String>) -> ApiError {
    let message = message.into();
    tracing::warn!("   ❌ {}", message);
    (StatusCode::BAD_REQUEST, message)
}

/// Map domain errors onto the coarse HTTP statuses
fn error_response(err: DomainError) -> ApiError {
    match err {
        DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        _ => {
            tracing::error!("   ❌ Internal failure: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

fn device_id(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(DEVICE_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    if value.is_empty() {
        return Err(bad_request("Missing X-Device-ID header"));
    }

    Ok(value.to_string())
}

/// Device id for a write; must fit the identity column
fn creator_device_id(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = device_id(headers)?;
    if value.chars().count() > MAX_DEVICE_ID_CHARS {
        return Err(bad_request("X-Device-ID header is too long"));
    }

    Ok(value)
}

fn validate_image(image: Option<ImageUpload>) -> Result<ImageUpload, ApiError> {
    match image {
        Some(image) if !image.is_empty() => Ok(image),
        _ => Err(bad_request("Missing or empty image")),
    }
}

fn validate_emotion_text(text: Option<String>) -> Result<String, ApiError> {
    let text = match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(bad_request("Missing emotion text")),
    };

    let length = text.chars().count();
    if length > MAX_EMOTION_TEXT_CHARS {
        return Err(bad_request(format!(
            "Emotion text too long: {length} characters"
        )));
    }

    Ok(text)
}

/// Pull the `image` and `text` parts out of the multipart body
async fn read_form(
    mut multipart: Multipart,
) -> Result<(Option<ImageUpload>, Option<String>), ApiError> {
    let mut image = None;
    let mut text = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read image: {e}")))?;

                let mut upload = ImageUpload::new(bytes.to_vec());
                upload.file_name = file_name;
                upload.content_type = content_type;
                image = Some(upload);
            }
            Some("text") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read text: {e}")))?;
                text = Some(value);
            }
            _ => {}
        }
    }

    Ok((image, text))
}

/// Create a monster from a photo and an emotion text
#[utoipa::path(
    post,
    path = "/api/v1/monsters",
    params(
        ("X-Device-ID" = String, Header, description = "Pseudonymous device identifier")
    ),
    request_body(content = CreateMonsterForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Monster created", body = MonsterResponse),
        (status = 400, description = "Missing header, empty image, or invalid text"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Monster"
)]
pub async fn create_monster(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<MonsterResponse>, ApiError> {
    tracing::info!("📥 POST /api/v1/monsters");

    let device_id = creator_device_id(&headers)?;
    let (image, text) = read_form(multipart).await?;
    let image = validate_image(image)?;
    let emotion_text = validate_emotion_text(text)?;

    let monster = state
        .monster_service
        .create_monster(&device_id, image, &emotion_text)
        .await
        .map_err(error_response)?;

    tracing::info!("   ✅ Monster created: {}", monster.id);
    Ok(Json(monster.into()))
}

/// List the caller's monsters, newest first
#[utoipa::path(
    get,
    path = "/api/v1/monsters",
    params(
        ("X-Device-ID" = String, Header, description = "Pseudonymous device identifier")
    ),
    responses(
        (status = 200, description = "Monsters owned by the device", body = Vec<MonsterResponse>),
        (status = 400, description = "Missing X-Device-ID header"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Monster"
)]
pub async fn list_monsters(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<MonsterResponse>>, ApiError> {
    tracing::info!("📥 GET /api/v1/monsters");

    let device_id = device_id(&headers)?;
    let monsters = state
        .monster_service
        .list_monsters(&device_id)
        .await
        .map_err(error_response)?;

    tracing::info!("   ✅ Returning {} monsters", monsters.len());
    Ok(Json(monsters.into_iter().map(Into::into).collect()))
}

/// Get a monster by ID
#[utoipa::path(
    get,
    path = "/api/v1/monsters/{id}",
    params(
        ("id" = i64, Path, description = "Monster ID")
    ),
    responses(
        (status = 200, description = "Monster found", body = MonsterResponse),
        (status = 404, description = "Monster not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Monster"
)]
pub async fn get_monster(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MonsterResponse>, ApiError> {
    tracing::info!("📥 GET /api/v1/monsters/{}", id);

    let monster = state
        .monster_service
        .get_monster(id)
        .await
        .map_err(error_response)?;

    Ok(Json(monster.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/monsters", get(list_monsters).post(create_monster))
        .route("/api/v1/monsters/:id", get(get_monster))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(device_id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(DEVICE_ID_HEADER, HeaderValue::from_str(device_id).unwrap());
        headers
    }

    #[test]
    fn test_device_id_required() {
        let err = device_id(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let err = device_id(&headers_with("   ")).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_device_id_header_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("x-device-id", HeaderValue::from_static("abc-123"));
        assert_eq!(device_id(&headers).unwrap(), "abc-123");
    }

    #[test]
    fn test_device_id_too_long_only_rejected_on_create() {
        let headers = headers_with(&"d".repeat(101));

        let err = creator_device_id(&headers).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        // Reads accept it; an unknown device just has no monsters
        assert_eq!(device_id(&headers).unwrap().len(), 101);
        assert!(creator_device_id(&headers_with(&"d".repeat(100))).is_ok());
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(validate_image(None).is_err());
        assert!(validate_image(Some(ImageUpload::new(Vec::new()))).is_err());
        assert!(validate_image(Some(ImageUpload::new(vec![1]))).is_ok());
    }

    #[test]
    fn test_emotion_text_bounds() {
        assert!(validate_emotion_text(None).is_err());
        assert!(validate_emotion_text(Some(" \n ".to_string())).is_err());
        assert!(validate_emotion_text(Some("a".to_string())).is_ok());

        // Counted in characters, not bytes
        let korean = "행".repeat(100);
        assert_eq!(validate_emotion_text(Some(korean.clone())).unwrap(), korean);
        assert!(validate_emotion_text(Some("행".repeat(101))).is_err());
    }

    #[test]
    fn test_error_mapping_is_coarse() {
        assert_eq!(
            error_response(DomainError::not_found("Monster", 1)).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(DomainError::Generation("quota".to_string())).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let (status, body) = error_response(DomainError::upload("Failed", "HTTP 404"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("404"));
    }
}
