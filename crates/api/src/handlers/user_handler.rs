//! Profile and favorites handlers.

use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartError},
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::{Store, UserChanges, UserProfile, UserResponse};

use super::auth_handler::{check_password, parse_level, UserEnvelope};
use crate::state::AppState;
use crate::uploads::UploadStore;

/// Multipart form accepted by `PUT /update-user` (documentation only)
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UpdateUserForm {
    /// Account to update
    #[schema(example = "mona@example.com")]
    email: String,
    name: Option<String>,
    gender: Option<String>,
    /// Academic level (1-4)
    level: Option<i32>,
    /// New password (at least 8 characters)
    password: Option<String>,
    /// Image file
    #[schema(value_type = Option<String>, format = Binary)]
    profile_picture: Option<Vec<u8>>,
}

/// Create `/api/users` routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/:email", get(get_profile))
        .route("/:email/favorites", get(list_favorites))
}

/// Create the multipart profile update route.
///
/// `body_limit` must leave room for the form fields around the file.
pub fn profile_update_routes(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/update-user", put(update_user))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// Get a user's public profile
#[utoipa::path(
    get,
    path = "/api/users/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "Account email")
    ),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let user = state.users.get_user_by_email(&email).await?;
    Ok(Json(UserProfile::from(user)))
}

/// List a user's favorite stores
#[utoipa::path(
    get,
    path = "/api/users/{email}/favorites",
    tag = "Users",
    params(
        ("email" = String, Path, description = "Account email")
    ),
    responses(
        (status = 200, description = "Favorite stores (empty for unknown users)", body = Vec<Store>)
    )
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Store>>> {
    let ids = state.users.favorite_store_ids(&email).await?;
    if ids.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let stores = state.catalog.stores_by_ids(ids).await?;
    Ok(Json(stores))
}

/// Update profile fields and optionally replace the profile picture
#[utoipa::path(
    put,
    path = "/update-user",
    tag = "Users",
    request_body(content = UpdateUserForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "User updated successfully", body = UserEnvelope),
        (status = 400, description = "Missing email, invalid field or nothing to update"),
        (status = 404, description = "User not found"),
        (status = 413, description = "Profile picture too large")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<UserEnvelope>> {
    let form = ProfileForm::read(multipart, state.uploads.max_bytes()).await?;

    let email = form
        .email
        .ok_or_else(|| AppError::validation("Email is required"))?;
    let mut changes = form.changes;

    let new_picture = match form.picture {
        Some(picture) => {
            let path = state
                .uploads
                .save_image(
                    picture.file_name.as_deref(),
                    picture.content_type.as_deref(),
                    &picture.bytes,
                )
                .await?;
            changes.profile_picture = Some(path.clone());
            Some(path)
        }
        None => None,
    };

    let update = match state.users.update_user(&email, changes).await {
        Ok(update) => update,
        Err(e) => {
            if let Some(path) = &new_picture {
                state.uploads.remove(path).await;
            }
            return Err(e);
        }
    };

    if let Some(old) = update.replaced_picture {
        if new_picture.as_deref() != Some(old.as_str()) {
            state.uploads.remove(&old).await;
        }
    }

    tracing::info!(user_id = update.user.id, "Profile updated");

    Ok(Json(UserEnvelope {
        message: "User updated successfully".to_string(),
        user: UserResponse::from(update.user),
    }))
}

/// Uploaded file held in memory until the form is validated.
struct PictureUpload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// Parsed `update-user` form; empty text fields are treated as absent.
#[derive(Default)]
struct ProfileForm {
    email: Option<String>,
    changes: UserChanges,
    picture: Option<PictureUpload>,
}

impl ProfileForm {
    async fn read(mut multipart: Multipart, max_bytes: usize) -> AppResult<Self> {
        let mut form = Self::default();
        let to_app_error = |e| multipart_error(e, max_bytes);

        while let Some(field) = multipart.next_field().await.map_err(to_app_error)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                "profile_picture" => {
                    let content_type = field.content_type().map(str::to_owned);
                    let file_name = field.file_name().map(str::to_owned);
                    let bytes = field.bytes().await.map_err(to_app_error)?;
                    if bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
                        continue;
                    }
                    UploadStore::check_image_type(content_type.as_deref())?;
                    if bytes.len() > max_bytes {
                        return Err(AppError::PayloadTooLarge(max_bytes));
                    }
                    form.picture = Some(PictureUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                "email" => form.email = text(field).await.map_err(to_app_error)?,
                "name" => form.changes.name = text(field).await.map_err(to_app_error)?,
                "gender" => form.changes.gender = text(field).await.map_err(to_app_error)?,
                "level" => {
                    form.changes.level = match text(field).await.map_err(to_app_error)? {
                        Some(raw) => Some(parse_level(&raw)?),
                        None => None,
                    }
                }
                "password" => {
                    if let Some(password) = text(field).await.map_err(to_app_error)? {
                        check_password(&password)?;
                        form.changes.password = Some(password);
                    }
                }
                other => tracing::debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}

async fn text(field: Field<'_>) -> Result<Option<String>, MultipartError> {
    let value = field.text().await?;
    Ok(Some(value).filter(|v| !v.is_empty()))
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(max_bytes)
    } else {
        AppError::bad_request(err.body_text())
    }
}
