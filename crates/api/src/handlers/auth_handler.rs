//! Signup and login handlers.

use std::borrow::Cow;

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use common::{AppError, AppResult};
use domain::{is_valid_level, NewUser, UserResponse, MIN_PASSWORD_LENGTH};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

const LEVEL_MESSAGE: &str = "Level must be between 1 and 4";
const PASSWORD_MESSAGE: &str = "Password must be at least 8 characters long";

/// Registration request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    #[serde(default)]
    #[schema(example = "Mona Ali")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "mona@example.com")]
    pub email: String,
    #[schema(example = "female")]
    pub gender: Option<String>,
    /// Academic level, number or numeric string
    #[schema(value_type = Option<i32>, example = 2)]
    pub level: Option<Value>,
    #[serde(default)]
    #[schema(example = "password123")]
    pub password: String,
}

impl SignupRequest {
    fn parsed_level(&self) -> Result<Option<i32>, &'static str> {
        match &self.level {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .filter(|n| is_valid_level(*n))
                .map(Some)
                .ok_or(LEVEL_MESSAGE),
            Some(Value::String(s)) => parse_level(s).map(Some).map_err(|_| LEVEL_MESSAGE),
            Some(_) => Err(LEVEL_MESSAGE),
        }
    }
}

/// Checks run in order and stop at the first failure.
impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let failure = if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            Some(("name", "required", "Name, email, and password are required"))
        } else if !self.email.validate_email() {
            Some(("email", "email", "Invalid email format"))
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            Some(("password", "length", PASSWORD_MESSAGE))
        } else if let Err(message) = self.parsed_level() {
            Some(("level", "range", message))
        } else {
            None
        };

        match failure {
            None => Ok(()),
            Some((field, code, message)) => {
                let mut error = ValidationError::new(code);
                error.message = Some(Cow::Borrowed(message));
                let mut errors = ValidationErrors::new();
                errors.add(field, error);
                Err(errors)
            }
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    #[schema(example = "mona@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Message plus the affected user
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserResponse,
}

/// Create signup and login routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Register a new student account
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Accounts",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Registration successful", body = UserEnvelope),
        (status = 400, description = "Validation error or email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserEnvelope>)> {
    let level = payload.parsed_level().map_err(AppError::validation)?;

    let new_user = NewUser {
        name: payload.name,
        email: payload.email,
        gender: payload.gender.filter(|g| !g.is_empty()),
        level,
        password: payload.password,
    };

    let user = state.users.signup(new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            message: "Registration successful".to_string(),
            user: UserResponse::from(user),
        }),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserEnvelope),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<UserEnvelope>> {
    let user = state.users.login(&payload.email, &payload.password).await?;

    Ok(Json(UserEnvelope {
        message: "Login successful".to_string(),
        user: UserResponse::from(user),
    }))
}

/// Parse a textual level in the accepted range.
pub(crate) fn parse_level(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|level| is_valid_level(*level))
        .ok_or_else(|| AppError::validation(LEVEL_MESSAGE))
}

/// Reject passwords shorter than the minimum length.
pub(crate) fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(PASSWORD_MESSAGE));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> SignupRequest {
        serde_json::from_value(body).unwrap()
    }

    fn first_error(req: &SignupRequest) -> Option<String> {
        req.validate().err().map(|errors| {
            errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_default()
        })
    }

    #[test]
    fn test_signup_checks_run_in_order() {
        let missing = request(json!({"email": "bad", "password": "short"}));
        assert_eq!(
            first_error(&missing).as_deref(),
            Some("Name, email, and password are required")
        );

        let bad_email = request(json!({"name": "Mona", "email": "bad", "password": "short"}));
        assert_eq!(first_error(&bad_email).as_deref(), Some("Invalid email format"));

        let short = request(json!({
            "name": "Mona", "email": "mona@example.com", "password": "short", "level": 9
        }));
        assert_eq!(first_error(&short).as_deref(), Some(PASSWORD_MESSAGE));

        let level = request(json!({
            "name": "Mona", "email": "mona@example.com", "password": "password123", "level": 9
        }));
        assert_eq!(first_error(&level).as_deref(), Some(LEVEL_MESSAGE));
    }

    #[test]
    fn test_level_accepts_numbers_and_numeric_strings() {
        let numeric = request(json!({"level": 3}));
        assert_eq!(numeric.parsed_level(), Ok(Some(3)));

        let text = request(json!({"level": "2"}));
        assert_eq!(text.parsed_level(), Ok(Some(2)));

        let absent = request(json!({"level": null}));
        assert_eq!(absent.parsed_level(), Ok(None));

        let zero = request(json!({"level": 0}));
        assert!(zero.parsed_level().is_err());
    }

    #[test]
    fn test_parse_level_and_password() {
        assert_eq!(parse_level(" 4 ").unwrap(), 4);
        assert!(parse_level("5").is_err());
        assert!(parse_level("two").is_err());
        assert!(check_password("12345678").is_ok());
        assert!(check_password("1234567").is_err());
    }
}
