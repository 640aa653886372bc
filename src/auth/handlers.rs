use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRef, Query, State,
    },
    routing::{get, post},
    Form, Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            CheckEmailQuery, CheckEmailResponse, LoginRequest, RegisterRequest, TokenForm,
            TokenResponse, UserResponse,
        },
        jwt::{AuthUser, JwtKeys},
        password,
        repo_types::{NewUser, User},
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/token", post(issue_token))
        .route("/auth/login", post(login))
        .route("/auth/check-email", get(check_email))
        .route("/auth/me", get(get_me))
}

/// Emails are compared in normalized form everywhere: registration, login
/// and the existence probe must agree on what "the same address" means.
fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Bounds checks for the numeric profile fields. Runs before any store
/// access so a rejected registration leaves nothing behind.
fn validate_profile(payload: &RegisterRequest) -> Result<(), AppError> {
    if let Some(height) = payload.height {
        if !(30.0..=250.0).contains(&height) {
            return Err(AppError::Validation(
                "height must be between 30 and 250 cm".into(),
            ));
        }
    }
    if let Some(weight) = payload.weight {
        if !(10.0..=300.0).contains(&weight) {
            return Err(AppError::Validation(
                "weight must be between 10 and 300 kg".into(),
            ));
        }
    }
    if let Some(target_weight) = payload.target_weight {
        if !(10.0..=300.0).contains(&target_weight) {
            return Err(AppError::Validation(
                "target_weight must be between 10 and 300 kg".into(),
            ));
        }
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    // A body that does not deserialize (out-of-set enum value, wrong type)
    // is a validation failure like any other.
    let Json(mut payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    payload.email = normalize_email(&payload.email);

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("invalid email address".into()));
    }
    validate_profile(&payload)?;

    // Ensure email is not taken
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let hash = password::hash_password(&payload.password)?;

    let user = User::create(
        &state.db,
        NewUser {
            email: &payload.email,
            password_hash: &hash,
            name: payload.name.as_deref(),
            gender: payload.gender.map(|v| v.as_str()),
            height: payload.height,
            weight: payload.weight,
            goal: payload.goal.map(|v| v.as_str()),
            target_weight: payload.target_weight,
            diet: payload.diet.map(|v| v.as_str()),
            experience: payload.experience.map(|v| v.as_str()),
            workout_frequency: payload.workout_frequency.map(|v| v.as_str()),
        },
    )
    .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(UserResponse::from(user)))
}

/// Shared login flow for the form and JSON entry points. Unknown email and
/// wrong password produce the same error; a dummy hash verification runs on
/// the unknown-email path so the two are not separable by latency either.
async fn authenticate(
    state: &AppState,
    email: &str,
    plaintext: &str,
) -> Result<TokenResponse, AppError> {
    let email = normalize_email(email);

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(user) => user,
        None => {
            password::verify_dummy(plaintext);
            warn!(email = %email, "login failed: unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !password::verify_password(plaintext, &user.password_hash) {
        warn!(email = %email, user_id = %user.id, "login failed: invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign(&user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(TokenResponse {
        access_token,
        token_type: "bearer".into(),
    })
}

/// OAuth2-style form login: the form's `username` field carries the email.
#[instrument(skip(state, form))]
pub async fn issue_token(
    State(state): State<AppState>,
    form: Result<Form<TokenForm>, FormRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Form(form) = form.map_err(|e| AppError::Validation(e.body_text()))?;
    let token = authenticate(&state, &form.username, &form.password).await?;
    Ok(Json(token))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let token = authenticate(&state, &payload.email, &payload.password).await?;
    Ok(Json(token))
}

/// Unauthenticated existence probe; "not registered" is an answer, not an
/// error.
#[instrument(skip(state))]
pub async fn check_email(
    State(state): State<AppState>,
    Query(query): Query<CheckEmailQuery>,
) -> Result<Json<CheckEmailResponse>, AppError> {
    let email = normalize_email(&query.email);
    let exists = User::email_exists(&state.db, &email).await?;
    Ok(Json(CheckEmailResponse { exists }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    // The account may have vanished since the token was issued; that is
    // still just "unauthenticated" to the caller.
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "token subject no longer exists");
            AppError::Unauthenticated
        })?;

    Ok(Json(UserResponse::from(user)))
}
