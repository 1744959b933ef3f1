use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::DbPool,
    dto::auth::{LoginRequest, RegisterRequest, TokenResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
};

pub async fn register_user(
    pool: &DbPool,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<TokenResponse>> {
    let RegisterRequest {
        username,
        email,
        password,
        password_confirm,
    } = payload;

    if password != password_confirm {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }

    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
        .bind(username.as_str())
        .fetch_optional(pool)
        .await?;

    if exist.is_some() {
        return Err(AppError::Validation(
            "Username is already taken".to_string(),
        ));
    }

    let password_hash = hash_password(&password)?;
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(username.as_str())
        .bind(email.as_str())
        .bind(password_hash)
        .execute(pool)
        .await?;

    let token = issue_token(pool, id).await?;

    if let Err(err) = log_audit(
        pool,
        Some(id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "user_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "User created",
        TokenResponse {
            token,
            user_id: id,
            username,
        },
        None,
    ))
}

pub async fn login_user(
    pool: &DbPool,
    payload: LoginRequest,
) -> AppResult<ApiResponse<TokenResponse>> {
    let LoginRequest { username, password } = payload;

    let row: Option<(Uuid, String)> =
        sqlx::query_as("SELECT id, password_hash FROM users WHERE username = $1")
            .bind(username.as_str())
            .fetch_optional(pool)
            .await?;

    // Unknown user and wrong password are indistinguishable to the caller.
    let (user_id, password_hash) = match row {
        Some(found) => found,
        None => {
            return Err(AppError::Unauthorized(
                "Invalid username or password".into(),
            ));
        }
    };

    let parsed_hash = PasswordHash::new(&password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized(
            "Invalid username or password".into(),
        ));
    }

    // Every login gets its own token row, so sessions revoke independently.
    let token = issue_token(pool, user_id).await?;

    if let Err(err) = log_audit(
        pool,
        Some(user_id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Logged in",
        TokenResponse {
            token,
            user_id,
            username,
        },
        Some(Meta::empty()),
    ))
}

pub async fn logout_user(
    pool: &DbPool,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    sqlx::query("DELETE FROM auth_tokens WHERE token = $1")
        .bind(user.token.as_str())
        .execute(pool)
        .await?;

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "user_logout",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.user_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

// Opaque token material: two v4 UUIDs hex-concatenated (64 chars).
async fn issue_token(pool: &DbPool, user_id: Uuid) -> AppResult<String> {
    let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());

    sqlx::query("INSERT INTO auth_tokens (token, user_id) VALUES ($1, $2)")
        .bind(token.as_str())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(token)
}
