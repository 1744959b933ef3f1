use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// The authenticated caller, resolved from an opaque bearer token.
/// The token itself is kept so logout can revoke exactly this session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Unauthorized("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let row: Option<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT u.id, u.username
            FROM auth_tokens t
            JOIN users u ON u.id = t.user_id
            WHERE t.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&state.pool)
        .await?;

        let (user_id, username) = match row {
            Some(found) => found,
            None => return Err(AppError::Unauthorized("Invalid or revoked token".into())),
        };

        Ok(AuthUser {
            user_id,
            username,
            token: token.to_string(),
        })
    }
}
