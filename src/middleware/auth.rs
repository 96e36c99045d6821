use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

/// The authenticated candidate, available to handlers as an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCandidate {
    pub id: Uuid,
}

fn bearer_candidate(req: &Request, secret: &str) -> Result<AuthCandidate, Error> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(Error::Unauthorized("Missing authorization header".into()));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(Error::Unauthorized("Malformed authorization header".into()));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(Error::Unauthorized("Unsupported authorization scheme".into()));
    };

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token.trim(),
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| Error::Unauthorized("Invalid or expired token".into()))?;

    let id = Uuid::parse_str(&data.claims.sub)
        .map_err(|_| Error::Unauthorized("Token subject is not a candidate id".into()))?;
    Ok(AuthCandidate { id })
}

pub async fn require_candidate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match bearer_candidate(&req, &state.config.jwt_secret) {
        Ok(candidate) => {
            req.extensions_mut().insert(candidate);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(error = %err, path = %req.uri().path(), "rejected request");
            err.into_response()
        }
    }
}
