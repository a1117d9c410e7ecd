use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Actor roles recognized by the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Seller,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Seller => "seller",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Parse from the wire representation; unknown roles are rejected
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "seller" => Some(Role::Seller),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Whether this role may modify the catalog
    pub fn can_manage_products(&self) -> bool {
        matches!(self, Role::Seller | Role::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated actor, inserted into request extensions by
/// [`jwt_auth_middleware`]
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| {
                AppError::Unauthorized("Authentication required".to_string()).into_response()
            })
    }
}

/// Extract a bearer token from the Authorization header or the
/// `access_token` cookie
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
        .or_else(|| {
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
                        if parts.len() == 2 && parts[0] == "access_token" {
                            Some(parts[1].to_string())
                        } else {
                            None
                        }
                    })
                })
        })
}

/// JWT authentication middleware.
///
/// Verifies the token signature and expiry, resolves the claims into an
/// [`AuthUser`], and inserts it into request extensions.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_request(&headers).ok_or_else(|| {
        tracing::debug!("No JWT found in Authorization header or cookie");
        AppError::Unauthorized("No token provided".to_string()).into_response()
    })?;

    let claims = auth.verify_token(&token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized("Invalid token".to_string()).into_response()
    })?;

    let id = Uuid::parse_str(&claims.sub).map_err(|_| {
        tracing::debug!("JWT subject is not a valid id: {}", claims.sub);
        AppError::Unauthorized("Invalid token".to_string()).into_response()
    })?;

    let role = Role::parse(&claims.role).ok_or_else(|| {
        tracing::debug!("JWT carries unknown role: {}", claims.role);
        AppError::Unauthorized("Invalid token".to_string()).into_response()
    })?;

    request.extensions_mut().insert(AuthUser {
        id,
        email: claims.email,
        role,
    });

    Ok(next.run(request).await)
}

/// Optional JWT authentication middleware.
///
/// Verifies and resolves the identity when a token is present; requests
/// without a token (or with an unverifiable one) continue anonymously.
/// Routers with a mix of public reads and gated writes layer this once and
/// let extractors enforce per-route requirements.
pub async fn optional_jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token_from_request(&headers) {
        match auth.verify_token(&token) {
            Ok(claims) => {
                let id = Uuid::parse_str(&claims.sub).ok();
                let role = Role::parse(&claims.role);
                if let (Some(id), Some(role)) = (id, role) {
                    request.extensions_mut().insert(AuthUser {
                        id,
                        email: claims.email,
                        role,
                    });
                } else {
                    tracing::debug!("JWT claims carry an invalid subject or role");
                }
            }
            Err(e) => {
                tracing::debug!("Ignoring unverifiable JWT: {}", e);
            }
        }
    }

    next.run(request).await
}

/// Extractor gating catalog write routes: seller or super_admin only.
///
/// Yields 401 for anonymous requests and 403 for authenticated actors
/// without a product-management role.
pub struct RequireSeller(pub AuthUser);

impl<S> FromRequestParts<S> for RequireSeller
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.role.can_manage_products() {
            return Err(
                AppError::Forbidden("Seller or admin role required".to_string()).into_response(),
            );
        }

        Ok(RequireSeller(user))
    }
}
