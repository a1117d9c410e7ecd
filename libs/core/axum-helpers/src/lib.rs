//! # Axum Helpers
//!
//! Shared utilities, middleware, and helpers for the UStore Axum services.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT verification and role gating
//! - **[`server`]**: router factory, health endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)
//! - **[`request_info`]**: client ip / user-agent extraction for audit metadata

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod pagination;
pub mod request_info;
pub mod server;

// Re-export auth types
pub use auth::{
    jwt_auth_middleware, optional_jwt_auth_middleware, AuthUser, JwtAuth, JwtClaims, JwtConfig,
    RequireSeller, Role,
};

// Re-export server types
pub use server::{
    create_app, create_production_app, create_router, health_router, shutdown_signal,
    HealthResponse, ShutdownCoordinator,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};

// Re-export the pagination contract
pub use pagination::Pagination;

// Re-export request metadata helpers
pub use request_info::{extract_client_ip, extract_user_agent};
