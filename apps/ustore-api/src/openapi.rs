//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "UStore API",
        version = "0.1.0",
        description = "E-commerce backend: product catalog and seller activity trail over MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_catalog::ApiDoc),
        (path = "/api/activity", api = domain_activity::ApiDoc)
    ),
    paths(crate::api::users::me),
    components(schemas(crate::api::users::MeResponse)),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Activity", description = "Seller activity audit trail"),
        (name = "Users", description = "Authenticated identity")
    )
)]
pub struct ApiDoc;
