//! OpenAPI documentation.

use axum::Json;
use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FileHub API",
        version = "0.1.0",
        description = "Upload a file to the blob store and list the most recent upload records."
    ),
    paths(
        handlers::uploads::list_recent,
        handlers::uploads::upload_file,
        handlers::health::health,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::uploads::ListResponse,
        handlers::uploads::UploadResponse,
        filehub_core::UploadRecord,
    )),
    tags(
        (name = "uploads", description = "Upload and listing endpoint"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI spec consumed by the RapiDoc UI.
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
