//! OpenAPI documentation and Swagger UI integration.
//!
//! Serves the encode API description at `/api/openapi.json` with Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::AppContext;

/// OpenAPI documentation for the dashgate API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "dashgate API",
        version = "0.1.0",
        description = "Builds adaptive-streaming transcoding jobs and reports their status",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "/", description = "Default server")
    ),
    paths(
        super::routes_api::index,
        super::routes_api::encode,
        super::routes_api::encode_audio,
        super::routes_api::encode_status,
        super::routes_api::get_profiles,
        super::auth::auth_status,
    ),
    components(
        schemas(
            super::routes_api::IndexResponse,
            super::routes_api::EncodeRequest,
            super::routes_api::EncodeAudioRequest,
            super::routes_api::EncodeResponse,
            super::routes_api::JobStatusResponse,
            super::routes_api::ProfilesResponse,
            super::auth::AuthStatusResponse,
            super::error::ErrorBody,
            OutputFormatSchema,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "encode", description = "Transcoding job endpoints"),
        (name = "auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

// Schema wrappers for core types that don't derive ToSchema

/// Adaptive-streaming output format.
#[derive(utoipa::ToSchema)]
#[schema(as = OutputFormat)]
pub enum OutputFormatSchema {
    #[schema(rename = "dash")]
    Dash,
    #[schema(rename = "hls")]
    Hls,
}

/// Create OpenAPI documentation routes.
pub fn openapi_routes() -> Router<AppContext> {
    Router::new().merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_encode_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/api/upload/encode"));
        assert!(paths.contains(&"/api/upload/encode/audio"));
        assert!(paths.contains(&"/api/upload/encode/status/{job_id}"));
        assert!(paths.contains(&"/api/profiles"));
    }
}
