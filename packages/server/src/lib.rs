pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Startup Directory API",
        version = "1.0.0",
        description = "Companies, categories, bookmarks, comments and job applications, with company comparison by revenue, headcount and applicants"
    ),
    tags(
        (name = "Users", description = "Registration, login and profiles"),
        (name = "Companies", description = "Company CRUD operations"),
        (name = "Categories", description = "Company categories"),
        (name = "Bookmarks", description = "Bookmarked companies of a user"),
        (name = "Comments", description = "Comments on companies"),
        (name = "Applications", description = "Job applications"),
        (name = "Comparison", description = "Ranked company comparison"),
        (name = "Main", description = "Company browsing with sort and search"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn api_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi()).nest("/api", routes::api_routes())
}

/// The OpenAPI document served at `/api-docs/openapi.json`.
pub fn openapi() -> utoipa::openapi::OpenApi {
    api_router().into_openapi()
}

/// Build the application router: the `/api` resources plus Swagger UI and Scalar.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = api_router().split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
