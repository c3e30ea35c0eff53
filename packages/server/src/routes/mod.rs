use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/users", user_routes())
        .nest("/companies", company_routes())
        .nest("/categories", category_routes())
        .nest("/bookmarks", bookmark_routes())
        .nest("/comments", comment_routes())
        .nest("/applications", application_routes())
        .nest("/comparison", comparison_routes())
        .nest("/main", main_routes())
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::user::list_users))
        .routes(routes!(handlers::user::register))
        .routes(routes!(handlers::user::login))
        .routes(routes!(handlers::user::me))
        .routes(routes!(
            handlers::user::get_profile,
            handlers::user::update_profile
        ))
        .routes(routes!(handlers::user::delete_user))
}

fn company_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::company::list_companies,
            handlers::company::create_company
        ))
        .routes(routes!(
            handlers::company::get_company,
            handlers::company::update_company,
            handlers::company::delete_company
        ))
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::category::list_categories,
            handlers::category::create_category
        ))
        .routes(routes!(
            handlers::category::update_category,
            handlers::category::delete_category
        ))
}

fn bookmark_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::bookmark::list_bookmarks,
        handlers::bookmark::add_bookmark,
        handlers::bookmark::remove_bookmark
    ))
}

fn comment_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::comment::list_comments,
            handlers::comment::create_comment
        ))
        // GET takes a company id, PATCH and DELETE a comment id.
        .routes(routes!(
            handlers::comment::list_company_comments,
            handlers::comment::update_comment,
            handlers::comment::delete_comment
        ))
}

fn application_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::application::list_applications,
            handlers::application::apply
        ))
        .routes(routes!(handlers::application::withdraw_application))
}

fn comparison_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::comparison::pick))
        .routes(routes!(handlers::comparison::search))
}

fn main_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::main_listing::list_main_companies))
}
