use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::shared::AppState;
use crate::{activity, content, ranking, session, user};

/// Builds the full HTTP surface. Everything under /api except register and login
/// goes through `require_auth`.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/user", get(session::current_user))
        .route("/api/profile", patch(user::update_profile))
        .route("/api/profile/:id", get(user::get_profile))
        .route("/api/activities", post(activity::create_activity))
        .route(
            "/api/activities/user/:id",
            get(activity::list_user_activities),
        )
        .route("/api/calculate-trazos", post(activity::calculate_trazos))
        .route("/api/albums/:arista", get(activity::list_albums))
        .route("/api/rankings/trazos", get(ranking::rankings_by_trazos))
        .route("/api/rankings/words", get(ranking::rankings_by_words))
        .route(
            "/api/news",
            get(content::list_news).post(content::create_news),
        )
        .route(
            "/api/announcements",
            get(content::list_announcements).post(content::create_announcement),
        )
        .route(
            "/api/activities-to-do",
            get(content::list_assignments).post(content::create_assignment),
        )
        .route("/api/admin/update-role", post(user::admin_update_role))
        .route("/api/admin/update-rank", post(user::admin_update_rank))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_auth,
        ));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/register", post(session::register))
        .route("/api/login", post(session::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
