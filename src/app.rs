use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/matches", post(handlers::schedule_form))
        .route("/matches/delete", post(handlers::delete_form))
        .route("/matches/clear", post(handlers::clear_form))
        .route(
            "/api/matches",
            get(handlers::list_matches)
                .post(handlers::create_match)
                .delete(handlers::delete_match),
        )
        .route("/api/matches/clear", post(handlers::clear_matches))
        .route("/api/matches/import", post(handlers::import_matches))
        .route(
            "/api/results",
            get(handlers::list_results)
                .post(handlers::create_result)
                .delete(handlers::delete_result),
        )
        .route("/api/results/clear", post(handlers::clear_results))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/standings", get(handlers::get_standings))
        .with_state(state)
}
