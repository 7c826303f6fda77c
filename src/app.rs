use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::overview))
        .route("/calories", get(handlers::calories_page))
        .route("/calories/add", post(handlers::add_meal_form))
        .route("/calories/:index/remove", post(handlers::remove_meal_form))
        .route("/calories/clear", post(handlers::clear_meals_form))
        .route("/calories/save-totals", post(handlers::save_totals_form))
        .route("/daily-totals", get(handlers::daily_totals_page))
        .route(
            "/api/meals",
            get(handlers::list_meals)
                .post(handlers::add_meal)
                .delete(handlers::clear_meals),
        )
        .route("/api/meals/:index", delete(handlers::remove_meal))
        .route("/api/totals", get(handlers::get_totals))
        .route(
            "/api/daily-totals",
            get(handlers::get_daily_totals).post(handlers::save_daily_totals),
        )
        .with_state(state)
}
