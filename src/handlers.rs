use crate::config::today_string;
use crate::daily_log::DailyTotalsLog;
use crate::errors::AppError;
use crate::ledger::MealLedger;
use crate::models::{AddMealRequest, AddMealResponse, DailyTotal, MealsResponse};
use crate::state::AppState;
use crate::totals::save_daily_total_today;
use crate::ui::{render_calories, render_daily_totals, render_overview};
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::{debug, warn};

pub async fn overview() -> Html<String> {
    Html(render_overview())
}

pub async fn calories_page(State(state): State<AppState>) -> Html<String> {
    let ledger = state.ledger.lock().await;
    Html(render_calories(ledger.entries(), ledger.totals()))
}

pub async fn daily_totals_page(State(state): State<AppState>) -> Html<String> {
    let log = DailyTotalsLog::load(state.store.as_ref()).await;
    Html(render_daily_totals(log.entries()))
}

pub async fn add_meal_form(
    State(state): State<AppState>,
    Form(payload): Form<AddMealRequest>,
) -> Redirect {
    apply_add(&state, &payload).await;
    Redirect::to("/calories")
}

pub async fn remove_meal_form(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Redirect {
    if let Err(err) = state.ledger.lock().await.remove_meal(index).await {
        warn!("remove ignored: {err}");
    }
    Redirect::to("/calories")
}

pub async fn clear_meals_form(State(state): State<AppState>) -> Redirect {
    state.ledger.lock().await.clear().await;
    Redirect::to("/calories")
}

pub async fn save_totals_form(State(state): State<AppState>) -> Redirect {
    apply_save_totals(&state).await;
    Redirect::to("/calories")
}

pub async fn list_meals(State(state): State<AppState>) -> Json<MealsResponse> {
    let ledger = state.ledger.lock().await;
    Json(meals_response(&ledger))
}

pub async fn add_meal(
    State(state): State<AppState>,
    Json(payload): Json<AddMealRequest>,
) -> Json<AddMealResponse> {
    let (added, ledger) = apply_add(&state, &payload).await;
    Json(AddMealResponse {
        added,
        meals: ledger.meals,
        totals: ledger.totals,
    })
}

pub async fn remove_meal(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<MealsResponse>, AppError> {
    let mut ledger = state.ledger.lock().await;
    ledger.remove_meal(index).await?;
    Ok(Json(meals_response(&ledger)))
}

pub async fn clear_meals(State(state): State<AppState>) -> Json<MealsResponse> {
    let mut ledger = state.ledger.lock().await;
    ledger.clear().await;
    Json(meals_response(&ledger))
}

pub async fn get_totals(State(state): State<AppState>) -> Json<DailyTotal> {
    let ledger = state.ledger.lock().await;
    let totals = ledger.totals();
    Json(DailyTotal {
        date: today_string(ledger.date_format()),
        total_calories: totals.calories,
        total_protein: totals.protein,
    })
}

pub async fn get_daily_totals(State(state): State<AppState>) -> Json<Vec<DailyTotal>> {
    let log = DailyTotalsLog::load(state.store.as_ref()).await;
    Json(log.into_entries())
}

pub async fn save_daily_totals(State(state): State<AppState>) -> Json<Vec<DailyTotal>> {
    Json(apply_save_totals(&state).await)
}

async fn apply_add(state: &AppState, payload: &AddMealRequest) -> (bool, MealsResponse) {
    let mut ledger = state.ledger.lock().await;
    let added = ledger
        .add_meal(&payload.meal, &payload.calories, &payload.protein)
        .await;
    if let Some(entry) = &added {
        debug!("added {} ({} kcal)", entry.meal, entry.calories);
    }
    (added.is_some(), meals_response(&ledger))
}

// Runs under the ledger lock so concurrent saves cannot interleave their
// read-modify-write of the daily totals key.
async fn apply_save_totals(state: &AppState) -> Vec<DailyTotal> {
    let ledger = state.ledger.lock().await;
    save_daily_total_today(ledger.store().as_ref(), ledger.entries(), ledger.date_format()).await
}

fn meals_response(ledger: &MealLedger) -> MealsResponse {
    MealsResponse {
        meals: ledger.entries().to_vec(),
        totals: ledger.totals(),
    }
}
