use crate::duplicates::{self, ImportReport};
use crate::errors::AppError;
use crate::models::{FilterParams, Group, MatchRecord, MutationResponse, NewResult, ResultRecord, StandingsParams};
use crate::progress::{build_report, WeeklyReport};
use crate::schedule::{filter_matches, validate_match, validate_result, MatchFilter};
use crate::standings::{self, PlayerStanding};
use crate::state::AppState;
use crate::storage::{persist_matches, persist_results};
use crate::store::{Change, RecordStore};
use crate::ui::{render_index, IndexView};
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::{info, warn};

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Html<String>, AppError> {
    let filter = MatchFilter::try_from(params)?;
    let store = state.store.lock().await;

    let matches = filter_matches(store.all_matches(), &filter);
    let report = build_report(&state.tournament, store.all_matches().iter().map(|m| m.date));
    let standings = filter
        .group()
        .map(|group| (group, standings::compute(store.all_results(), group)));

    Ok(Html(render_index(&IndexView {
        tournament: &state.tournament,
        filter: &filter,
        matches: &matches,
        total_matches: store.all_matches().len(),
        report: &report,
        standings: standings.as_ref().map(|(group, rows)| (*group, rows.as_slice())),
    })))
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let filter = MatchFilter::try_from(params)?;
    let store = state.store.lock().await;
    Ok(Json(filter_matches(store.all_matches(), &filter)))
}

pub async fn create_match(
    State(state): State<AppState>,
    Json(candidate): Json<MatchRecord>,
) -> Result<Json<MutationResponse>, AppError> {
    Ok(Json(schedule_match(&state, candidate).await?))
}

pub async fn delete_match(
    State(state): State<AppState>,
    Json(record): Json<MatchRecord>,
) -> Result<Json<MutationResponse>, AppError> {
    Ok(Json(remove_match(&state, record).await?))
}

pub async fn clear_matches(State(state): State<AppState>) -> Result<Json<MutationResponse>, AppError> {
    Ok(Json(remove_all_matches(&state).await?))
}

pub async fn import_matches(
    State(state): State<AppState>,
    Json(batch): Json<Vec<MatchRecord>>,
) -> Result<Json<ImportReport>, AppError> {
    let mut store = state.store.lock().await;
    let report = duplicates::import(&mut store, &state.tournament, batch);
    if report.refresh {
        persist_matches(&state.paths, &store).await?;
    }
    Ok(Json(report))
}

pub async fn list_results(State(state): State<AppState>) -> Json<Vec<ResultRecord>> {
    let store = state.store.lock().await;
    Json(store.all_results().to_vec())
}

pub async fn create_result(
    State(state): State<AppState>,
    Json(submission): Json<NewResult>,
) -> Result<Json<ResultRecord>, AppError> {
    let record = validate_result(submission, &state.tournament)?;
    let mut store = state.store.lock().await;
    if !duplicates::exists(&record.fixture, store.all_matches()) {
        warn!(
            player1 = %record.fixture.player1,
            player2 = %record.fixture.player2,
            "result recorded for a match that is not on the schedule"
        );
    }

    let change = store.append_result(record.clone());
    commit_results(&state, &store, change).await?;
    info!(player1 = %record.fixture.player1, player2 = %record.fixture.player2, winner = ?record.winner, "result recorded");
    Ok(Json(record))
}

pub async fn delete_result(
    State(state): State<AppState>,
    Json(record): Json<ResultRecord>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut store = state.store.lock().await;
    let change = store.remove_results(|existing| *existing == record);
    Ok(Json(commit_results(&state, &store, change).await?))
}

pub async fn clear_results(State(state): State<AppState>) -> Result<Json<MutationResponse>, AppError> {
    let mut store = state.store.lock().await;
    let change = store.replace_all_results(Vec::new());
    Ok(Json(commit_results(&state, &store, change).await?))
}

pub async fn get_progress(State(state): State<AppState>) -> Json<WeeklyReport> {
    let store = state.store.lock().await;
    Json(build_report(&state.tournament, store.all_matches().iter().map(|m| m.date)))
}

pub async fn get_standings(
    State(state): State<AppState>,
    Query(params): Query<StandingsParams>,
) -> Result<Json<Vec<PlayerStanding>>, AppError> {
    let class = params.class.parse().map_err(|err: String| AppError::bad_request(err))?;
    let group = Group {
        class,
        number: params.group,
    };
    let store = state.store.lock().await;
    Ok(Json(standings::compute(store.all_results(), group)))
}

pub async fn schedule_form(State(state): State<AppState>, Form(candidate): Form<MatchRecord>) -> Result<Redirect, AppError> {
    schedule_match(&state, candidate).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_form(State(state): State<AppState>, Form(record): Form<MatchRecord>) -> Result<Redirect, AppError> {
    remove_match(&state, record).await?;
    Ok(Redirect::to("/"))
}

pub async fn clear_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    remove_all_matches(&state).await?;
    Ok(Redirect::to("/"))
}

async fn schedule_match(state: &AppState, candidate: MatchRecord) -> Result<MutationResponse, AppError> {
    let record = validate_match(candidate, &state.tournament)?;
    let mut store = state.store.lock().await;
    info!(
        date = %record.date,
        class = %record.class,
        group = record.group,
        player1 = %record.player1,
        player2 = %record.player2,
        "match scheduled"
    );
    let change = store.append_match(record);
    commit_matches(state, &store, change).await
}

async fn remove_match(state: &AppState, record: MatchRecord) -> Result<MutationResponse, AppError> {
    let mut store = state.store.lock().await;
    let change = store.remove_matches(|existing| *existing == record);
    info!(removed = change.affected, "matches deleted");
    commit_matches(state, &store, change).await
}

async fn remove_all_matches(state: &AppState) -> Result<MutationResponse, AppError> {
    let mut store = state.store.lock().await;
    let change = store.replace_all_matches(Vec::new());
    info!(removed = change.affected, "schedule cleared");
    commit_matches(state, &store, change).await
}

async fn commit_matches(state: &AppState, store: &RecordStore, change: Change) -> Result<MutationResponse, AppError> {
    if change.needs_refresh() {
        persist_matches(&state.paths, store).await?;
    }
    Ok(to_response(change))
}

async fn commit_results(state: &AppState, store: &RecordStore, change: Change) -> Result<MutationResponse, AppError> {
    if change.needs_refresh() {
        persist_results(&state.paths, store).await?;
    }
    Ok(to_response(change))
}

fn to_response(change: Change) -> MutationResponse {
    MutationResponse {
        affected: change.affected,
        refresh: change.needs_refresh(),
    }
}
