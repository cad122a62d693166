use crate::aggregate::{daily, MonthlyMetrics};
use crate::errors::{JournalError, JournalResult};
use crate::journal::{Month, Trade};
use crate::mentor;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use portable_atomic::Ordering::Relaxed;
use std::sync::Arc;

#[derive(Debug, Default, serde::Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
    pub account: Option<String>,
}

/// Explicit month, or the current one in the journal time zone.
fn resolve_month(state: &AppState, raw: Option<&str>) -> JournalResult<Month> {
    match raw {
        Some(s) => s.parse::<Month>(),
        None => Ok(Month::current(&state.config.timezone)),
    }
}

fn account_trades<'a>(state: &'a AppState, account: Option<&'a str>) -> Vec<&'a Trade> {
    match account {
        Some(id) => state.journal.trades_for_account(id).collect(),
        None => state.journal.trades.iter().collect(),
    }
}

fn monthly(state: &AppState, params: &MonthQuery) -> JournalResult<MonthlyMetrics> {
    state.counters.requests_served.fetch_add(1, Relaxed);
    let month = resolve_month(state, params.month.as_deref()).inspect_err(|_| {
        state.counters.bad_requests.fetch_add(1, Relaxed);
    })?;
    let trades = account_trades(state, params.account.as_deref());
    let metrics = state.aggregator.aggregate_month(trades, month);
    state.record_aggregation(metrics.skipped_records);
    Ok(metrics)
}

/// GET /api/trades -- canonical trades, optionally narrowed to a month/account
pub async fn get_trades(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<serde_json::Value>, JournalError> {
    state.counters.requests_served.fetch_add(1, Relaxed);
    let trades = account_trades(&state, params.account.as_deref());

    let Some(raw) = params.month.as_deref() else {
        return Ok(Json(serde_json::json!({ "trades": trades, "skipped": 0 })));
    };
    let month = raw.parse::<Month>().inspect_err(|_| {
        state.counters.bad_requests.fetch_add(1, Relaxed);
    })?;

    let slice = daily::filter_month(trades, month, state.aggregator.timezone());
    let in_month: Vec<&Trade> = slice.trades.iter().map(|d| d.trade).collect();
    Ok(Json(serde_json::json!({
        "month": month,
        "trades": in_month,
        "skipped": slice.skipped,
    })))
}

/// GET /api/metrics -- monthly metrics (aggregated per request, nothing cached)
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<MonthlyMetrics>, JournalError> {
    monthly(&state, &params).map(Json)
}

/// GET /api/calendar -- one entry per trading day of the month
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<serde_json::Value>, JournalError> {
    let metrics = monthly(&state, &params)?;
    Ok(Json(serde_json::json!({
        "month": metrics.month,
        "days": metrics.daily,
    })))
}

/// GET /api/mentor/{share_id}/students -- roster with monthly summaries
pub async fn get_students(
    State(state): State<Arc<AppState>>,
    Path(share_id): Path<String>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<serde_json::Value>, JournalError> {
    state.counters.requests_served.fetch_add(1, Relaxed);
    let mentor = &state.journal.mentor;
    if !mentor.accepts(&share_id) {
        tracing::warn!("mentor share link rejected");
        return Err(JournalError::NotFound("mentor share link".into()));
    }
    let month = resolve_month(&state, params.month.as_deref()).inspect_err(|_| {
        state.counters.bad_requests.fetch_add(1, Relaxed);
    })?;

    let summaries =
        mentor::summarize_students(&state.aggregator, mentor, &state.journal.trades, month);
    for s in &summaries {
        state.record_aggregation(s.metrics.skipped_records);
    }
    Ok(Json(serde_json::json!({
        "mentor": mentor.name,
        "month": month,
        "students": summaries,
    })))
}

/// GET /api/mentor/{share_id}/students/{student_id} -- one student's month
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    Path((share_id, student_id)): Path<(String, String)>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<mentor::StudentSummary>, JournalError> {
    state.counters.requests_served.fetch_add(1, Relaxed);
    let mentor = &state.journal.mentor;
    if !mentor.accepts(&share_id) {
        return Err(JournalError::NotFound("mentor share link".into()));
    }
    let student = mentor.student(&student_id)?;
    let month = resolve_month(&state, params.month.as_deref()).inspect_err(|_| {
        state.counters.bad_requests.fetch_add(1, Relaxed);
    })?;

    let metrics = mentor::student_metrics(&state.aggregator, student, &state.journal.trades, month);
    state.record_aggregation(metrics.skipped_records);
    Ok(Json(mentor::StudentSummary {
        student: student.clone(),
        metrics,
    }))
}

/// GET /api/profile -- who the journal belongs to and its calendar basis
pub async fn get_profile(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.counters.requests_served.fetch_add(1, Relaxed);
    Json(serde_json::json!({
        "user": state.config.current_user,
        "timezone": state.config.timezone.name(),
        "mentor_share_id": state.config.mentor_share_id,
        "trades": state.journal.trades.len(),
        "rejected_records": state.journal.rejected,
    }))
}

/// GET /api/counters -- request counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "requests_served": state.counters.requests_served.load(Relaxed),
        "months_aggregated": state.counters.months_aggregated.load(Relaxed),
        "records_skipped": state.counters.records_skipped.load(Relaxed),
        "bad_requests": state.counters.bad_requests.load(Relaxed),
    }))
}
