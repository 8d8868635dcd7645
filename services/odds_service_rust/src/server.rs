//! HTTP surface: the query form, its submit handler, and the sports list.

use crate::formatters::{
    escape_html, format_game_results, INVALID_DATE_MESSAGE, NO_GAMES_MESSAGE,
    ODDS_NOT_RELEASED_MESSAGE, QUERY_FORM,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::{Form, Router};
use chrono_tz::Tz;
use odds_core::clients::OddsFeed;
use odds_core::{best_odds, build_table_in, parse_bookmaker_list, BestOdds, OddsError};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Read-only state shared by all handlers; every request builds its own table.
#[derive(Clone)]
pub struct AppState {
    feed: Arc<dyn OddsFeed>,
    timezone: Tz,
}

impl AppState {
    pub fn new(feed: Arc<dyn OddsFeed>, timezone: Tz) -> Self {
        Self { feed, timezone }
    }
}

/// Fields posted by the query form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OddsQuery {
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub bookmakers: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_form).post(submit_query))
        .route("/sports", get(list_sports))
        .with_state(state)
}

async fn serve_form() -> Html<&'static str> {
    Html(QUERY_FORM)
}

async fn submit_query(State(state): State<AppState>, Form(query): Form<OddsQuery>) -> Response {
    let sport = query.sport.trim();
    if !is_valid_sport_key(sport) {
        return (
            StatusCode::BAD_REQUEST,
            Html(format!("Invalid sport: {}", escape_html(sport))),
        )
            .into_response();
    }

    info!(
        "Odds query: sport={} date={} bookmakers={:?}",
        sport, query.date, query.bookmakers
    );

    let events = match state.feed.fetch_odds(sport).await {
        Ok(events) => events,
        Err(e) => return error_response(e),
    };

    let table = match build_table_in(&events, state.timezone) {
        Ok(table) => table,
        Err(e) => return error_response(e),
    };

    let bookmakers = parse_bookmaker_list(&query.bookmakers);
    match best_odds(&table, query.date.trim(), bookmakers.as_deref()) {
        Ok(BestOdds::Results { games }) => Html(format_game_results(&games)).into_response(),
        Ok(BestOdds::NoMatch { .. }) => Html(NO_GAMES_MESSAGE).into_response(),
        Ok(BestOdds::InvalidDate { .. }) => Html(INVALID_DATE_MESSAGE).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_sports(State(state): State<AppState>) -> Response {
    match state.feed.fetch_sports().await {
        Ok(sports) => Json(sports).into_response(),
        Err(e) => error_response(e),
    }
}

/// Sport keys go into the upstream URL path, so only the provider's key
/// alphabet is accepted.
fn is_valid_sport_key(sport: &str) -> bool {
    !sport.is_empty()
        && sport
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn error_response(err: OddsError) -> Response {
    match err {
        OddsError::DataIntegrity(reason) => {
            warn!("Odds table integrity check failed: {}", reason);
            Html(ODDS_NOT_RELEASED_MESSAGE).into_response()
        }
        OddsError::UnknownBookmaker(name) => (
            StatusCode::BAD_REQUEST,
            Html(format!("Unknown bookmaker: {}", escape_html(&name))),
        )
            .into_response(),
        other => {
            error!("Odds feed failed: {}", other);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": other.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(state);

    info!("Starting odds service on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
