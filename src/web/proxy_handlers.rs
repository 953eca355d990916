// src/web/proxy_handlers.rs
use crate::{
    error::AppResult,
    services::{
        chat_service::{self, ChatReply, ChatRequest},
        market_service::{self, MarketQuery},
    },
    state::AppState,
};
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde_json::Value;

// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatReply>> {
    let reply = chat_service::send_message(
        &state.http,
        state.config.gemini_api_key.as_deref(),
        &state.config.gemini_model,
        &body,
    )
    .await?;
    Ok(Json(reply))
}

// GET /api/marketstack?symbol=&limit=
pub async fn market_data(
    State(state): State<AppState>,
    Query(query): Query<MarketQuery>,
) -> AppResult<Json<Value>> {
    let query = query.normalize()?;
    let data = market_service::fetch_eod(&state.http, state.config.marketstack_api_key.as_deref(), &query).await?;
    Ok(Json(data))
}
