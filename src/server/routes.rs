use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::domain::{encode_path_segment, unslugify, Mode, SearchConfig};
use crate::prompts;

use super::{error::AppError, state::AppState};

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(rename = "influencerName", default)]
    influencer_name: String,
}

#[derive(Deserialize)]
pub struct ApiKeyForm {
    #[serde(rename = "apiKey", default)]
    api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct ConfigForm {
    #[serde(default)]
    config: String,
}

fn redirect_home() -> Response {
    (StatusCode::FOUND, [(LOCATION, "/")]).into_response()
}

pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "model": state.config.model }))
}

/// Resolves the submitted name to a slug and redirects to its detail page.
pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    let api_key = state.api_key(&headers)?.ok_or(AppError::MissingApiKey)?;
    let config = state.search_config(&headers)?;

    if config.mode == Mode::Specific && form.influencer_name.trim().is_empty() {
        return Err(AppError::InvalidInput("Influencer name is required.".to_string()));
    }

    let slug = state
        .analyst
        .resolve_slug(&form.influencer_name, config.mode, &api_key)
        .await
        .map_err(AppError::SearchFailed)?
        .ok_or(AppError::NotFound)?;

    info!(%slug, "resolved influencer");
    Ok(Redirect::to(&format!("/i/{}", encode_path_segment(&slug))).into_response())
}

pub async fn influencer_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(influencer): Path<String>,
) -> Result<Response, AppError> {
    let Some(api_key) = state.api_key(&headers)? else {
        return Ok(redirect_home());
    };
    let config = state.search_config(&headers)?;

    let outcome = state
        .analyst
        .analyze_influencer(&unslugify(&influencer), &config, &api_key)
        .await?;

    Ok(Json(json!({ "influencer": outcome })).into_response())
}

pub async fn leaderboard_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(api_key) = state.api_key(&headers)? else {
        return Ok(redirect_home());
    };

    let outcome = state.analyst.build_leaderboard(&api_key).await?;
    Ok(Json(outcome).into_response())
}

pub async fn save_api_key_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ApiKeyForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    let api_key = form
        .api_key
        .map(|k| k.trim().to_string())
        .filter(|k| k.starts_with(prompts::API_KEY_PREFIX))
        .ok_or(AppError::InvalidApiKeyFormat)?;

    let cookie = state.api_key_cookie.serialize(&api_key)?;
    Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

pub async fn read_api_key_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let api_key = state.api_key(&headers)?;
    Ok(Json(json!({ "apiKey": api_key })).into_response())
}

pub async fn clear_api_key_handler(State(state): State<Arc<AppState>>) -> Response {
    (
        [(SET_COOKIE, state.api_key_cookie.clear())],
        Json(json!({ "success": true })),
    )
        .into_response()
}

pub async fn save_config_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<ConfigForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form?;
    let config: SearchConfig = serde_json::from_str(&form.config)
        .map_err(|e| AppError::InvalidInput(format!("{} {e}", prompts::MSG_INVALID_CONFIG)))?;

    let cookie = state.config_cookie.serialize(&config)?;
    Ok(([(SET_COOKIE, cookie)], Json(json!({ "success": true }))).into_response())
}

pub async fn read_config_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let config = state.saved_search_config(&headers)?;
    Ok(Json(json!({ "config": config })).into_response())
}

pub async fn reset_config_handler(State(state): State<Arc<AppState>>) -> Response {
    (
        [(SET_COOKIE, state.config_cookie.clear())],
        Json(json!({ "success": true })),
    )
        .into_response()
}
