//! 食谱、翻译缓存与展示会话

use actix_web::{HttpResponse, delete, get, post, put, web};
use recipe_translator_app::AppState;
use recipe_translator_core::error::CoreError;
use recipe_translator_core::services::ToggleOutcome;
use recipe_translator_core::types::{
    ApiResponse, CacheWriteStatus, CreateRecipeRequest, DisplayState, Language, SessionSnapshot,
    UpdateRecipeRequest,
};
use serde::{Deserialize, Serialize};
use tracing_attributes::instrument;

use crate::error::ApiResult;

fn parse_language(code: &str) -> Result<Language, CoreError> {
    Language::from_code(code).ok_or_else(|| CoreError::UnsupportedLanguage(code.to_string()))
}

#[get("/recipes")]
pub async fn list_recipes(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let recipes = state.recipe_service.list_recipes().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(recipes)))
}

#[post("/recipes")]
#[instrument(skip_all)]
pub async fn create_recipe(
    state: web::Data<AppState>,
    body: web::Json<CreateRecipeRequest>,
) -> ApiResult<HttpResponse> {
    let recipe = state.recipe_service.create_recipe(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(recipe)))
}

#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let recipe = state.recipe_service.get_recipe(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(recipe)))
}

#[put("/recipes/{id}")]
#[instrument(skip(state, body))]
pub async fn update_recipe(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateRecipeRequest>,
) -> ApiResult<HttpResponse> {
    let recipe = state
        .recipe_service
        .update_recipe(&path, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(recipe)))
}

#[delete("/recipes/{id}")]
#[instrument(skip(state))]
pub async fn delete_recipe(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.recipe_service.delete_recipe(&path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /recipes/{id}/translations`: language → cache entry with stale fields
#[get("/recipes/{id}/translations")]
pub async fn list_translations(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let recipe = state.recipe_service.get_recipe(&path).await?;
    let translations = state.cache_service.list_for_recipe(&recipe).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(translations)))
}

#[derive(Serialize)]
struct Invalidated {
    removed: bool,
}

#[delete("/recipes/{id}/translations/{lang}")]
#[instrument(skip(state))]
pub async fn invalidate_translation(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (recipe_id, lang) = path.into_inner();
    let language = parse_language(&lang)?;
    let removed = state.cache_service.invalidate(&recipe_id, language).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(Invalidated { removed })))
}

#[derive(Debug, Deserialize)]
pub struct DisplayQuery {
    lang: Option<String>,
    /// Toggle once before answering (translates on a cache miss)
    #[serde(default)]
    translate: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DisplayResponse {
    #[serde(flatten)]
    snapshot: SessionSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_status: Option<CacheWriteStatus>,
}

/// `GET /recipes/{id}/display?lang=xx[&translate=true]`
///
/// Opens a session for the consumer's language. With `translate=true` the
/// session is toggled once and any cache write is awaited.
#[get("/recipes/{id}/display")]
#[instrument(skip(state))]
pub async fn display(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DisplayQuery>,
) -> ApiResult<HttpResponse> {
    let code = query
        .lang
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(CoreError::MissingParameters)?;
    let language = parse_language(code)?;

    let session = state.session_service.open_session(&path, language).await?;
    // 已是译文（缓存命中）时不再 toggle，否则会切回原文
    let cache_status = if query.translate && session.state() != DisplayState::Translated {
        match session.toggle().await? {
            ToggleOutcome::Translated {
                cache_write: Some(handle),
            } => Some(handle.outcome().await),
            _ => None,
        }
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(DisplayResponse {
        snapshot: session.snapshot().await,
        cache_status,
    }))
}
