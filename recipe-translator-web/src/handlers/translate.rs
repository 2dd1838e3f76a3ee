use actix_web::{HttpResponse, post, web};
use recipe_translator_app::AppState;
use recipe_translator_core::types::TranslateFieldRequest;
use tracing_attributes::instrument;

use crate::error::ApiResult;

/// `POST /translate`
///
/// `{content, targetLanguage, contentType, recipeId?, sourceLanguage?}` →
/// `{translated, cacheStatus}`
#[post("/translate")]
#[instrument(
    skip_all,
    fields(
        content_type = body.content_type.as_deref().unwrap_or_default(),
        target = body.target_language.as_deref().unwrap_or_default(),
        recipe_id = body.recipe_id.as_deref().unwrap_or_default(),
    )
)]
pub async fn translate(
    state: web::Data<AppState>,
    body: web::Json<TranslateFieldRequest>,
) -> ApiResult<HttpResponse> {
    let response = state
        .translation_service
        .handle_translate_request(body.into_inner())
        .await?;
    tracing::debug!(cache_status = ?response.cache_status, "translated");
    Ok(HttpResponse::Ok().json(response))
}
