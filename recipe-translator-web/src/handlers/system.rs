use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use recipe_translator_app::AppState;
use recipe_translator_core::services::ActiveProvider;
use recipe_translator_core::types::{ApiResponse, ProviderMetadata};
use serde::Serialize;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
    time: String,
}

/// `GET /health`
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        time: Utc::now().to_rfc3339(),
    })
}

#[derive(Serialize)]
struct Providers {
    active: ActiveProvider,
    available: Vec<ProviderMetadata>,
}

/// `GET /providers`
#[get("/providers")]
pub async fn providers(state: web::Data<AppState>) -> HttpResponse {
    let service = &state.provider_metadata_service;
    HttpResponse::Ok().json(ApiResponse::success(Providers {
        active: service.active_provider(),
        available: service.list_providers(),
    }))
}
