//! HTTP 路由

mod recipes;
mod system;
mod translate;

use actix_web::web;

use crate::error::ApiError;

/// Register every route on an `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(format!("Invalid JSON body: {err}")).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(format!("Invalid query: {err}")).into()),
    )
    .service(translate::translate)
    .service(system::health)
    .service(system::providers)
    .service(recipes::list_recipes)
    .service(recipes::create_recipe)
    .service(recipes::get_recipe)
    .service(recipes::update_recipe)
    .service(recipes::delete_recipe)
    .service(recipes::list_translations)
    .service(recipes::invalidate_translation)
    .service(recipes::display);
}
