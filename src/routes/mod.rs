use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod categories;
pub mod main;
pub mod responses;

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::index).service(
        web::scope("/api/v1")
            .service(categories::create_category)
            .service(categories::list_categories)
            .service(categories::get_category)
            .service(categories::update_category)
            .service(categories::delete_category)
            .service(responses::create_response)
            .service(responses::list_responses)
            // must precede `/responses/{id}`
            .service(responses::search_responses)
            .service(responses::get_response)
            .service(responses::update_response)
            .service(responses::delete_response),
    );
}

/// JSON body extractor settings; malformed bodies become 422 responses.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let response = unprocessable(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Query string extractor settings; malformed parameters become 422 responses.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let response = unprocessable(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

pub fn not_found(detail: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "detail": detail.into() }))
}

pub fn unprocessable(detail: impl Into<String>) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(json!({ "detail": detail.into() }))
}

/// Map a service failure onto an HTTP response.
pub fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            unprocessable(message)
        }
        ServiceError::UnknownCategory(_) => unprocessable(err.to_string()),
        ServiceError::Repository(e) => {
            log::error!("{context}: {e}");
            HttpResponse::InternalServerError().json(json!({ "detail": "Internal server error" }))
        }
    }
}
