use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};
use validator::Validate;

use crate::domain::llm_response::{NewLlmResponse, ResponseChanges};
use crate::domain::types::ResponseId;
use crate::dto::ListDto;
use crate::dto::responses::{LlmResponseDto, LlmResponseListItemDto};
use crate::forms::PaginationParams;
use crate::forms::responses::{CreateResponseForm, SearchResponsesForm, UpdateResponseForm};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, ResponseSearchQuery};
use crate::routes::{error_response, not_found, unprocessable};
use crate::services::responses::{
    create_response as create_response_service, delete_response as delete_response_service,
    list_responses as list_responses_service, search_responses as search_responses_service,
    show_response as show_response_service, update_response as update_response_service,
};
use crate::services::validation::ensure_category_exists;

const NOT_FOUND: &str = "Response not found";

#[post("/responses")]
pub async fn create_response(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<CreateResponseForm>,
) -> impl Responder {
    let new_response: NewLlmResponse = match form.try_into() {
        Ok(new_response) => new_response,
        Err(e) => return unprocessable(e.to_string()),
    };

    if server_config.validate_categories {
        if let Err(err) = ensure_category_exists(repo.get_ref(), new_response.category_id) {
            return error_response(err, "Failed to check category");
        }
    }

    match create_response_service(new_response, repo.get_ref()) {
        Ok(response) => HttpResponse::Created().json(LlmResponseDto::from(response)),
        Err(err) => error_response(err, "Failed to create response"),
    }
}

#[get("/responses")]
pub async fn list_responses(
    repo: web::Data<DieselRepository>,
    params: web::Query<PaginationParams>,
) -> impl Responder {
    let params = params.into_inner();
    if let Err(e) = params.validate() {
        return unprocessable(e.to_string());
    }

    match list_responses_service(params.into(), repo.get_ref()) {
        Ok(responses) => HttpResponse::Ok().json(ListDto::<LlmResponseListItemDto>::new(
            responses,
            params.skip,
            params.limit,
        )),
        Err(err) => error_response(err, "Failed to list responses"),
    }
}

#[get("/responses/search")]
pub async fn search_responses(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    // `web::Query` into a struct would keep only one `tags` value.
    let pairs = match web::Query::<Vec<(String, String)>>::from_query(req.query_string()) {
        Ok(pairs) => pairs.into_inner(),
        Err(e) => return unprocessable(e.to_string()),
    };
    let form = match SearchResponsesForm::from_query_pairs(pairs) {
        Ok(form) => form,
        Err(e) => return unprocessable(e.to_string()),
    };

    let PaginationParams { skip, limit } = form.pagination;
    let query = ResponseSearchQuery::from(form);

    match search_responses_service(query, repo.get_ref()) {
        Ok(responses) => {
            HttpResponse::Ok().json(ListDto::<LlmResponseListItemDto>::new(responses, skip, limit))
        }
        Err(err) => error_response(err, "Failed to search responses"),
    }
}

#[get("/responses/{response_id}")]
pub async fn get_response(
    response_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let response_id = match ResponseId::parse(&response_id) {
        Ok(id) => id,
        Err(e) => return unprocessable(e.to_string()),
    };

    match show_response_service(response_id, repo.get_ref()) {
        Ok(Some(detail)) => HttpResponse::Ok().json(LlmResponseDto::from(detail)),
        Ok(None) => not_found(NOT_FOUND),
        Err(err) => error_response(err, "Failed to get response"),
    }
}

#[put("/responses/{response_id}")]
pub async fn update_response(
    response_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<UpdateResponseForm>,
) -> impl Responder {
    let response_id = match ResponseId::parse(&response_id) {
        Ok(id) => id,
        Err(e) => return unprocessable(e.to_string()),
    };
    let changes: ResponseChanges = match form.try_into() {
        Ok(changes) => changes,
        Err(e) => return unprocessable(e.to_string()),
    };

    if server_config.validate_categories {
        if let Err(err) = ensure_category_exists(repo.get_ref(), changes.category_id) {
            return error_response(err, "Failed to check category");
        }
    }

    match update_response_service(response_id, changes, repo.get_ref()) {
        Ok(Some(response)) => HttpResponse::Ok().json(LlmResponseDto::from(response)),
        Ok(None) => not_found(NOT_FOUND),
        Err(err) => error_response(err, "Failed to update response"),
    }
}

#[delete("/responses/{response_id}")]
pub async fn delete_response(
    response_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let response_id = match ResponseId::parse(&response_id) {
        Ok(id) => id,
        Err(e) => return unprocessable(e.to_string()),
    };

    match delete_response_service(response_id, repo.get_ref()) {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => not_found(NOT_FOUND),
        Err(err) => error_response(err, "Failed to delete response"),
    }
}
