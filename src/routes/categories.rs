use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use validator::Validate;

use crate::domain::category::CategoryChanges;
use crate::domain::types::CategoryId;
use crate::dto::ListDto;
use crate::dto::categories::CategoryDto;
use crate::forms::PaginationParams;
use crate::forms::categories::{CreateCategoryForm, CreateCategoryPayload, UpdateCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{error_response, not_found, unprocessable};
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    get_category as get_category_service, list_categories as list_categories_service,
    update_category as update_category_service,
};

const NOT_FOUND: &str = "Category not found";

#[post("/categories")]
pub async fn create_category(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateCategoryForm>,
) -> impl Responder {
    let payload: CreateCategoryPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return unprocessable(e.to_string()),
    };

    match create_category_service(payload, repo.get_ref()) {
        Ok(category) => HttpResponse::Created().json(CategoryDto::from(category)),
        Err(err) => error_response(err, "Failed to create category"),
    }
}

#[get("/categories")]
pub async fn list_categories(
    repo: web::Data<DieselRepository>,
    params: web::Query<PaginationParams>,
) -> impl Responder {
    let params = params.into_inner();
    if let Err(e) = params.validate() {
        return unprocessable(e.to_string());
    }

    match list_categories_service(params.into(), repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(ListDto::<CategoryDto>::new(
            categories,
            params.skip,
            params.limit,
        )),
        Err(err) => error_response(err, "Failed to list categories"),
    }
}

#[get("/categories/{category_id}")]
pub async fn get_category(
    category_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = match CategoryId::parse(&category_id) {
        Ok(id) => id,
        Err(e) => return unprocessable(e.to_string()),
    };

    match get_category_service(category_id, repo.get_ref()) {
        Ok(Some(category)) => HttpResponse::Ok().json(CategoryDto::from(category)),
        Ok(None) => not_found(NOT_FOUND),
        Err(err) => error_response(err, "Failed to get category"),
    }
}

#[put("/categories/{category_id}")]
pub async fn update_category(
    category_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateCategoryForm>,
) -> impl Responder {
    let category_id = match CategoryId::parse(&category_id) {
        Ok(id) => id,
        Err(e) => return unprocessable(e.to_string()),
    };
    let changes: CategoryChanges = match form.try_into() {
        Ok(changes) => changes,
        Err(e) => return unprocessable(e.to_string()),
    };

    match update_category_service(category_id, changes, repo.get_ref()) {
        Ok(Some(category)) => HttpResponse::Ok().json(CategoryDto::from(category)),
        Ok(None) => not_found(NOT_FOUND),
        Err(err) => error_response(err, "Failed to update category"),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = match CategoryId::parse(&category_id) {
        Ok(id) => id,
        Err(e) => return unprocessable(e.to_string()),
    };

    match delete_category_service(category_id, repo.get_ref()) {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => not_found(NOT_FOUND),
        Err(err) => error_response(err, "Failed to delete category"),
    }
}
