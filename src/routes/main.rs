use actix_web::{HttpResponse, Responder, get};
use serde_json::json;

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "LLMoonClip API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
