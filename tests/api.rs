use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use llmoonclip::models::config::ServerConfig;
use llmoonclip::repository::DieselRepository;
use llmoonclip::routes::{configure, json_config, query_config};

mod common;

macro_rules! app {
    ($test_db:expr, $config:expr) => {
        test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(query_config())
                .app_data(web::Data::new(DieselRepository::new($test_db.pool())))
                .app_data(web::Data::new($config))
                .configure(configure),
        )
        .await
    };
}

fn response_body(title: &str, category_id: Option<&str>, tags: &[&str]) -> Value {
    json!({
        "title": title,
        "prompt": "P1",
        "content_md": "X",
        "model": "gpt",
        "provider": "openai",
        "category_id": category_id,
        "tags": tags,
    })
}

#[actix_web::test]
async fn root_reports_service_name() {
    let test_db = common::TestDb::new();
    let app = app!(test_db, ServerConfig::default());

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "LLMoonClip API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body.get("docs").is_none());
}

#[actix_web::test]
async fn category_and_response_workflow() {
    let test_db = common::TestDb::new();
    let app = app!(test_db, ServerConfig::default());

    let req = test::TestRequest::post()
        .uri("/api/v1/categories")
        .set_json(json!({ "name": "ML" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = test::read_body_json(resp).await;
    let category_id = category["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/responses")
        .set_json(response_body("T1", Some(&category_id), &["a", "b"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let response_id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/responses/search?tags=a&tags=b")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found["total"], 1);
    assert_eq!(found["items"][0]["id"], response_id.as_str());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/responses/{response_id}"))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["category"]["name"], "ML");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/responses/{response_id}"))
        .set_json(json!({ "tags": ["a", "b", "c"] }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["tags"], json!(["a", "b", "c"]));
    assert_eq!(updated["title"], "T1");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/categories/{category_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/responses/{response_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Response not found");
}

#[actix_web::test]
async fn list_endpoints_return_pages() {
    let test_db = common::TestDb::new();
    let app = app!(test_db, ServerConfig::default());

    for title in ["first", "second", "third"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/responses")
            .set_json(response_body(title, None, &[]))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/responses?skip=1&limit=1")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["skip"], 1);
    assert_eq!(page["limit"], 1);
    assert!(page["items"][0].get("content_md").is_none());
}

#[actix_web::test]
async fn invalid_input_is_unprocessable() {
    let test_db = common::TestDb::new();
    let app = app!(test_db, ServerConfig::default());

    let cases = [
        test::TestRequest::post()
            .uri("/api/v1/categories")
            .set_json(json!({ "name": "" }))
            .to_request(),
        test::TestRequest::post()
            .uri("/api/v1/responses")
            .set_json(json!({ "title": "T1" }))
            .to_request(),
        test::TestRequest::get()
            .uri("/api/v1/responses?limit=0")
            .to_request(),
        test::TestRequest::get()
            .uri("/api/v1/responses/search?category_id=nope")
            .to_request(),
        test::TestRequest::get()
            .uri("/api/v1/categories/not-a-uuid")
            .to_request(),
    ];

    for req in cases {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[actix_web::test]
async fn missing_records_are_not_found() {
    let test_db = common::TestDb::new();
    let app = app!(test_db, ServerConfig::default());
    let id = "00000000-0000-4000-8000-000000000000";

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/categories/{id}"))
        .set_json(json!({ "name": "x" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/responses/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn category_checks_follow_configuration() {
    let missing = "00000000-0000-4000-8000-000000000000";

    let test_db = common::TestDb::new();
    let app = app!(test_db, ServerConfig::default());
    let req = test::TestRequest::post()
        .uri("/api/v1/responses")
        .set_json(response_body("T1", Some(missing), &[]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let strict_db = common::TestDb::new();
    let strict = ServerConfig {
        validate_categories: true,
        ..ServerConfig::default()
    };
    let app = app!(strict_db, strict);
    let req = test::TestRequest::post()
        .uri("/api/v1/responses")
        .set_json(response_body("T1", Some(missing), &[]))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}
