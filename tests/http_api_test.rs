//! HTTP tests: requests go through the full router in-process.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use portfolio_backend::accounts::Account;
use portfolio_backend::api::test_router;
use portfolio_backend::config::Config;
use portfolio_backend::lifecycle::PortfolioSystem;
use portfolio_backend::model::AccountId;
use serde_json::{json, Value};
use tower::ServiceExt;

const PREFIX: &str = "/api/v1";

fn config() -> Config {
    Config {
        accounts: vec![Account::new(AccountId(1), "admin", "secret")],
        ..Config::default()
    }
}

fn app() -> (Router, PortfolioSystem) {
    test_router(config())
}

fn admin() -> String {
    format!("Basic {}", STANDARD.encode("admin:secret"))
}

async fn send(
    router: &Router,
    method: Method,
    path: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("{PREFIX}{path}"))
        .header(header::HOST, "testserver");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_profile(router: &Router) -> Value {
    let (status, body) = send(
        router,
        Method::POST,
        "/profile/",
        Some(&admin()),
        Some(json!({
            "user": 1,
            "full_name": "Ada Lovelace",
            "profile_picture_url": "https://example.com/me.jpg",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn test_profile_photo_falls_back_to_external_url() {
    let (router, _system) = app();
    let created = create_profile(&router).await;
    assert_eq!(created["profile_photo"], "https://example.com/me.jpg");

    let id = created["id"].as_u64().unwrap();
    let (status, body) = send(&router, Method::GET, &format!("/profile/{id}/"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile_photo"], "https://example.com/me.jpg");
    assert_eq!(body["full_name"], "Ada Lovelace");
}

#[tokio::test]
async fn test_uploaded_picture_renders_absolute_url() {
    let (router, _system) = app();
    let created = create_profile(&router).await;
    let id = created["id"].as_u64().unwrap();

    let (status, body) = send(
        &router,
        Method::PATCH,
        &format!("/profile/{id}/"),
        Some(&admin()),
        Some(json!({"profile_picture": "profiles/ada.png"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["profile_photo"], "http://testserver/media/profiles/ada.png");
}

async fn read_json(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_photo_origin_falls_back_to_uri_authority() {
    let (router, _system) = app();
    let created = create_profile(&router).await;
    let id = created["id"].as_u64().unwrap();
    send(
        &router,
        Method::PATCH,
        &format!("/profile/{id}/"),
        Some(&admin()),
        Some(json!({"profile_picture": "p/a.png"})),
    )
    .await;

    // Absolute-form target and no Host header, as HTTP/2 requests arrive.
    let request = Request::builder()
        .uri(format!("http://me.dev{PREFIX}/profile/{id}/"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = read_json(&router, request).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["profile_photo"], "http://me.dev/media/p/a.png");

    let request = Request::builder()
        .uri(format!("{PREFIX}/profile/{id}/"))
        .header("x-forwarded-host", "portfolio.example")
        .header("x-forwarded-proto", "https")
        .header(header::HOST, "internal:8000")
        .body(Body::empty())
        .unwrap();
    let (_, body) = read_json(&router, request).await;
    assert_eq!(body["profile_photo"], "https://portfolio.example/media/p/a.png");
}

#[tokio::test]
async fn test_signed_ids_do_not_resolve() {
    let (router, _system) = app();
    let created = create_profile(&router).await;
    assert_eq!(created["id"], 1);

    for path in ["/profile/+1/", "/profile/-1/", "/profile/%201/"] {
        let (status, _) = send(&router, Method::GET, path, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
    }
    let (status, _) = send(&router, Method::GET, "/profile/1/", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_query_is_a_validation_error() {
    let (router, _system) = app();

    let (status, body) = send(&router, Method::GET, "/skills/?user=1&user=2", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["errors"]["non_field_errors"].is_array(), "{body}");

    let (status, body) = send(&router, Method::GET, "/skills/?user=abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["user"], json!(["A valid integer is required."]));
}

#[tokio::test]
async fn test_owned_collections_list_by_owner() {
    let (router, _system) = app();
    let profile = create_profile(&router).await;
    let owner = profile["id"].as_u64().unwrap();

    let payloads = [
        (
            "/projects/",
            json!({"user": owner, "title": "Engine", "description": "Difference engine"}),
        ),
        (
            "/skills/",
            json!({"user": owner, "name": "Rust", "proficiency_level": "adv", "category": "Languages"}),
        ),
        (
            "/experience/",
            json!({
                "user": owner,
                "job_title": "Engineer",
                "company_name": "Analytical Engines",
                "start_date": "2020-01-15",
                "responsibilities": "Computing",
            }),
        ),
    ];
    for (path, payload) in payloads {
        let (status, created) = send(&router, Method::POST, path, Some(&admin()), Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED, "{path}: {created}");

        let (status, listed) =
            send(&router, Method::GET, &format!("{path}?user={owner}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&Value> = listed.as_array().unwrap().iter().map(|r| &r["id"]).collect();
        assert_eq!(ids, vec![&created["id"]], "{path}");

        let (_, other) = send(&router, Method::GET, &format!("{path}?user=99"), None, None).await;
        assert_eq!(other, json!([]));
    }

    let (status, body) = send(&router, Method::GET, "/skills/?user=abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["user"], json!(["A valid integer is required."]));
}

#[tokio::test]
async fn test_duplicate_skill_is_a_validation_error() {
    let (router, _system) = app();
    let owner = create_profile(&router).await["id"].clone();
    let payload = json!({"user": owner, "name": "Rust", "proficiency_level": "int", "category": "Languages"});

    let (status, _) = send(&router, Method::POST, "/skills/", Some(&admin()), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, Method::POST, "/skills/", Some(&admin()), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["errors"]["non_field_errors"],
        json!(["The fields user, name must make a unique set."])
    );
}

#[tokio::test]
async fn test_deleting_profile_removes_owned_records() {
    let (router, _system) = app();
    let owner = create_profile(&router).await["id"].as_u64().unwrap();

    send(
        &router,
        Method::POST,
        "/projects/",
        Some(&admin()),
        Some(json!({"user": owner, "title": "Engine", "description": "Difference engine"})),
    )
    .await;
    send(
        &router,
        Method::POST,
        "/skills/",
        Some(&admin()),
        Some(json!({"user": owner, "name": "Rust", "proficiency_level": "beg", "category": "Languages"})),
    )
    .await;

    let (status, body) = send(&router, Method::DELETE, &format!("/profile/{owner}/"), Some(&admin()), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    for path in ["/profile/", "/projects/", "/skills/", "/experience/"] {
        let (_, listed) = send(&router, Method::GET, path, None, None).await;
        assert_eq!(listed, json!([]), "{path}");
    }
}

#[tokio::test]
async fn test_anonymous_contact_message() {
    let (router, _system) = app();

    let (status, body) = send(
        &router,
        Method::POST,
        "/messages/",
        None,
        Some(json!({
            "sender_name": "Grace",
            "sender_email": "grace@example.org",
            "subject": "Hello",
            "message_content": "Nice portfolio",
            "received_date": "1999-01-01T00:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["response_status"], "new");
    assert_eq!(body["is_read"], false);
    assert_eq!(body["response_text"], "");
    assert_ne!(body["received_date"], "1999-01-01T00:00:00Z");

    // Visitors cannot read messages back.
    let (status, body) = send(&router, Method::GET, "/messages/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "NOT_AUTHENTICATED");

    let (status, body) = send(&router, Method::GET, "/messages/", Some(&admin()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &router,
        Method::PATCH,
        "/messages/1/",
        Some(&admin()),
        Some(json!({"is_read": true, "response_status": "responded"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_read"], true);
    assert_eq!(body["response_status"], "responded");
}

#[tokio::test]
async fn test_writes_require_authentication() {
    let (router, _system) = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("{PREFIX}/projects/"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"user": 1, "title": "x", "description": "y"}"#))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));

    let wrong = format!("Basic {}", STANDARD.encode("admin:wrong"));
    let (status, body) = send(&router, Method::GET, "/projects/", Some(&wrong), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTHENTICATION_FAILED");
}

#[tokio::test]
async fn test_projects_list_in_display_order() {
    let (router, _system) = app();
    let owner = create_profile(&router).await["id"].clone();

    for (title, order) in [("Later", 2), ("Old first", 1), ("New first", 1)] {
        let (status, _) = send(
            &router,
            Method::POST,
            "/projects/",
            Some(&admin()),
            Some(json!({"user": owner, "title": title, "description": "d", "display_order": order})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, listed) = send(&router, Method::GET, "/projects/", None, None).await;
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["New first", "Old first", "Later"]);
}

#[tokio::test]
async fn test_put_requires_fields_and_patch_does_not() {
    let (router, _system) = app();
    let owner = create_profile(&router).await["id"].clone();
    let (_, project) = send(
        &router,
        Method::POST,
        "/projects/",
        Some(&admin()),
        Some(json!({"user": owner, "title": "Engine", "description": "d"})),
    )
    .await;
    let path = format!("/projects/{}/", project["id"]);

    let (status, body) = send(&router, Method::PUT, &path, Some(&admin()), Some(json!({"title": "Renamed"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["user"], json!(["This field is required."]));
    assert_eq!(body["errors"]["description"], json!(["This field is required."]));

    let (status, body) = send(&router, Method::PATCH, &path, Some(&admin()), Some(json!({"title": "Renamed"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["description"], "d");
}

#[tokio::test]
async fn test_unknown_ids_and_bad_bodies() {
    let (router, _system) = app();

    for path in ["/projects/42/", "/projects/abc/", "/skills/0/"] {
        let (status, body) = send(&router, Method::GET, path, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body, json!({"code": "NOT_FOUND", "detail": "Not found."}));
    }
    let (status, _) = send(&router, Method::DELETE, "/projects/42/", Some(&admin()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A reference to a missing profile is a field error, not a 404.
    let (status, body) = send(
        &router,
        Method::POST,
        "/projects/",
        Some(&admin()),
        Some(json!({"user": 7, "title": "Engine", "description": "d"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["user"], json!(["Invalid pk \"7\" - object does not exist."]));

    let (status, body) = send(&router, Method::POST, "/messages/", None, Some(json!(["not", "an", "object"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["non_field_errors"],
        json!(["Invalid data. Expected a dictionary, but got list."])
    );

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("{PREFIX}/messages/"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_technologies_route_is_opt_in() {
    let (router, _system) = app();
    let (status, _) = send(&router, Method::GET, "/technologies/", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (router, _system) = test_router(Config {
        expose_technologies: true,
        ..config()
    });
    let (status, _) = send(&router, Method::POST, "/technologies/", Some(&admin()), Some(json!({"name": "Rust"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, Method::POST, "/technologies/", Some(&admin()), Some(json!({"name": "Rust"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["name"], json!(["technology with this name already exists."]));

    let (_, listed) = send(&router, Method::GET, "/technologies/", None, None).await;
    assert_eq!(listed, json!([{"id": 1, "name": "Rust"}]));
}

#[tokio::test]
async fn test_health_is_outside_prefix() {
    let (router, _system) = app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
