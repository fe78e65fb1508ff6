use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use server::{SESSION_COOKIE, ServerState, SessionStore, router};
use tower::ServiceExt;
use uuid::Uuid;

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    cookie: Option<String>,
    body: String,
}

impl Reply {
    /// JSON carried by the `datastar-patch-signals` event.
    fn patch(&self) -> Value {
        assert!(
            self.body.contains("event: datastar-patch-signals"),
            "{}",
            self.body
        );
        let data = self
            .body
            .lines()
            .find_map(|line| line.strip_prefix("data: signals "))
            .expect("signals data line");
        serde_json::from_str(data).unwrap()
    }

    fn session_id(&self) -> Uuid {
        let cookie = self.cookie.as_deref().expect("session cookie");
        let value = cookie
            .strip_prefix(&format!("{SESSION_COOKIE}="))
            .expect("session cookie name");
        Uuid::parse_str(value).unwrap()
    }
}

fn app() -> (Router, SessionStore) {
    app_with(SessionStore::default())
}

fn app_with(sessions: SessionStore) -> (Router, SessionStore) {
    let engine = engine::Engine::builder().build().unwrap();
    (router(ServerState::new(engine, sessions.clone())), sessions)
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().unwrap().split(';').next())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    Reply {
        status,
        content_type,
        cookie,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

async fn post(app: &Router, path: &str, body: Value, cookie: Option<&str>) -> Reply {
    let mut request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    send(app, request.body(Body::from(body.to_string())).unwrap()).await
}

async fn get(app: &Router, path: &str) -> Reply {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn valid_name_clears_error() {
    let (app, _) = app();
    let reply = post(&app, "/form/validate/name", json!({"name": "Acme Traders"}), None).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(
        reply
            .content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("text/event-stream"))
    );
    assert!(reply.cookie.is_some());
    assert_eq!(reply.patch(), json!({"hasError": false, "nameError": ""}));
}

#[tokio::test]
async fn invalid_phone_reports_reason() {
    let (app, _) = app();
    let reply = post(&app, "/form/validate/phone", json!({"phone": "5876543210"}), None).await;

    assert_eq!(
        reply.patch(),
        json!({"hasError": true, "phoneError": "Should start with 6 - 9"})
    );
}

#[tokio::test]
async fn postal_code_uses_state_from_same_session() {
    let (app, _) = app();
    let first = post(
        &app,
        "/form/validate/postalCode",
        json!({"state": "West Bengal", "postalCode": "700001"}),
        None,
    )
    .await;
    assert_eq!(first.patch()["hasError"], json!(false));

    let cookie = first.cookie.clone();
    let second = post(
        &app,
        "/form/validate/postalCode",
        json!({"postalCode": 699999}),
        cookie.as_deref(),
    )
    .await;
    assert_eq!(
        second.patch(),
        json!({"hasError": true, "postalCodeError": "Must be within [700001 - 743711]"})
    );
    assert_eq!(second.session_id(), first.session_id());
}

#[tokio::test]
async fn sessions_do_not_share_state() {
    let (app, _) = app();
    post(
        &app,
        "/form/validate/state",
        json!({"state": "West Bengal"}),
        None,
    )
    .await;

    let other = post(
        &app,
        "/form/validate/postalCode",
        json!({"postalCode": 700001}),
        None,
    )
    .await;
    assert_eq!(
        other.patch(),
        json!({"hasError": true, "postalCodeError": "Must be within [0 - 0]"})
    );
}

#[tokio::test]
async fn optional_line_is_never_required() {
    let (app, _) = app();
    let reply = post(&app, "/form/validate/line2", json!({"line2": ""}), None).await;
    assert_eq!(
        reply.patch(),
        json!({"hasError": false, "line1Error": "", "line2Error": "", "line3Error": ""})
    );

    let reply = post(&app, "/form/validate/line2", json!({"line2": "ab"}), None).await;
    assert_eq!(
        reply.patch(),
        json!({"hasError": true, "line1Error": "", "line2Error": "Too short", "line3Error": ""})
    );

    let reply = post(&app, "/form/validate/line1", json!({"line1": ""}), None).await;
    assert_eq!(
        reply.patch(),
        json!({"hasError": true, "line1Error": "Required", "line2Error": "", "line3Error": ""})
    );
}

#[tokio::test]
async fn decode_failure_leaves_form_untouched() {
    let (app, sessions) = app();
    let first = post(&app, "/form/validate/name", json!({"name": "Acme"}), None).await;
    let cookie = first.cookie.clone();

    let request = Request::builder()
        .method("POST")
        .uri("/form/validate/name")
        .header(header::COOKIE, cookie.as_deref().unwrap())
        .body(Body::from(r#"{"name": "Other", "postalCode": "abc"}"#))
        .unwrap();
    let reply = send(&app, request).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let form = sessions.snapshot(first.session_id()).await.unwrap();
    assert_eq!(form.name, "Acme");
}

#[tokio::test]
async fn unknown_field_is_not_found() {
    let (app, _) = app();
    let reply = post(&app, "/form/validate/nickname", json!({}), None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = post(&app, "/form/validate/product/0/colour", json!({}), None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_line_item_index_is_a_decode_error() {
    let (app, sessions) = app();
    let reply = post(&app, "/form/validate/product/abc/hsn", json!({}), None).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_str(&reply.body).unwrap();
    assert!(body["error"].is_string());
    assert_eq!(sessions.len().await, 0);
}

#[tokio::test]
async fn cookieless_clients_cannot_grow_sessions_past_the_cap() {
    let (app, sessions) = app_with(SessionStore::with_idle_minutes(60, 25));
    for _ in 0..200 {
        let reply = post(&app, "/form/validate/name", json!({"name": "Acme"}), None).await;
        assert_eq!(reply.status, StatusCode::OK);
    }
    assert_eq!(sessions.len().await, 25);
}

#[tokio::test]
async fn line_item_fields_are_addressed_by_index() {
    let (app, _) = app();
    let body = json!({
        "products": [
            {"hsn": "7214", "quantity": 1},
            {"hsn": "123", "quantity": "0", "sellPrice": "9.5"},
        ]
    });

    let reply = post(&app, "/form/validate/product/1/hsn", body.clone(), None).await;
    assert_eq!(
        reply.patch(),
        json!({"hasError": true, "hsnError": "Must be 2, 4, 6 or 8 digits"})
    );

    let reply = post(&app, "/form/validate/product/0/hsn", body.clone(), None).await;
    assert_eq!(reply.patch(), json!({"hasError": false, "hsnError": ""}));

    let reply = post(&app, "/form/validate/product/1/quantity", body, None).await;
    assert_eq!(
        reply.patch(),
        json!({"hasError": true, "quantityError": "Must be greater than 0"})
    );
}

#[tokio::test]
async fn get_reads_signals_from_query() {
    let (app, _) = app();
    let reply = get(&app, "/form/validate/gst?datastar=%7B%22gst%22%3A40.1%7D").await;
    assert_eq!(
        reply.patch(),
        json!({"hasError": true, "gstError": "Must be between 0 and 40"})
    );

    let reply = get(&app, "/form/validate/gst").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn states_are_listed_sorted() {
    let (app, _) = app();
    let reply = get(&app, "/form/states").await;
    assert_eq!(reply.status, StatusCode::OK);

    let body: Value = serde_json::from_str(&reply.body).unwrap();
    let names: Vec<&str> = body["states"]
        .as_array()
        .unwrap()
        .iter()
        .map(|state| state["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), engine::EXPECTED_STATES);
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn single_state_lookup() {
    let (app, _) = app();
    let reply = get(&app, "/form/states/West%20Bengal").await;
    assert_eq!(reply.status, StatusCode::OK);
    let body: Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(body["min_code"], json!(700001));
    assert_eq!(body["max_code"], json!(743711));

    let reply = get(&app, "/form/states/Atlantis").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}
