// Integration tests for the dashboard HTTP API.
//
// Each test builds the router over a temporary static directory and drives it
// with `tower::ServiceExt::oneshot`, no socket involved.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use meet_dashboard::{create_router, AppState, PresenceStore, Templates};
use tempfile::TempDir;
use tower::ServiceExt;

const MEETING_URL: &str = "https://zoom.us/j/123?pwd=a&b";

struct TestApp {
    _dir: TempDir,
    presence: PresenceStore,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("available.html"),
            "<h1>Available</h1><a href=\"{{.}}\">join</a>",
        )
        .unwrap();
        std::fs::write(dir.path().join("away.html"), "<h1>Away</h1><p>{{.}}</p>").unwrap();
        std::fs::write(dir.path().join("style.css"), "body { color: red; }").unwrap();

        let templates = Templates::load(dir.path()).unwrap();
        let presence = PresenceStore::new();
        let state = AppState::new(presence.clone(), templates, MEETING_URL, dir.path());

        Self {
            _dir: dir,
            presence,
            router: create_router(state),
        }
    }

    async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_index_renders_away_page_initially() {
    let app = TestApp::new();
    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    assert_eq!(body_string(response).await, "<h1>Away</h1><p></p>");
}

#[tokio::test]
async fn test_index_renders_available_page_with_meeting_url() {
    let app = TestApp::new();
    app.presence.set_present(true).await;

    let body = body_string(app.get("/").await).await;
    assert_eq!(
        body,
        "<h1>Available</h1><a href=\"https://zoom.us/j/123?pwd=a&amp;b\">join</a>"
    );
}

#[tokio::test]
async fn test_presence_true_is_heartbeat() {
    let app = TestApp::new();

    let response = app.get("/dashboard/presence?presence=true").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Present: true");

    let state = app.presence.snapshot().await;
    assert!(state.present);
    assert_eq!(state.fail_count, 0);
    assert!(state.last_heartbeat.is_some());
}

#[tokio::test]
async fn test_presence_other_values_mark_away_keeping_message() {
    let app = TestApp::new();
    app.presence.set_present(true).await;
    app.presence.set_message("brb").await;

    for uri in [
        "/dashboard/presence?presence=false",
        "/dashboard/presence?presence=TRUE",
        "/dashboard/presence",
    ] {
        app.presence.set_present(true).await;
        let response = app.get(uri).await;
        assert_eq!(body_string(response).await, "Present: false", "{}", uri);

        let state = app.presence.snapshot().await;
        assert!(!state.present);
        assert_eq!(state.message, "brb");
    }
}

#[tokio::test]
async fn test_presence_first_value_wins() {
    let app = TestApp::new();
    let response = app
        .get("/dashboard/presence?presence=true&presence=false")
        .await;
    assert_eq!(body_string(response).await, "Present: true");
}

#[tokio::test]
async fn test_away_reason_set_and_clear() {
    let app = TestApp::new();

    let response = app.get("/dashboard/awayreason?awayreason=Out%20to%20lunch").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.presence.snapshot().await.message, "Out to lunch");

    let body = body_string(app.get("/").await).await;
    assert_eq!(body, "<h1>Away</h1><p>Out to lunch</p>");

    app.get("/dashboard/awayreason?awayreason=").await;
    assert!(app.presence.snapshot().await.message.is_empty());

    app.presence.set_message("again").await;
    app.get("/dashboard/awayreason").await;
    assert!(app.presence.snapshot().await.message.is_empty());
}

#[tokio::test]
async fn test_away_reason_is_escaped_on_page() {
    let app = TestApp::new();
    app.get("/dashboard/awayreason?awayreason=%3Cb%3Ehi%3C%2Fb%3E")
        .await;

    assert_eq!(app.presence.snapshot().await.message, "<b>hi</b>");
    let body = body_string(app.get("/").await).await;
    assert_eq!(body, "<h1>Away</h1><p>&lt;b&gt;hi&lt;/b&gt;</p>");
}

#[tokio::test]
async fn test_state_json() {
    let app = TestApp::new();
    app.get("/dashboard/presence?presence=true").await;
    app.get("/dashboard/awayreason?awayreason=meeting").await;

    let response = app.get("/dashboard/state").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({ "presence": true, "presenceMessage": "meeting" })
    );
}

#[tokio::test]
async fn test_static_assets_served_under_dashboard() {
    let app = TestApp::new();

    let response = app.get("/dashboard/style.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "body { color: red; }");

    let response = app.get("/dashboard/missing.js").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_unknown_paths_render_dashboard_page() {
    let app = TestApp::new();
    app.presence.set_message("gone fishing").await;

    let response = app.get("/foo").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        "<h1>Away</h1><p>gone fishing</p>"
    );

    app.presence.set_present(true).await;
    let body = body_string(app.get("/some/deep/path").await).await;
    assert!(body.starts_with("<h1>Available</h1>"));
}

#[tokio::test]
async fn test_bundled_pages_refresh_on_reason_change() {
    let static_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
    let templates = Templates::load(&static_dir).unwrap();
    let presence = PresenceStore::new();
    let router = create_router(AppState::new(
        presence.clone(),
        templates,
        MEETING_URL,
        static_dir,
    ));

    presence.set_message("Out to lunch").await;
    let response = router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let page = body_string(response).await;
    assert!(page.contains("<p class=\"reason\">Out to lunch</p>"));
    assert!(page.contains("/dashboard/refresh.js"));

    // The refresh script watches the away reason as well as the presence flag
    let response = router
        .oneshot(
            Request::builder()
                .uri("/dashboard/refresh.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let script = body_string(response).await;
    assert!(script.contains("state.presenceMessage !== reason"));
    assert!(script.contains(".reason"));
}
