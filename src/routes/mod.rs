use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use docugenie_core::ToolKind;
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::errors::HostError;

#[derive(Clone)]
struct SpaState {
    index: Arc<PathBuf>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// Builds the host router: health probe, deep links into each tool, then
/// static assets from the dist directory.
pub fn router(config: &ServerConfig) -> Router {
    let index = config.index_path();
    let state = SpaState { index: Arc::new(index.clone()) };

    let mut app = Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(spa_index));
    for tool in ToolKind::ALL {
        let base = tool.base_path();
        app = app
            .route(base, get(spa_index))
            .route(&format!("{base}/{{id}}"), get(spa_index));
    }

    // Unknown paths still get the app shell so it can render its own
    // not-found view; ServeDir marks the response 404.
    let assets = ServeDir::new(&config.dist_dir).not_found_service(ServeFile::new(index));

    app.fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET `/healthz`
async fn healthz() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// GET `/`, `/{tool}` and `/{tool}/{id}`: the SPA entry point. The id is
/// validated client-side.
async fn spa_index(State(state): State<SpaState>) -> Result<Html<String>, HostError> {
    match tokio::fs::read_to_string(state.index.as_path()).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(HostError::MissingIndex { path: state.index.to_path_buf() })
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    const INDEX: &str = "<!DOCTYPE html><html><body>docugenie</body></html>";

    fn dist(with_index: bool) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        if with_index {
            std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
        }
        std::fs::write(dir.path().join("app.js"), "console.log('hi');").unwrap();
        dir
    }

    fn app(dir: &TempDir) -> Router {
        router(&ServerConfig { port: 0, dist_dir: dir.path().to_path_buf() })
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let dir = dist(true);
        let (status, body) = fetch(app(&dir), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn tool_deep_links_load_the_app() {
        let dir = dist(true);
        for uri in ["/", "/mark-polish", "/dev-docs/2", "/docu-buddy/abc"] {
            let (status, body) = fetch(app(&dir), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, INDEX, "{uri}");
        }
    }

    #[tokio::test]
    async fn serves_static_assets() {
        let dir = dist(true);
        let (status, body) = fetch(app(&dir), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log('hi');");
    }

    #[tokio::test]
    async fn unknown_paths_are_404_with_the_app_shell() {
        let dir = dist(true);
        let (status, body) = fetch(app(&dir), "/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, INDEX);

        let (status, _) = fetch(app(&dir), "/dev-docs/2/extra").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_build_is_reported() {
        let dir = dist(false);
        let (status, body) = fetch(app(&dir), "/dev-docs").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("index.html"));
    }
}
