//! HTTP 요청 metrics middleware.
//!
//! `path` 라벨은 요청 URI가 아니라 매칭된 라우트 템플릿(`/api/users/{id}/role`)입니다.
//! 어떤 라우트에도 매칭되지 않은 요청은 모두 [`UNMATCHED_ROUTE`] 하나로 묶입니다.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::metrics::{record_http_duration, record_http_request, record_http_response};

/// 매칭되지 않은 요청의 `path` 라벨.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// 요청의 라우트 라벨.
pub fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// HTTP 메트릭을 수집하는 미들웨어 레이어.
///
/// `Router::layer`로 붙여야 `MatchedPath`를 볼 수 있습니다.
/// 기록하는 메트릭:
/// - `http_requests_total` (method, path)
/// - `http_responses_total` (method, path, status)
/// - `http_request_duration_seconds` (method, path)
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = route_label(&request);

    record_http_request(&method, &route);
    let response = next.run(request).await;

    record_http_response(&method, &route, response.status().as_u16());
    record_http_duration(&method, &route, start.elapsed().as_secs_f64());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, StatusCode},
        middleware,
        routing::put,
        Router,
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    async fn ok_handler() -> &'static str {
        "OK"
    }

    fn app() -> Router {
        Router::new()
            .route("/api/users/{id}/role", put(ok_handler))
            .layer(middleware::from_fn(metrics_layer))
    }

    fn request(method: Method, uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn request_series(rendered: &str) -> Vec<&str> {
        rendered
            .lines()
            .filter(|line| line.starts_with("http_requests_total{"))
            .collect()
    }

    #[tokio::test]
    async fn test_route_template_used_as_label() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        for id in [1, 17, 42] {
            let response = app()
                .oneshot(request(Method::PUT, &format!("/api/users/{id}/role")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let rendered = handle.render();
        let series = request_series(&rendered);
        assert_eq!(series.len(), 1, "{rendered}");
        assert!(series[0].contains(r#"path="/api/users/{id}/role""#));
        assert!(series[0].ends_with(" 3"));
    }

    #[tokio::test]
    async fn test_unmatched_paths_share_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        for i in 0..100 {
            let response = app()
                .oneshot(request(Method::GET, &format!("/scan-{i}x/wp-admin")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }

        let rendered = handle.render();
        let series = request_series(&rendered);
        assert_eq!(series.len(), 1, "{rendered}");
        assert!(series[0].contains(r#"path="unmatched""#));
    }
}
