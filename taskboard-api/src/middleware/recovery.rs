/// Panic recovery middleware
///
/// The outermost layer of the request pipeline. A panic anywhere below it is
/// caught, logged with its payload, and turned into a generic 500 response.
/// Panic details never reach the client.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

/// Builds the recovery layer for the router.
pub fn recovery_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic as fn(Box<dyn Any + Send + 'static>) -> Response)
}

/// Converts a caught panic into a logged 500 response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!("Request handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "an internal error occurred" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::Service as _;

    #[tokio::test]
    async fn test_panic_becomes_500() {
        async fn boom() -> &'static str {
            panic!("something went sideways");
        }

        let mut app = Router::new()
            .route("/boom", get(boom))
            .layer(recovery_layer());

        let response = app
            .call(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        // Generic message only; the panic payload stays in the logs
        assert_eq!(json["error"], "an internal error occurred");
        assert!(!json.to_string().contains("sideways"));
    }

    #[tokio::test]
    async fn test_healthy_requests_pass_through() {
        async fn ok() -> &'static str {
            "fine"
        }

        let mut app = Router::new().route("/ok", get(ok)).layer(recovery_layer());

        let response = app
            .call(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
