//! Failure alert headers for rejected requests.
//!
//! Handlers reject a request with an [`AppError`](crate::error::AppError),
//! which leaves a [`FailureAlert`] extension on the response. This middleware
//! adds the matching `X-{app}-error` and `X-{app}-params` headers.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::FailureAlert;
use crate::headers::AlertHeaders;

/// Add failure alert headers to responses carrying a [`FailureAlert`].
pub async fn failure_alert_middleware(
    State(alerts): State<AlertHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    if let Some(alert) = response.extensions_mut().remove::<FailureAlert>() {
        let headers = alerts.failure(alert.entity_name, alert.error_key);
        response.headers_mut().extend(headers);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use super::*;
    use crate::error::AppError;

    fn app() -> Router {
        let alerts = AlertHeaders::new("onlineShopApp").unwrap();
        Router::new()
            .route(
                "/rejected",
                get(|| async {
                    Err::<(), _>(AppError::bad_request("wishList", "idnull", "Invalid id"))
                }),
            )
            .route("/ok", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                alerts,
                failure_alert_middleware,
            ))
    }

    #[tokio::test]
    async fn test_rejected_request_gets_failure_alert() {
        let response = app()
            .oneshot(Request::builder().uri("/rejected").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("x-onlineshopapp-error").unwrap(),
            "error.idnull"
        );
        assert_eq!(
            response.headers().get("x-onlineshopapp-params").unwrap(),
            "wishList"
        );
    }

    #[tokio::test]
    async fn test_successful_request_is_untouched() {
        let response = app()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("x-onlineshopapp-error").is_none());
    }
}
