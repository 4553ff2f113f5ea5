//! Request logging and `x-request-id` handling.

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};

fn request_id(request: &Request) -> String {
    request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "server error"
    } else if status.is_client_error() {
        "client error"
    } else {
        "ok"
    }
}

/// Logs each request once on arrival and once on completion, at a level
/// chosen by the status class
pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let req_id = request_id(&request);

    tracing::debug!(request_id = %req_id, method = %method, path = %path, "request started");

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    macro_rules! finished {
        ($level:ident) => {
            tracing::$level!(
                request_id = %req_id,
                method = %method,
                path = %path,
                status = status.as_u16(),
                duration_ms,
                outcome = outcome(status),
                "request finished"
            )
        };
    }

    if status.is_server_error() {
        finished!(error);
    } else if status.is_client_error() {
        finished!(warn);
    } else {
        finished!(info);
    }

    response
}

pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_by_status_class() {
        assert_eq!(outcome(StatusCode::OK), "ok");
        assert_eq!(outcome(StatusCode::CONFLICT), "client error");
        assert_eq!(outcome(StatusCode::BAD_GATEWAY), "server error");
    }
}
