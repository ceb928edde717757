// SPDX-License-Identifier: Apache-2.0

use axum::body::Body;
use axum::http::header::HeaderMap;
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

fn put_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        "access-control-allow-origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET,POST,PATCH,DELETE,OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("content-type,x-request-id"),
    );
}

/// The catalog is a public storefront; every origin may read it and the
/// admin UI is served from arbitrary hosts, so the policy is allow-all.
pub(crate) async fn cors_middleware(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        put_cors_headers(resp.headers_mut());
        return resp;
    }
    let mut resp = next.run(req).await;
    put_cors_headers(resp.headers_mut());
    resp
}
