//! Request builders and body readers for router tests.

use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, header};
use serde_json::Value;

use crate::auth::MockAuth;

/// Build a request with an optional JSON body and optional signed-in caller.
pub fn json_request(
    method: &str,
    uri: &str,
    body: Option<Value>,
    auth: Option<&MockAuth>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::COOKIE, auth.cookie());
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("build request")
}

/// Read the whole response body as JSON. Empty bodies read as `Value::Null`.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

/// All `Set-Cookie` header values on a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_owned))
        .collect()
}

/// Pull `name=value` out of the `Set-Cookie` headers, ready to send back as `Cookie`.
pub fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response).into_iter().find_map(|c| {
        let pair = c.split(';').next()?.trim().to_owned();
        pair.starts_with(&format!("{name}=")).then_some(pair)
    })
}
