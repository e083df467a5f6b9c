//! JSON response builders

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE, SERVER,
};
use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::json;

pub type BoxBody = Full<Bytes>;

const SERVER_NAME: &str = concat!("platebook/", env!("CARGO_PKG_VERSION"));

/// JSON response with the given status
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let bytes = match serde_json::to_vec(body) {
        Ok(bytes) => bytes,
        Err(_) => {
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    };

    let mut response = Response::new(Full::new(Bytes::from(bytes)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// `{"message": ...}` response
pub fn message_response(status: StatusCode, message: &str) -> Response<BoxBody> {
    let body = json!({ "message": message }).to_string();

    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Empty 204 answer to a CORS preflight
pub fn preflight_response() -> Response<BoxBody> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}

/// Stamp server and permissive CORS headers on a response
pub fn with_common_headers(mut response: Response<BoxBody>) -> Response<BoxBody> {
    let headers = response.headers_mut();
    headers.insert(SERVER, HeaderValue::from_static(SERVER_NAME));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, DELETE, OPTIONS"),
    );
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("3600"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_message_response() {
        let response = message_response(StatusCode::UNAUTHORIZED, "Token is missing");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"message":"Token is missing"}"#);
    }

    #[test]
    fn test_common_headers() {
        let response = with_common_headers(preflight_response());
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(response.headers()[SERVER].to_str().unwrap().starts_with("platebook/"));
    }
}
