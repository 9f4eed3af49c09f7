//! Request/response channel handed to providers during validation.
//!
//! The dispatcher never looks inside these types. Providers read the login
//! request (headers, form fields) and may write a challenge to the response.

use anyhow::{Context, Result};
use axum::{
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        request::Parts,
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::HashMap;
use url::form_urlencoded;

use super::field::MFA_LOGIN_FIELD_NAME;

/// Login request as seen by MFA providers.
#[derive(Debug)]
pub struct MfaRequest {
    head: Parts,
    form: HashMap<String, String>,
}

impl MfaRequest {
    #[must_use]
    pub fn new(head: Parts) -> Self {
        Self {
            head,
            form: HashMap::new(),
        }
    }

    /// Build a request from its head and an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn with_form(head: Parts, body: &[u8]) -> Self {
        Self {
            head,
            form: parse_form(body),
        }
    }

    #[must_use]
    pub fn head(&self) -> &Parts {
        &self.head
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    /// First value of a form field. Body fields take precedence over the query string.
    #[must_use]
    pub fn form_value(&self, name: &str) -> Option<String> {
        if let Some(value) = self.form.get(name) {
            return Some(value.clone());
        }

        self.head
            .uri
            .query()
            .and_then(|query| parse_form(query.as_bytes()).remove(name))
    }

    /// The submitted MFA token, if the field is present and not blank.
    #[must_use]
    pub fn mfa_token(&self) -> Option<String> {
        self.form_value(MFA_LOGIN_FIELD_NAME)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

fn parse_form(body: &[u8]) -> HashMap<String, String> {
    let mut form = HashMap::new();
    for (key, value) in form_urlencoded::parse(body) {
        form.entry(key.into_owned()).or_insert_with(|| value.into_owned());
    }
    form
}

/// Response sink providers may write a challenge into.
#[derive(Debug, Default)]
pub struct MfaResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Option<String>,
}

impl MfaResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn write_html(&mut self, status: StatusCode, body: impl Into<String>) {
        self.status = Some(status);
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        self.body = Some(body.into());
    }

    /// Serialize `payload` as the JSON body.
    ///
    /// # Errors
    /// Returns an error if `payload` cannot be serialized.
    pub fn write_json<T: Serialize>(&mut self, status: StatusCode, payload: &T) -> Result<()> {
        let body = serde_json::to_string(payload).context("Failed to serialize MFA response")?;
        self.status = Some(status);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(body);
        Ok(())
    }

    /// Whether a provider wrote anything the caller must send back.
    #[must_use]
    pub fn is_written(&self) -> bool {
        self.status.is_some() || self.body.is_some()
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl IntoResponse for MfaResponse {
    fn into_response(self) -> Response {
        (
            self.status.unwrap_or(StatusCode::OK),
            self.headers,
            self.body.unwrap_or_default(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde_json::json;

    fn head(uri: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .method("POST")
            .uri(uri)
            .body(())
            .map(Request::into_parts)
            .unwrap_or_else(|_| Request::new(()).into_parts());
        parts
    }

    #[test]
    fn test_form_value_precedence() {
        let request = MfaRequest::with_form(
            head("/login?mfa-token=from-query&go=%2Fhome"),
            b"mfa-token=123456&mfa-token=654321&user=alice",
        );

        assert_eq!(request.form_value("mfa-token").as_deref(), Some("123456"));
        assert_eq!(request.form_value("go").as_deref(), Some("/home"));
        assert_eq!(request.form_value("user").as_deref(), Some("alice"));
        assert_eq!(request.form_value("missing"), None);
    }

    #[test]
    fn test_mfa_token() {
        let request = MfaRequest::with_form(head("/login"), b"mfa-token=+123+456+");
        assert_eq!(request.mfa_token().as_deref(), Some("123 456"));

        let blank = MfaRequest::with_form(head("/login"), b"mfa-token=%20");
        assert_eq!(blank.mfa_token(), None);

        let absent = MfaRequest::new(head("/login"));
        assert_eq!(absent.mfa_token(), None);
    }

    #[test]
    fn test_response_sink() -> Result<()> {
        let mut response = MfaResponse::new();
        assert!(!response.is_written());

        response.write_json(StatusCode::UNAUTHORIZED, &json!({"challenge": "push"}))?;
        assert!(response.is_written());
        assert_eq!(response.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(response.body(), Some(r#"{"challenge":"push"}"#));

        let response = response.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
        Ok(())
    }

    #[test]
    fn test_response_html() {
        let mut response = MfaResponse::new();
        response.write_html(StatusCode::OK, "<form></form>");
        assert_eq!(response.body(), Some("<form></form>"));
        assert_eq!(
            response.into_response().headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("text/html; charset=utf-8"))
        );
    }
}
