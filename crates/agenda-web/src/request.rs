//! Explicit request context.
//!
//! Every controller action receives an immutable descriptor of the
//! request (method, path, query map, body map, headers) instead of
//! reading ambient request state. Bodies that fail to parse degrade to
//! an empty field map; malformed input is never an error.

use std::collections::HashMap;

use axum::{
  body::Body,
  extract::{Form, FromRequest as _, Query, Request},
  http::{HeaderMap, Method, header},
};
use bytes::Bytes;
use serde_json::Value;

/// The per-request field map. JSON bodies keep their native value types;
/// form bodies arrive as strings.
pub type BodyMap = serde_json::Map<String, Value>;

/// Bodies beyond this size are treated as empty rather than buffered.
const BODY_LIMIT: usize = 1024 * 1024;

pub struct RequestContext {
  pub method:  Method,
  pub path:    String,
  pub query:   HashMap<String, String>,
  pub body:    BodyMap,
  pub headers: HeaderMap,
}

impl RequestContext {
  /// Consume an incoming request into a context.
  pub async fn from_request(req: Request<Body>) -> Self {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let headers = req.headers().clone();

    let query = Query::<HashMap<String, String>>::try_from_uri(req.uri())
      .map(|Query(map)| map)
      .unwrap_or_default();

    let body = parse_body(req).await;

    Self { method, path, query, body, headers }
  }

  pub fn is_post(&self) -> bool {
    self.method == Method::POST
  }

  /// Background/AJAX fetches are flagged by the client with the
  /// `X-Requested-With` header; the comparison is case-insensitive.
  pub fn is_ajax(&self) -> bool {
    self
      .headers
      .get("x-requested-with")
      .and_then(|v| v.to_str().ok())
      .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"))
  }

  pub fn query_param(&self, key: &str) -> Option<&str> {
    self.query.get(key).map(String::as_str)
  }

  pub fn has_field(&self, key: &str) -> bool {
    self.body.contains_key(key)
  }

  /// Field value as text, regardless of the body flavour it arrived in.
  pub fn field_str(&self, key: &str) -> Option<String> {
    match self.body.get(key)? {
      Value::String(s) => Some(s.clone()),
      Value::Number(n) => Some(n.to_string()),
      Value::Bool(b) => Some(b.to_string()),
      _ => None,
    }
  }

  /// Field value under loose boolean coercion: `"0"`, `""`, `0`, `null`
  /// and `false` are falsy; any other present value is truthy.
  pub fn field_bool(&self, key: &str) -> Option<bool> {
    match self.body.get(key)? {
      Value::Bool(b) => Some(*b),
      Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
      Value::String(s) => Some(!s.is_empty() && s != "0"),
      Value::Null => Some(false),
      _ => Some(true),
    }
  }

  /// Field value as a record identifier.
  pub fn field_id(&self, key: &str) -> Option<i64> {
    match self.body.get(key)? {
      Value::Number(n) => n.as_i64(),
      Value::String(s) => s.trim().parse().ok(),
      _ => None,
    }
  }
}

async fn parse_body(req: Request<Body>) -> BodyMap {
  let content_type = req
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default()
    .to_string();

  if content_type.starts_with("application/json") {
    let bytes = collect_body(req).await;
    match serde_json::from_slice::<Value>(&bytes) {
      Ok(Value::Object(map)) => map,
      _ => BodyMap::new(),
    }
  } else if content_type.starts_with("application/x-www-form-urlencoded") {
    match Form::<HashMap<String, String>>::from_request(req, &()).await {
      Ok(Form(map)) => map
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect(),
      Err(_) => BodyMap::new(),
    }
  } else {
    BodyMap::new()
  }
}

async fn collect_body(req: Request<Body>) -> Bytes {
  axum::body::to_bytes(req.into_body(), BODY_LIMIT)
    .await
    .unwrap_or_default()
}
