//! Request parameter extraction.
//!
//! A parameter can arrive as a path segment, a query parameter or a field
//! of a JSON object body. When several carry the same name, the path wins
//! over the query, and the query over the body.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::gateway::RequestContext;
use crate::{MimirError, Result};

/// Every parameter of one request, by source.
#[derive(Debug, Default)]
pub struct RequestParams {
    path: HashMap<String, String>,
    query: HashMap<String, String>,
    body: Option<Map<String, Value>>,
    content_type: Option<String>,
}

impl RequestParams {
    /// Assemble parameters from already separated sources.
    ///
    /// `body` is the raw request body; it is parsed only when `content_type`
    /// declares JSON.
    pub fn from_parts(
        path: HashMap<String, String>,
        query: HashMap<String, String>,
        content_type: Option<String>,
        body: &[u8],
    ) -> Result<Self> {
        let body = match &content_type {
            Some(ct) if is_json(ct) && !body.is_empty() => Some(parse_object(body)?),
            _ => None,
        };
        Ok(Self {
            path,
            query,
            body,
            content_type,
        })
    }

    /// Scalar value of a parameter, rendered as a string.
    pub fn get(&self, name: &str) -> Option<String> {
        self.path
            .get(name)
            .or_else(|| self.query.get(name))
            .cloned()
            .or_else(|| self.field(name).and_then(scalar))
    }

    /// Whether the parameter was given in any source.
    pub fn has(&self, name: &str) -> bool {
        self.path.contains_key(name)
            || self.query.contains_key(name)
            || self.field(name).is_some_and(|v| !v.is_null())
    }

    /// Fail with every missing name at once.
    pub fn require(&self, names: &[&str]) -> Result<()> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| !self.has(name))
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MimirError::MissingParameter(missing))
        }
    }

    pub fn text(&self) -> Result<String> {
        self.get("text").ok_or_else(|| {
            if self.has("text") {
                MimirError::invalid("text", "expected a string")
            } else {
                MimirError::missing("text")
            }
        })
    }

    /// Boolean flag: present with an empty value, or `true`.
    pub fn flag(&self, name: &str) -> bool {
        match self.path.get(name).or_else(|| self.query.get(name)) {
            Some(value) => truthy(value),
            None => match self.field(name) {
                Some(Value::Bool(b)) => *b,
                Some(Value::String(s)) => truthy(s),
                _ => false,
            },
        }
    }

    /// Reject requests that did not send a JSON object body.
    pub fn expect_json(&self) -> Result<()> {
        match &self.content_type {
            Some(ct) if is_json(ct) => {}
            other => {
                return Err(MimirError::InvalidContentType {
                    expected: "application/json",
                    actual: other.clone().unwrap_or_else(|| "none".to_string()),
                });
            }
        }
        if self.body.is_none() {
            return Err(MimirError::InvalidJsonBody("request body is empty".to_string()));
        }
        Ok(())
    }

    /// A structured body field.
    pub fn body_field<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.field(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| MimirError::invalid(name, e.to_string())),
        }
    }

    /// The request context shared by every command.
    pub fn context(&self) -> Result<RequestContext> {
        Ok(RequestContext {
            text: self.text()?,
            language: self.get("lang"),
            domain: self.get("domain"),
            distribution: self.flag("distribution"),
        })
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.body.as_ref()?.get(name)
    }
}

impl<S: Send + Sync> FromRequest<S> for RequestParams {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let path = Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();
        let Query(query) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|e| MimirError::invalid("query", e.body_text()))?;
        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| MimirError::invalid("body", e.body_text()))?;

        Ok(Self::from_parts(path, query, content_type, &bytes)?)
    }
}

fn is_json(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(MimirError::InvalidJsonBody("expected a JSON object".to_string())),
        Err(e) => Err(MimirError::InvalidJsonBody(e.to_string())),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn truthy(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("true")
}
