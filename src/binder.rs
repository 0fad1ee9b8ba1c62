//! Request binding with validation.
//!
//! Each extractor deserializes its part of the request and then runs
//! [`validate_struct`] on the result. The first bind error short-circuits with
//! [`BindError::Bind`]; validation only runs after a successful bind.

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::{
        rejection::RawPathParamsRejection, FromRequest, FromRequestParts, Path, Query, RawPathParams,
        Request,
    },
    http::{self, header, request::Parts, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::params::{from_fields, text_fields, FieldValue, Fields};
use crate::validation::{validate_struct, Validate, ValidationErrors};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Error, Debug)]
pub enum BindError {
    #[error("{0}")]
    Bind(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl IntoResponse for BindError {
    fn into_response(self) -> Response {
        let body = match &self {
            BindError::Bind(message) => json!({ "message": message }),
            BindError::Validation(errors) => json!({
                "message": self.to_string(),
                "errors": errors,
            }),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Path parameters, validated
#[derive(Debug, Clone)]
pub struct ValidatedPath<T>(pub T);

/// Query string, validated
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

/// Request headers keyed by lower-case name, validated
#[derive(Debug, Clone)]
pub struct ValidatedHeaders<T>(pub T);

/// JSON or form body, validated
#[derive(Debug, Clone)]
pub struct ValidatedBody<T>(pub T);

/// Path parameters, then the query string (GET/DELETE/HEAD), then the body,
/// merged into one value. Later sources overwrite fields of earlier ones.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

/// What a request body contributes to binding
enum BodyFields {
    /// JSON object members or form pairs
    Fields(Fields),
    /// A JSON body that is not an object; bound as a whole
    Value(Value),
}

pub async fn bind_path<T, S>(parts: &mut Parts, state: &S) -> Result<T, BindError>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    Path::<T>::from_request_parts(parts, state)
        .await
        .map(|Path(value)| value)
        .map_err(|rejection| BindError::Bind(rejection.body_text()))
}

pub async fn bind_query<T, S>(parts: &mut Parts, state: &S) -> Result<T, BindError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    Query::<T>::from_request_parts(parts, state)
        .await
        .map(|Query(value)| value)
        .map_err(|rejection| BindError::Bind(rejection.body_text()))
}

/// Header values are parsed into the field types. Repeated headers bind
/// their first value; values that are not visible ASCII are skipped.
pub fn bind_headers<T: DeserializeOwned>(headers: &HeaderMap) -> Result<T, BindError> {
    let mut fields = Fields::new();
    for (name, value) in headers {
        if let Ok(text) = value.to_str() {
            fields
                .entry(name.as_str().to_string())
                .or_insert_with(|| FieldValue::Text(text.to_string()));
        }
    }
    deserialize_fields(fields, "headers")
}

pub async fn bind_body<T, S>(req: Request, state: &S) -> Result<T, BindError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    match read_body(req, state).await? {
        BodyFields::Fields(fields) => deserialize_fields(fields, "the request body"),
        BodyFields::Value(value) => serde_json::from_value(value)
            .map_err(|e| BindError::Bind(format!("Failed to deserialize the request body: {}", e))),
    }
}

fn deserialize_fields<T: DeserializeOwned>(fields: Fields, source: &str) -> Result<T, BindError> {
    from_fields(fields).map_err(|e| BindError::Bind(format!("Failed to deserialize {}: {}", source, e)))
}

async fn path_fields<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<Fields, BindError> {
    match RawPathParams::from_request_parts(parts, state).await {
        Ok(params) => Ok(text_fields(params.iter())),
        // Outside a router there are simply no path parameters
        Err(RawPathParamsRejection::MissingPathParams(_)) => Ok(Fields::new()),
        Err(rejection) => Err(BindError::Bind(rejection.body_text())),
    }
}

fn query_fields(uri: &Uri) -> Result<Fields, BindError> {
    Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| text_fields(pairs))
        .map_err(|rejection| BindError::Bind(rejection.body_text()))
}

/// An empty body contributes no fields, so defaulted fields apply
async fn read_body<S: Send + Sync>(req: Request, state: &S) -> Result<BodyFields, BindError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(media_type);

    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|rejection| BindError::Bind(rejection.body_text()))?;

    if bytes.is_empty() {
        return Ok(BodyFields::Fields(Fields::new()));
    }

    match content_type.as_deref() {
        Some(ct) if is_json(ct) => {
            let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
                BindError::Bind(format!("Failed to parse the request body as JSON: {}", e))
            })?;
            Ok(match value {
                Value::Object(members) => BodyFields::Fields(
                    members
                        .into_iter()
                        .map(|(name, value)| (name, FieldValue::Json(value)))
                        .collect(),
                ),
                other => BodyFields::Value(other),
            })
        }
        Some(FORM_CONTENT_TYPE) => {
            let form_req = http::Request::builder()
                .method(Method::POST)
                .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(Body::from(bytes))
                .map_err(|e| BindError::Bind(e.to_string()))?;
            Form::<Vec<(String, String)>>::from_request(form_req, state)
                .await
                .map(|Form(pairs)| BodyFields::Fields(text_fields(pairs)))
                .map_err(|rejection| BindError::Bind(rejection.body_text()))
        }
        _ => Err(BindError::Bind("Unsupported Media Type".to_string())),
    }
}

/// Content type without parameters, lower-cased
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn is_json(media_type: &str) -> bool {
    media_type == "application/json" || media_type.ends_with("+json")
}

/// A bare `Content-Type` only signals a body on methods that carry one
fn has_body(method: &Method, headers: &HeaderMap) -> bool {
    if headers.contains_key(header::TRANSFER_ENCODING) {
        return true;
    }
    match headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
    {
        Some(length) => length > 0,
        None => headers.contains_key(header::CONTENT_TYPE) && !binds_query(method),
    }
}

fn binds_query(method: &Method) -> bool {
    *method == Method::GET || *method == Method::DELETE || *method == Method::HEAD
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = BindError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let value: T = bind_path(parts, state).await?;
        validate_struct(&value)?;
        Ok(ValidatedPath(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = BindError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let value: T = bind_query(parts, state).await?;
        validate_struct(&value)?;
        Ok(ValidatedQuery(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedHeaders<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = BindError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value: T = bind_headers(&parts.headers)?;
        validate_struct(&value)?;
        Ok(ValidatedHeaders(value))
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedBody<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = BindError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value: T = bind_body(req, state).await?;
        validate_struct(&value)?;
        Ok(ValidatedBody(value))
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for Validated<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = BindError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let method = parts.method.clone();

        let mut fields = path_fields(&mut parts, state).await?;
        if binds_query(&method) {
            fields.extend(query_fields(&parts.uri)?);
        }

        let value: T = if has_body(&method, &parts.headers) {
            debug!(%method, "binding path, query and body");
            match read_body(Request::from_parts(parts, body), state).await? {
                BodyFields::Fields(body_fields) => {
                    fields.extend(body_fields);
                    deserialize_fields(fields, "the request")?
                }
                BodyFields::Value(value) => serde_json::from_value(value).map_err(|e| {
                    BindError::Bind(format!("Failed to deserialize the request body: {}", e))
                })?,
            }
        } else {
            debug!(%method, "binding path and query");
            deserialize_fields(fields, "the request")?
        };

        validate_struct(&value)?;
        Ok(Validated(value))
    }
}
