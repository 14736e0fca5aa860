//! One network call, normalized into a typed value or an `ApiError`.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::session::Session;

const JSON: &str = "application/json";

/// Method, optional JSON body and extra headers of one call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::get()
        }
    }

    /// POST without a body
    pub fn post_empty() -> Self {
        Self {
            method: Method::POST,
            ..Self::get()
        }
    }

    pub fn post<T: Serialize + ?Sized>(body: &T) -> Result<Self> {
        Self::with_body(Method::POST, body)
    }

    pub fn put<T: Serialize + ?Sized>(body: &T) -> Result<Self> {
        Self::with_body(Method::PUT, body)
    }

    pub fn with_body<T: Serialize + ?Sized>(method: Method, body: &T) -> Result<Self> {
        Ok(Self {
            method,
            body: Some(serde_json::to_value(body)?),
            headers: Vec::new(),
        })
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Response body, read exactly once
#[derive(Debug, Clone, PartialEq)]
pub struct RawBody {
    pub text: String,
    /// Parsed JSON when the text is valid JSON
    pub json: Option<Value>,
}

impl RawBody {
    pub fn parse(text: String) -> Self {
        let json = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };
        Self { text, json }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// JSON value to decode on success: parsed JSON, else the text as a string, else null
    fn into_value(self) -> Value {
        match self.json {
            Some(value) => value,
            None if self.text.trim().is_empty() => Value::Null,
            None => Value::String(self.text),
        }
    }
}

/// Default headers, caller headers on top, then the bearer token.
///
/// A JSON content type is added only when a body is present and the caller did
/// not choose one.
pub fn build_headers(
    extra: &[(String, String)],
    has_body: bool,
    token: Option<&str>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::InvalidRequest(format!("invalid header name '{}'", name)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::InvalidRequest(format!("invalid value for header '{}'", name)))?;
        headers.insert(name, value);
    }

    if has_body && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ApiError::InvalidRequest("stored token is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Human-readable message of a failed response.
///
/// Preference: string `detail`, string `message`, any other `detail` as JSON,
/// raw body text, then `Request failed (<status>)`.
pub fn extract_error_message(status: u16, body: &RawBody) -> String {
    if let Some(Value::Object(map)) = &body.json {
        if let Some(Value::String(detail)) = map.get("detail")
            && !detail.is_empty()
        {
            return detail.clone();
        }
        if let Some(Value::String(message)) = map.get("message")
            && !message.is_empty()
        {
            return message.clone();
        }
        if let Some(detail) = map.get("detail")
            && !detail.is_null()
            && !detail.is_string()
        {
            return detail.to_string();
        }
    }

    let text = body.text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    format!("Request failed ({})", status)
}

/// Sends requests to the portal backend on behalf of a session.
///
/// Reads the session's token but never changes it.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config.base_url(), session))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Issue one request and decode a 2xx body as `T`.
    ///
    /// An empty success body decodes from `null`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
        auth: bool,
    ) -> Result<T> {
        let token = if auth { self.session.token() } else { None };
        let headers = build_headers(&options.headers, options.body.is_some(), token.as_deref())?;
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(
            method = %options.method,
            path,
            auth,
            bearer = token.is_some(),
            "API request"
        );

        let mut request = self.client.request(options.method.clone(), &url).headers(headers);
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(|e| self.transport(path, e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport(path, e))?;
        let body = RawBody::parse(text);

        if !status.is_success() {
            let message = extract_error_message(status.as_u16(), &body);
            tracing::warn!(
                method = %options.method,
                path,
                status = status.as_u16(),
                message = %message,
                "API request failed"
            );
            return Err(match status.as_u16() {
                401 | 403 => ApiError::Unauthorized {
                    status: status.as_u16(),
                    message,
                },
                code => ApiError::Http {
                    status: code,
                    message,
                },
            });
        }

        serde_json::from_value(body.into_value()).map_err(|e| {
            tracing::warn!(path, error = %e, "Response did not match the expected shape");
            ApiError::UnexpectedResponse {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn transport(&self, path: &str, source: reqwest::Error) -> ApiError {
        tracing::warn!(path, error = %source, "API request did not reach the server");
        ApiError::Transport {
            path: path.to_string(),
            base_url: self.base_url.clone(),
            source,
        }
    }
}
