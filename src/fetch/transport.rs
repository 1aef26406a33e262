use super::FetchError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Key-value request parameters, sent as a form body for POST and as the
/// query string for GET.
pub type Payload = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub endpoint: String,
    pub params: Option<Payload>,
}

impl Request {
    pub fn get(endpoint: impl Into<String>, params: Option<Payload>) -> Self {
        Self {
            method: Method::Get,
            endpoint: endpoint.into(),
            params,
        }
    }

    pub fn post(endpoint: impl Into<String>, params: Option<Payload>) -> Self {
        Self {
            method: Method::Post,
            endpoint: endpoint.into(),
            params,
        }
    }
}

impl fmt::Display for Request {
    /// `GET /scandelete?id=123` style rendering, used in logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        write!(f, "{} {}", method, self.endpoint)?;
        if let Some(params) = &self.params {
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            if !query.is_empty() {
                let sep = if self.method == Method::Get { '?' } else { ' ' };
                write!(f, "{}{}", sep, query.join("&"))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).trim().to_string()
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Implementations only fail for transport problems; HTTP error statuses are
/// returned as responses and judged by the adapter.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Result<Response, FetchError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &Request) -> Result<Response, FetchError> {
        (**self).send(request).await
    }
}

/// reqwest-backed transport rooted at the backend's docroot.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| FetchError::Transport(format!("invalid backend URL {:?}: {}", base_url, e)))?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base, endpoint)
        } else {
            format!("{}/{}", self.base, endpoint)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<Response, FetchError> {
        let url = self.url(&request.endpoint);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        }
        .header(ACCEPT, "application/json")
        .header(USER_AGENT, concat!("reconview/", env!("CARGO_PKG_VERSION")));

        let builder = match (&request.params, request.method) {
            (Some(params), Method::Get) => builder.query(params),
            (Some(params), Method::Post) => builder.form(params),
            (None, _) => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Response {
            status,
            body: body.to_vec(),
        })
    }
}
