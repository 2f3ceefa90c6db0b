//! HTTP transport seam.
//!
//! [`RecordClient`](crate::record_client::RecordClient) builds requests and
//! interprets responses; a [`Transport`] only moves bytes. The production
//! implementation is [`ReqwestTransport`].

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use serde_json::Value as JsonValue;

use crate::app_error::AppError;
use crate::credentials::CredentialProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Patch => write!(f, "PATCH"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP exchange.
///
/// Network-level failures are reported as [`AppError::RemoteStore`]; a
/// non-success status is *not* an error at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, AppError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        (**self).execute(request).await
    }
}

/// `reqwest`-backed transport sending JSON bodies and the session cookie.
pub struct ReqwestTransport {
    client: Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl ReqwestTransport {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client: Client::new(),
            credentials,
        }
    }

    pub fn with_client(client: Client, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Patch => self.client.patch(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };

        builder = builder.header(CONTENT_TYPE, "application/json");
        if let Some(cookie) = self.credentials.session_cookie() {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("{} {} -> {}", request.method, request.url, status);

        Ok(HttpResponse { status, body })
    }
}
