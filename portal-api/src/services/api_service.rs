use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, Method, Request, RequestBuilder, Response};
use serde::Serialize;
use tower::util::BoxCloneService;
use tower::ServiceBuilder;
use url::Url;

use crate::error::ApiError;
use crate::util::api_url;

/// Specialized HTTP client for talking to the portal. Responsible for executing requests one at a
/// time and turning non-success statuses into errors, but not anything at a higher level,
/// including building requests for specific resources or decoding their bodies.
pub type ApiService = BoxCloneService<Request, Response, ApiError>;

pub fn service(http_client: HttpClient) -> ApiService {
    let service = ServiceBuilder::new()
        .concurrency_limit(1)
        .service_fn(move |request: Request| execute(http_client.clone(), request));
    BoxCloneService::new(service)
}

async fn execute(http_client: HttpClient, request: Request) -> Result<Response, ApiError> {
    let response = http_client.execute(request).await?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Only feeds the error message.
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::status_with_body(status, &body))
}

pub(crate) fn http_client(timeout: Duration) -> Result<HttpClient, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = HttpClient::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()?;

    Ok(client)
}

#[derive(Debug)]
pub struct PortalRequest {
    method: Method,
    path: Vec<String>,
    query: Vec<(&'static str, String)>,
    json: Option<serde_json::Value>,
}

impl PortalRequest {
    pub fn new<'a>(method: Method, path: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            method,
            path: path.into_iter().map(ToOwned::to_owned).collect(),
            query: Vec::new(),
            json: None,
        }
    }

    pub fn get<'a>(path: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post<'a>(path: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn with_json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        self.json = Some(serde_json::to_value(body).map_err(|err| ApiError::Client(err.to_string()))?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = api_url(base, self.path.iter().map(String::as_str))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }

    pub fn request_builder(&self, http_client: &HttpClient, base: &Url) -> Result<RequestBuilder, ApiError> {
        let base = http_client.request(self.method.clone(), self.url(base)?);

        let with_json = if let Some(body) = &self.json {
            base.json(body)
        } else {
            base
        };

        Ok(with_json)
    }
}
