/// REST document store client
///
/// Speaks the hosted store's JSON protocol:
/// - `GET    {base}/{collection}/{id}`          → `{"id", "doc"}` or 404
/// - `PUT    {base}/{collection}/{id}?merge=…`  → upsert, merge at top level
/// - `POST   {base}/{collection}`               → `{"id"}` for the new document
/// - `GET    {base}/{collection}`               → `{"documents": [{"id","doc"}]}`
///
/// Requests carry a bearer token when the deployment requires one. One
/// request-response round trip per call; failures surface as
/// `AppError::Store` and the typed accessor decides soft or loud.
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, AppResult},
};

use super::{Document, DocumentStore};

#[derive(Clone)]
pub struct RestDocumentStore {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
}

impl RestDocumentStore {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.store_api_url.clone(), config.store_api_key.clone())
    }

    fn url(&self, parts: &[&str]) -> String {
        let mut url = self.api_url.trim_end_matches('/').to_string();
        for part in parts {
            url.push('/');
            url.push_str(part);
        }
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn check(response: reqwest::Response) -> AppResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Store(format!(
            "store returned status {}: {}",
            status, body
        )))
    }
}

#[derive(Deserialize)]
struct AddResponse {
    id: String,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[async_trait::async_trait]
impl DocumentStore for RestDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let request = self.http_client.get(self.url(&[collection, id]));
        let response = self.authorize(request).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: Document = Self::check(response).await?.json().await?;
        Ok(Some(document.doc))
    }

    async fn set(&self, collection: &str, id: &str, doc: Value, merge: bool) -> AppResult<()> {
        let request = self
            .http_client
            .put(self.url(&[collection, id]))
            .query(&[("merge", if merge { "true" } else { "false" })])
            .json(&doc);

        Self::check(self.authorize(request).send().await?).await?;

        tracing::debug!(collection, id, merge, "document written");

        Ok(())
    }

    async fn add(&self, collection: &str, doc: Value) -> AppResult<String> {
        let request = self.http_client.post(self.url(&[collection])).json(&doc);
        let response = Self::check(self.authorize(request).send().await?).await?;

        let created: AddResponse = response.json().await?;

        tracing::debug!(collection, id = %created.id, "document appended");

        Ok(created.id)
    }

    async fn list(&self, collection: &str) -> AppResult<Vec<Document>> {
        let request = self.http_client.get(self.url(&[collection]));
        let response = Self::check(self.authorize(request).send().await?).await?;

        let listing: ListResponse = response.json().await?;
        Ok(listing.documents)
    }
}
