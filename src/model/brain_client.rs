//! Second Brain REST API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

#[cfg(test)]
use mockall::automock;

use crate::error::ApiError;
use crate::log_api_request;
use crate::logging::{api_call, record_status};

use super::types::{ContentItem, ContentType, Credentials, NewContent};

/// Backend operations the controller depends on
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BrainApi: Send + Sync {
    /// Returns the session token
    async fn sign_in(&self, credentials: &Credentials) -> Result<String, ApiError>;
    async fn sign_up(&self, credentials: &Credentials) -> Result<(), ApiError>;
    async fn list_content(&self, token: &str) -> Result<Vec<ContentItem>, ApiError>;
    async fn add_content(&self, token: &str, content: &NewContent) -> Result<(), ApiError>;
    async fn delete_content(&self, token: &str, id: i64) -> Result<(), ApiError>;
    async fn search(&self, token: &str, query: &str) -> Result<Vec<ContentItem>, ApiError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Items stay raw JSON so one bad entry can be skipped on its own
#[derive(Deserialize)]
struct ContentListResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct LinkDto {
    #[serde(default)]
    hash: Option<String>,
}

#[derive(Deserialize)]
struct TagDto {
    title: String,
}

/// Content item as the backend sends it
#[derive(Deserialize)]
struct ContentDto {
    id: i64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type")]
    content_type: ContentType,
    #[serde(default)]
    link: Option<LinkDto>,
    #[serde(default)]
    tags: Option<Vec<TagDto>>,
}

impl From<ContentDto> for ContentItem {
    fn from(dto: ContentDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            tags: dto
                .tags
                .unwrap_or_default()
                .into_iter()
                .map(|t| t.title)
                .collect(),
            link: dto.link.and_then(|l| l.hash).unwrap_or_default(),
            content_type: dto.content_type,
        }
    }
}

/// Decode a list of wire items, dropping the ones that do not fit
fn decode_items(operation: &'static str, raw: Option<Vec<Value>>) -> Vec<ContentItem> {
    raw.unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<ContentDto>(value) {
            Ok(dto) => Some(ContentItem::from(dto)),
            Err(e) => {
                tracing::warn!(operation, index, error = %e, "Skipping malformed content item");
                None
            }
        })
        .collect()
}

/// reqwest-backed implementation of [`BrainApi`]
#[derive(Clone)]
pub struct BrainClient {
    http: Client,
    base_url: Url,
}

impl BrainClient {
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// The backend takes the raw token, no `Bearer` prefix
    fn authorized(request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header("authorization", token)
    }

    async fn send(operation: &'static str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        record_status(status.as_u16());
        if !status.is_success() {
            return Err(ApiError::Status { operation, status });
        }
        Ok(response)
    }
}

#[async_trait]
impl BrainApi for BrainClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<String, ApiError> {
        api_call("sign_in", async {
            log_api_request!("sign_in", username = %credentials.username);
            let url = self.endpoint("api/v1/signin")?;
            let response = Self::send("sign_in", self.http.post(url).json(credentials)).await?;
            let body: TokenResponse = response.json().await?;
            Ok::<_, ApiError>(body.token)
        })
        .await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<(), ApiError> {
        api_call("sign_up", async {
            log_api_request!("sign_up", username = %credentials.username);
            let url = self.endpoint("api/v1/signup")?;
            Self::send("sign_up", self.http.post(url).json(credentials)).await?;
            Ok::<_, ApiError>(())
        })
        .await
    }

    async fn list_content(&self, token: &str) -> Result<Vec<ContentItem>, ApiError> {
        api_call("list_content", async {
            log_api_request!("list_content");
            let url = self.endpoint("api/v1/content")?;
            let request = Self::authorized(self.http.get(url), token);
            let response = Self::send("list_content", request).await?;
            let body: ContentListResponse = response.json().await?;
            let items = decode_items("list_content", body.data);
            tracing::debug!(count = items.len(), "Content list fetched");
            Ok::<_, ApiError>(items)
        })
        .await
    }

    async fn add_content(&self, token: &str, content: &NewContent) -> Result<(), ApiError> {
        api_call("add_content", async {
            log_api_request!("add_content", title = %content.title, content_type = content.content_type.label());
            let url = self.endpoint("api/v1/content")?;
            let request = Self::authorized(self.http.post(url).json(content), token);
            Self::send("add_content", request).await?;
            Ok::<_, ApiError>(())
        })
        .await
    }

    async fn delete_content(&self, token: &str, id: i64) -> Result<(), ApiError> {
        api_call("delete_content", async {
            log_api_request!("delete_content", id);
            let url = self.endpoint(&format!("api/v1/content/{}", id))?;
            let request = Self::authorized(self.http.delete(url), token);
            Self::send("delete_content", request).await?;
            Ok::<_, ApiError>(())
        })
        .await
    }

    async fn search(&self, token: &str, query: &str) -> Result<Vec<ContentItem>, ApiError> {
        api_call("search", async {
            log_api_request!("search", query);
            let url = self.endpoint("api/v1/search")?;
            let request = Self::authorized(self.http.post(url).json(&json!({ "query": query })), token);
            let response = Self::send("search", request).await?;
            let body: SearchResponse = response.json().await?;
            Ok::<_, ApiError>(decode_items("search", body.results))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wire_item_is_normalized() {
        let body = r#"{
            "data": [
                {
                    "id": 7,
                    "title": "Rust talk",
                    "description": "Ownership in depth",
                    "type": "Video",
                    "link": { "hash": "https://youtu.be/abc" },
                    "tags": [{ "title": "rust" }, { "title": "talks" }]
                },
                { "id": 8, "title": "Bare", "type": "Article" }
            ]
        }"#;
        let parsed: ContentListResponse = serde_json::from_str(body).unwrap();
        let items = decode_items("list_content", parsed.data);

        assert_eq!(
            items,
            vec![
                ContentItem {
                    id: 7,
                    title: "Rust talk".into(),
                    description: Some("Ownership in depth".into()),
                    tags: vec!["rust".into(), "talks".into()],
                    link: "https://youtu.be/abc".into(),
                    content_type: ContentType::Video,
                },
                ContentItem {
                    id: 8,
                    title: "Bare".into(),
                    description: None,
                    tags: vec![],
                    link: String::new(),
                    content_type: ContentType::Article,
                },
            ]
        );
    }

    #[test]
    fn missing_arrays_are_empty() {
        let list: ContentListResponse = serde_json::from_str("{}").unwrap();
        assert!(decode_items("list_content", list.data).is_empty());
        let search: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(decode_items("search", search.results).is_empty());
    }

    #[test]
    fn null_arrays_are_empty() {
        let list: ContentListResponse = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(decode_items("list_content", list.data).is_empty());
        let search: SearchResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();
        assert!(decode_items("search", search.results).is_empty());
    }

    #[test]
    fn unknown_item_is_skipped_and_the_rest_kept() {
        let body = r#"{
            "results": [
                { "id": 1, "title": "Thread", "type": "Tweet" },
                { "id": 2, "title": "Podcast", "type": "Audio", "tags": [{ "title": "talk" }] },
                { "id": "three", "title": "Bad id", "type": "Video" },
                { "title": "No id", "type": "Image" }
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let items = decode_items("search", parsed.results);

        assert_eq!(
            items,
            vec![ContentItem {
                id: 2,
                title: "Podcast".into(),
                description: None,
                tags: vec!["talk".into()],
                link: String::new(),
                content_type: ContentType::Audio,
            }]
        );
    }

    #[test]
    fn link_without_hash_is_empty() {
        let dto: ContentDto =
            serde_json::from_str(r#"{"id": 1, "title": "x", "type": "Image", "link": {}, "tags": null}"#).unwrap();
        let item = ContentItem::from(dto);
        assert_eq!(item.link, "");
        assert!(item.tags.is_empty());
    }

    #[test]
    fn endpoints_join_under_base() {
        let client = BrainClient::new(Url::parse("https://brain.example.com/app/").unwrap(), None).unwrap();
        assert_eq!(
            client.endpoint("api/v1/content/5").unwrap().as_str(),
            "https://brain.example.com/app/api/v1/content/5"
        );
    }

    #[test]
    fn token_header_is_raw() {
        let client = BrainClient::new(Url::parse("http://localhost:3000/").unwrap(), None).unwrap();
        let request = BrainClient::authorized(client.http.get("http://localhost:3000/api/v1/content"), "abc123")
            .build()
            .unwrap();
        assert_eq!(request.headers()["authorization"], "abc123");
    }
}
