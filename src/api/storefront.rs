// SPDX-License-Identifier: MPL-2.0

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Deserializer, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Identifier of a category in the storefront catalogue.
pub type CategoryId = u64;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One entry in the product-category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// Display order. Missing and `null` both arrive as an empty list.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Creates a node without children.
    #[cfg(test)]
    pub fn leaf(id: CategoryId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    #[cfg(test)]
    pub fn with_children(
        id: CategoryId,
        name: impl Into<String>,
        url: impl Into<String>,
        children: Vec<CategoryNode>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
            children,
        }
    }

    /// Returns true if this node expands into a group rather than a plain link.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CategoryNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CategoryNode>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope returned by the categories-tree endpoint.
#[derive(Debug, Deserialize)]
struct TreeResponse {
    data: Vec<CategoryNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Server returned status: {0}")]
    Status(u16),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Parses a categories-tree response body.
pub fn parse_tree(body: &str) -> Result<Vec<CategoryNode>, FetchError> {
    serde_json::from_str::<TreeResponse>(body)
        .map(|response| response.data)
        .map_err(|e| FetchError::InvalidResponse(e.to_string()))
}

/// Anything that can hand the navigator a category tree.
pub trait CategoryTreeSource {
    fn fetch_tree(&self) -> impl Future<Output = Result<Vec<CategoryNode>, FetchError>> + Send;
}

/// HTTP client for a storefront's categories-tree endpoint.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: reqwest::Client,
    tree_url: String,
}

impl StorefrontClient {
    pub fn new(tree_url: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            tree_url: tree_url.trim().to_string(),
        })
    }

    pub fn tree_url(&self) -> &str {
        &self.tree_url
    }
}

impl CategoryTreeSource for StorefrontClient {
    async fn fetch_tree(&self) -> Result<Vec<CategoryNode>, FetchError> {
        let response = self
            .client
            .get(&self.tree_url)
            .send()
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        parse_tree(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_normalizes_children() {
        let body = r#"{
            "data": [
                {"id": 1, "name": "Electronics", "url": "/electronics", "children": [
                    {"id": 2, "name": "Phones", "url": "/phones", "children": null},
                    {"id": 3, "name": "Laptops", "url": "/laptops"}
                ]},
                {"id": 4, "name": "Books", "url": "/books", "children": []}
            ]
        }"#;

        let tree = parse_tree(body).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children.len(), 2);
        assert!(!tree[0].children[0].has_children());
        assert!(!tree[0].children[1].has_children());
        assert!(!tree[1].has_children());
    }

    #[test]
    fn test_parse_tree_preserves_order() {
        let body = r#"{"data": [
            {"id": 9, "name": "Z", "url": "/z"},
            {"id": 3, "name": "A", "url": "/a"},
            {"id": 5, "name": "M", "url": "/m"}
        ]}"#;

        let ids: Vec<CategoryId> = parse_tree(body).unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![9, 3, 5]);
    }

    #[test]
    fn test_parse_tree_missing_url_defaults_to_empty() {
        let tree = parse_tree(r#"{"data": [{"id": 1, "name": "Root"}]}"#).unwrap();
        assert_eq!(tree[0].url, "");
    }

    #[test]
    fn test_parse_tree_rejects_bad_envelope() {
        assert!(matches!(
            parse_tree(r#"[{"id": 1, "name": "Root"}]"#),
            Err(FetchError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_tree("not json"),
            Err(FetchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_client_trims_url() {
        let client = StorefrontClient::new("  http://shop.test/api/categories/tree \n").unwrap();
        assert_eq!(client.tree_url(), "http://shop.test/api/categories/tree");
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::Status(503).to_string(), "Server returned status: 503");
    }
}
