// SPDX-License-Identifier: MPL-2.0

//! Async helper functions for the storefront navigator.
//! These functions handle the categories-tree fetch.

use crate::api::{CategoryNode, CategoryTreeSource, FetchError, StorefrontClient};

/// Load the tree from any source, logging the outcome
pub async fn load_category_tree<S>(source: &S) -> Result<Vec<CategoryNode>, FetchError>
where
    S: CategoryTreeSource + Sync,
{
    match source.fetch_tree().await {
        Ok(tree) => {
            tracing::info!(categories = tree.len(), "category tree loaded");
            Ok(tree)
        }
        Err(e) => {
            tracing::warn!(error = %e, "category tree fetch failed");
            Err(e)
        }
    }
}

/// Fetch the category tree from a storefront endpoint
pub async fn fetch_category_tree(tree_url: &str) -> Result<Vec<CategoryNode>, FetchError> {
    let client = StorefrontClient::new(tree_url)?;
    tracing::debug!(url = client.tree_url(), "fetching category tree");
    load_category_tree(&client).await
}
