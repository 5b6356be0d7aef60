// SPDX-License-Identifier: MPL-2.0

//! Storefront API access.

mod storefront;

pub use storefront::{CategoryId, CategoryNode, CategoryTreeSource, FetchError, StorefrontClient};
