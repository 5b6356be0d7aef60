// SPDX-License-Identifier: MPL-2.0

//! Custom widgets for the storefront navigator.

pub mod category_nav;
