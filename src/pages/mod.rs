// SPDX-License-Identifier: MPL-2.0

//! Page view modules for the storefront navigator.
//! Each module contains the view logic for a specific page.

pub mod settings;
pub mod storefront;
