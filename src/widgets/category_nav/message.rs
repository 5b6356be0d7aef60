// SPDX-License-Identifier: MPL-2.0

//! Messages emitted by the category navigator.

use super::state::MountToken;
use crate::api::{CategoryId, CategoryNode, FetchError};

/// Messages emitted by the category navigator.
///
/// These messages should be wrapped by the parent's message type and handled
/// in the parent's update function.
#[derive(Debug, Clone, PartialEq)]
pub enum NavMessage {
    /// The tree fetch for the mount identified by `token` finished.
    TreeLoaded {
        token: MountToken,
        result: Result<Vec<CategoryNode>, FetchError>,
    },

    /// The "All" button was pressed.
    ToggleDrawer,

    /// The drawer's close button or the backdrop was pressed.
    CloseDrawer,

    /// A second-level category in the drawer was pressed.
    ShowThirdLevel {
        /// The first-level category the pressed node belongs to.
        parent: CategoryId,
        /// The pressed second-level category.
        category: CategoryId,
    },

    /// The back button of the third-level view was pressed.
    BackToMain,

    /// The pointer entered a first-level category, or left the menu.
    Hover(Option<CategoryId>),

    /// A category link was activated.
    Open(String),

    /// The retry button of the failed state was pressed.
    Retry,
}
